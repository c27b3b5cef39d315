//! Wire form of the envelope: `_shsf`, `_code`, `_res`, `_headers`, `_location`.

use crate::envelope::builder::{Content, Envelope, PROTOCOL_VERSION};
use crate::envelope::{InvalidStatusCode, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a wire object is not a valid envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("unsupported envelope version '{0}'")]
    UnsupportedVersion(String),
    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatusCode),
    #[error("envelope carries both a body and a redirect location")]
    BodyAndRedirect,
    #[error("envelope carries neither a body nor a redirect location")]
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WireEnvelope {
    #[serde(rename = "_shsf")]
    version: String,
    #[serde(rename = "_code")]
    code: u16,
    #[serde(
        rename = "_res",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    res: Option<Value>,
    #[serde(rename = "_headers", default, skip_serializing_if = "BTreeMap::is_empty")]
    headers: BTreeMap<String, String>,
    #[serde(rename = "_location", default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

/// Keep an explicit `null` body as a present value.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<Envelope> for WireEnvelope {
    fn from(envelope: Envelope) -> Self {
        let (res, location) = match envelope.content {
            Content::Body(body) => (Some(body), None),
            Content::Redirect(target) => (None, Some(target)),
        };
        Self {
            version: PROTOCOL_VERSION.to_string(),
            code: envelope.status.as_u16(),
            res,
            headers: envelope.headers,
            location,
        }
    }
}

impl TryFrom<WireEnvelope> for Envelope {
    type Error = WireError;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        if wire.version != PROTOCOL_VERSION {
            return Err(WireError::UnsupportedVersion(wire.version));
        }
        let status = StatusCode::from_u16(wire.code)?;
        let content = match (wire.res, wire.location) {
            (Some(body), None) => Content::Body(body),
            (None, Some(target)) => Content::Redirect(target),
            (Some(_), Some(_)) => return Err(WireError::BodyAndRedirect),
            (None, None) => return Err(WireError::Empty),
        };
        Ok(Envelope {
            status,
            content,
            headers: wire.headers,
        })
    }
}
