//! Interpretation of a function outcome as an HTTP reply.

use crate::envelope::{Content, Envelope, StatusCode};
use crate::error::InternalFault;
use bytes::Bytes;
use serde_json::json;

const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Status, headers and body ready to be written to the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpReply {
    /// Interpret the outcome of one invocation.
    ///
    /// A fault always yields 500, whatever the function produced. Envelope
    /// headers are applied last and replace any default header of the same
    /// name, compared without case.
    pub fn from_outcome(outcome: Result<Envelope, InternalFault>) -> Self {
        match outcome {
            Ok(envelope) => Self::from_envelope(envelope),
            Err(_) => Self::internal_error(),
        }
    }

    fn from_envelope(envelope: Envelope) -> Self {
        let status = envelope.status().as_u16();
        let mut headers = Vec::new();

        let body = match envelope.content() {
            Content::Redirect(target) => {
                headers.push(("Location".to_string(), target.clone()));
                Bytes::new()
            }
            Content::Body(serde_json::Value::String(text)) => {
                headers.push((CONTENT_TYPE.to_string(), TEXT_CONTENT_TYPE.to_string()));
                Bytes::from(text.clone())
            }
            Content::Body(value) => match serde_json::to_vec(value) {
                Ok(bytes) => {
                    headers.push((CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string()));
                    Bytes::from(bytes)
                }
                Err(_) => return Self::internal_error(),
            },
        };

        for (name, value) in envelope.headers() {
            set_header(&mut headers, name, value);
        }

        Self {
            status,
            headers,
            body,
        }
    }

    fn internal_error() -> Self {
        let body = json!({"state": false, "error": "Internal function error"});
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            headers: vec![(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string())],
            body: Bytes::from(body.to_string()),
        }
    }

    /// Get a header value, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get the body as text.
    pub fn text_body(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Set `name`, dropping any existing header that matches it ignoring case.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}
