//! Envelope type and its constructors.

use crate::envelope::wire::WireEnvelope;
use crate::envelope::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Schema tag stamped on every envelope.
pub const PROTOCOL_VERSION: &str = "v2";

/// What an envelope carries besides its status: a body or a redirect target.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Structured response payload.
    Body(Value),
    /// Redirect target URL.
    Redirect(String),
}

/// Structured response handed back to the harness.
///
/// The protocol version is implied by the type and always serialized as
/// [`PROTOCOL_VERSION`]. Headers are kept sorted so the serialized form is
/// stable for identical inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireEnvelope", try_from = "WireEnvelope")]
pub struct Envelope {
    pub(crate) status: StatusCode,
    pub(crate) content: Content,
    pub(crate) headers: BTreeMap<String, String>,
}

impl Envelope {
    fn with_content(status: StatusCode, content: Content) -> Self {
        Self {
            status,
            content,
            headers: BTreeMap::new(),
        }
    }

    /// Error envelope with body `{state: false, error: message}`.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert("state".to_string(), Value::Bool(false));
        body.insert("error".to_string(), Value::String(message.into()));
        Self::with_content(status, Content::Body(Value::Object(body)))
    }

    /// Success envelope with body `{state: true, ...data}`.
    ///
    /// `state` is stamped after merging, so a `state` key in `data` is replaced.
    pub fn success(status: StatusCode, data: Map<String, Value>) -> Self {
        let mut body = data;
        body.insert("state".to_string(), Value::Bool(true));
        Self::with_content(status, Content::Body(Value::Object(body)))
    }

    /// Redirect envelope: 301 when `permanent`, 302 otherwise. Carries no body.
    pub fn redirect(target: impl Into<String>, permanent: bool) -> Self {
        let status = if permanent {
            StatusCode::MOVED_PERMANENTLY
        } else {
            StatusCode::FOUND
        };
        Self::with_content(status, Content::Redirect(target.into()))
    }

    /// Envelope whose body is the caller's value, verbatim.
    pub fn passthrough(status: StatusCode, body: Value) -> Self {
        Self::with_content(status, Content::Body(body))
    }

    /// Add an extra response header, replacing any header with the same name
    /// regardless of case.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    /// Add several extra response headers.
    pub fn with_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |envelope, (k, v)| envelope.with_header(k, v))
    }

    /// The schema tag.
    pub fn protocol_version(&self) -> &'static str {
        PROTOCOL_VERSION
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The body or redirect target.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// The body, unless this is a redirect.
    pub fn body(&self) -> Option<&Value> {
        match &self.content {
            Content::Body(body) => Some(body),
            Content::Redirect(_) => None,
        }
    }

    /// The redirect target, if this is a redirect.
    pub fn redirect_location(&self) -> Option<&str> {
        match &self.content {
            Content::Redirect(target) => Some(target),
            Content::Body(_) => None,
        }
    }

    /// Whether this envelope redirects.
    pub fn is_redirect(&self) -> bool {
        matches!(self.content, Content::Redirect(_))
    }

    /// Extra response headers, keyed by name.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Serialize to the JSON form the harness consumes.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_error_envelope() {
        let envelope = Envelope::error(StatusCode::BAD_REQUEST, "nope")
            .with_header("X-Custom-Header", "validation-failed");

        assert_eq!(envelope.status(), StatusCode::BAD_REQUEST);
        assert_eq!(envelope.body(), Some(&json!({"state": false, "error": "nope"})));
        assert_eq!(
            envelope.headers().get("X-Custom-Header").map(String::as_str),
            Some("validation-failed")
        );
        assert_eq!(envelope.protocol_version(), "v2");
    }

    #[test]
    fn test_success_stamps_state() {
        let envelope = Envelope::success(
            StatusCode::OK,
            data(json!({"message": "hi", "state": "overridden"})),
        );
        assert_eq!(
            envelope.body(),
            Some(&json!({"state": true, "message": "hi"}))
        );
    }

    #[test]
    fn test_redirect_codes() {
        let permanent = Envelope::redirect("https://x.com", true);
        assert_eq!(permanent.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(permanent.redirect_location(), Some("https://x.com"));
        assert!(permanent.body().is_none());

        let temporary = Envelope::redirect("/dashboard", false);
        assert_eq!(temporary.status(), StatusCode::FOUND);
        assert_eq!(temporary.redirect_location(), Some("/dashboard"));
        assert!(temporary.is_redirect());
    }

    #[test]
    fn test_passthrough_keeps_body_verbatim() {
        let raw = json!({"message": "no state here", "received_data": [1, 2]});
        let envelope = Envelope::passthrough(StatusCode::CREATED, raw.clone());
        assert_eq!(envelope.body(), Some(&raw));
        assert!(envelope.redirect_location().is_none());

        let text = Envelope::passthrough(StatusCode::OK, json!("<h1>hi</h1>"));
        assert_eq!(text.body(), Some(&json!("<h1>hi</h1>")));
    }

    #[test]
    fn test_with_headers_merges() {
        let envelope = Envelope::success(StatusCode::OK, Map::new())
            .with_headers([("A", "1"), ("B", "2")])
            .with_header("A", "3");
        assert_eq!(envelope.headers().len(), 2);
        assert_eq!(envelope.headers()["A"], "3");
    }

    #[test]
    fn test_header_names_ignore_case() {
        let envelope = Envelope::success(StatusCode::OK, Map::new())
            .with_header("x-a", "1")
            .with_header("X-A", "2");
        assert_eq!(envelope.headers().len(), 1);
        assert_eq!(envelope.headers()["X-A"], "2");
    }
}
