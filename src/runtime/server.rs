//! Development host HTTP server.

use crate::envelope::{Envelope, StatusCode};
use crate::error::RegistryError;
use crate::function::{FunctionRegistry, ShsfFunction};
use crate::invocation::DEFAULT_ROUTE;
use crate::runtime::{HostConfig, HttpReply};
use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Development host.
///
/// Serves `/{function}` and `/{function}/{route}` by building an invocation
/// argument from the HTTP request and writing back the function's envelope.
pub struct HostServer {
    /// Server configuration.
    config: HostConfig,
    /// Function registry.
    registry: Arc<FunctionRegistry>,
}

impl HostServer {
    /// Create a new host.
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            registry: Arc::new(FunctionRegistry::new()),
        }
    }

    /// Create a new host with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(HostConfig::default())
    }

    /// Get the function registry.
    pub fn registry(&self) -> Arc<FunctionRegistry> {
        self.registry.clone()
    }

    /// Register a function under its own name.
    pub async fn register_function(
        &self,
        function: Box<dyn ShsfFunction>,
    ) -> Result<(), RegistryError> {
        let name = function.name().to_string();
        self.registry.register(name, function).await
    }

    /// Start the HTTP server.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("SHSF host listening on {}", addr);

        let registry = self.registry.clone();
        let config = Arc::new(self.config);

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);

            let registry = registry.clone();
            let config = config.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let registry = registry.clone();
                    let config = config.clone();
                    async move {
                        Ok::<_, hyper::Error>(
                            handle_request(req, &registry, &config, remote_addr).await,
                        )
                    }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// The pieces of an HTTP request that reach a function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParts {
    pub method: String,
    pub route: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub query: Option<String>,
    pub source_ip: String,
    pub body: Bytes,
}

/// Build the invocation argument handed to a function.
///
/// A body that parses as JSON is passed as the parsed value, anything else
/// as text. `raw_body` always carries the text form.
pub fn build_invocation(parts: &RequestParts) -> Value {
    let raw_body = String::from_utf8_lossy(&parts.body).to_string();
    let body = if parts.body.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(&parts.body).unwrap_or_else(|_| Value::String(raw_body.clone()))
    };

    let queries: Map<String, Value> = parts
        .query
        .as_deref()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
                .collect()
        })
        .unwrap_or_default();

    let route = parts
        .route
        .as_deref()
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_ROUTE);

    json!({
        "ran_by": "exec",
        "method": parts.method,
        "route": route,
        "headers": parts.headers,
        "queries": queries,
        "source_ip": parts.source_ip,
        "body": body,
        "raw_body": raw_body,
    })
}

/// Handle an incoming HTTP request.
async fn handle_request(
    req: Request<Incoming>,
    registry: &FunctionRegistry,
    config: &HostConfig,
    remote_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    let path = req.uri().path().to_string();
    let request_id = generate_request_id();

    debug!(
        "Handling request: {} {} from {} [{}]",
        req.method(),
        path,
        remote_addr,
        request_id
    );

    if config.enable_health && path == "/_health" {
        return build_response(HttpReply::from_outcome(Ok(Envelope::passthrough(
            StatusCode::OK,
            json!("OK"),
        ))));
    }

    if config.enable_functions_listing && path == "/_functions" {
        let functions = registry.list().await;
        let envelope = match serde_json::to_value(functions) {
            Ok(list) => Envelope::passthrough(StatusCode::OK, json!({ "functions": list })),
            Err(e) => return build_response(HttpReply::from_outcome(Err(e.into()))),
        };
        return build_response(HttpReply::from_outcome(Ok(envelope)));
    }

    // Expected format: /{function_name} or /{function_name}/{route}
    let segments: Vec<&str> = path.trim_start_matches('/').splitn(3, '/').collect();
    let function_name = segments.first().copied().unwrap_or_default().to_string();

    if function_name.is_empty() {
        return reject(StatusCode::NOT_FOUND, "No function specified");
    }
    if segments.len() > 2 {
        return reject(
            StatusCode::NOT_FOUND,
            "Routes are limited to a single path segment",
        );
    }

    let route = segments.get(1).map(|s| s.to_string());
    let parts = match read_parts(req, route, config, remote_addr).await {
        Ok(parts) => parts,
        Err(reply) => return build_response(reply),
    };
    let arg = build_invocation(&parts);

    match registry.execute(&function_name, &arg, &request_id).await {
        Ok(outcome) => build_response(HttpReply::from_outcome(outcome)),
        Err(e) => {
            warn!("{} [{}]", e, request_id);
            reject(StatusCode::NOT_FOUND, "Function not found")
        }
    }
}

fn reject(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    build_response(HttpReply::from_outcome(Ok(Envelope::error(status, message))))
}

/// Collect the request into [`RequestParts`], enforcing the body size cap.
async fn read_parts(
    req: Request<Incoming>,
    route: Option<String>,
    config: &HostConfig,
    remote_addr: SocketAddr,
) -> Result<RequestParts, HttpReply> {
    let (head, body) = req.into_parts();

    let headers = head
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let body = match Limited::new(body, config.max_body_size).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return Err(HttpReply::from_outcome(Ok(Envelope::error(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large",
            ))));
        }
    };

    Ok(RequestParts {
        method: head.method.as_str().to_string(),
        route,
        headers,
        query: head.uri.query().map(str::to_string),
        source_ip: remote_addr.ip().to_string(),
        body,
    })
}

/// Build a hyper Response from an [`HttpReply`].
fn build_response(reply: HttpReply) -> Response<Full<Bytes>> {
    let status = hyper::StatusCode::from_u16(reply.status).unwrap_or_else(|_| {
        warn!(
            "Invalid status code {}, falling back to 500 Internal Server Error",
            reply.status
        );
        hyper::StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut builder = Response::builder().status(status);
    for (name, value) in &reply.headers {
        builder = builder.header(name, value);
    }

    builder.body(Full::new(reply.body)).unwrap_or_else(|e| {
        error!("Failed to build response: {}", e);
        let mut response = Response::new(Full::new(Bytes::new()));
        *response.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
        response
    })
}

/// Generate a unique request ID.
fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{:x}", timestamp)
}
