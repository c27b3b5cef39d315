//! Integration tests for the SHSF invocation contract.

use serde_json::{json, Map, Value};
use shsf::functions::{
    self, CustomResponsesFunction, DataPassingFunction, RedirectsFunction, RoutingFunction,
    SecureHeadersFunction,
};
use shsf::prelude::*;
use shsf::runtime::HttpReply;
use tokio_test::{assert_err, assert_ok};

/// Echoes the invocation body back verbatim.
#[shsf_function(id = "macro-echo", version = "v2", description = "Echo the request body")]
fn macro_echo(arg: &Value) -> Result<Envelope, InternalFault> {
    serve(arg, &|request: &Request| -> Result<Envelope, InternalFault> {
        Ok(Envelope::passthrough(StatusCode::OK, request.body().to_value()))
    })
}

#[shsf_function(id = "macro-panic")]
fn macro_panic(_arg: &Value) -> Result<Envelope, InternalFault> {
    panic!("handler bug")
}

#[shsf_function(id = "macro-fault")]
fn macro_fault(_arg: &Value) -> Result<Envelope, InternalFault> {
    Err(InternalFault::new("database handle poisoned"))
}

fn bundled() -> Vec<Box<dyn ShsfFunction>> {
    functions::bundled().unwrap()
}

#[test]
fn test_macro_function_creation() {
    let func = MacroEchoFunction::new();
    assert_eq!(func.name(), "macro-echo");
}

#[test]
fn test_macro_function_manifest() {
    let manifest = MacroEchoFunction::manifest();
    assert_eq!(manifest.id, "macro-echo");
    assert_eq!(manifest.version, "v2");
    assert_eq!(manifest.description, "Echo the request body");

    let manifest = MacroPanicFunction::manifest();
    assert_eq!(manifest.version, "v1");
    assert_eq!(manifest.description, "");
}

#[tokio::test]
async fn test_macro_function_execution() {
    let registry = FunctionRegistry::new();
    assert_ok!(
        registry
            .register("macro-echo", Box::new(MacroEchoFunction::new()))
            .await
    );

    let outcome = registry
        .execute("macro-echo", &json!({"body": {"k": [1, 2]}}), "req-1")
        .await
        .unwrap();
    let envelope = assert_ok!(outcome);
    assert_eq!(envelope.body(), Some(&json!({"k": [1, 2]})));
}

#[tokio::test]
async fn test_function_registry_duplicate_register() {
    let registry = FunctionRegistry::new();
    assert_ok!(registry.register("echo", Box::new(MacroEchoFunction)).await);

    let result = registry.register("echo", Box::new(MacroEchoFunction)).await;
    assert_eq!(result, Err(RegistryError::DuplicateFunction("echo".to_string())));
}

#[tokio::test]
async fn test_function_registry_execute_not_found() {
    let registry = FunctionRegistry::new();
    let result = registry.execute("nonexistent", &json!({}), "req-2").await;
    assert_eq!(
        result.unwrap_err(),
        RegistryError::FunctionNotFound("nonexistent".to_string())
    );
}

#[tokio::test]
async fn test_function_registry_remove() {
    let registry = FunctionRegistry::new();
    registry.register("echo", Box::new(MacroEchoFunction)).await.unwrap();
    assert!(registry.contains("echo").await);

    assert_ok!(registry.remove("echo").await);
    assert!(!registry.contains("echo").await);
    assert_err!(registry.remove("echo").await);
}

#[tokio::test]
async fn test_panic_becomes_internal_fault() {
    let registry = FunctionRegistry::new();
    registry
        .register("macro-panic", Box::new(MacroPanicFunction))
        .await
        .unwrap();

    let outcome = registry
        .execute("macro-panic", &json!({}), "req-3")
        .await
        .unwrap();
    let fault = assert_err!(outcome.clone());
    assert_eq!(fault.message(), "function panicked: handler bug");

    let reply = HttpReply::from_outcome(outcome);
    assert_eq!(reply.status, 500);

    let stats = registry.list().await;
    assert_eq!(stats[0].invocations, 1);
    assert_eq!(stats[0].faults, 1);
}

#[tokio::test]
async fn test_fault_overrides_everything() {
    let registry = FunctionRegistry::new();
    registry
        .register("macro-fault", Box::new(MacroFaultFunction))
        .await
        .unwrap();

    let outcome = registry
        .execute("macro-fault", &json!({"body": {}}), "req-4")
        .await
        .unwrap();
    let reply = HttpReply::from_outcome(outcome);
    assert_eq!(reply.status, 500);
    assert!(!reply.text_body().contains("poisoned"));
}

#[tokio::test]
async fn test_registry_lists_bundled_functions() {
    let registry = FunctionRegistry::new();
    for function in bundled() {
        let name = function.name().to_string();
        registry.register(name, function).await.unwrap();
    }

    let names: Vec<String> = registry.list().await.into_iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec![
            "custom-responses",
            "data-passing",
            "redirects",
            "routing",
            "secure-headers",
        ]
    );
}

#[test]
fn test_scenario_missing_required_field() {
    let envelope = CustomResponsesFunction::new()
        .invoke(&json!({"body": {}}))
        .unwrap();
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "_shsf": "v2",
            "_code": 400,
            "_res": {"state": false, "error": "Missing required_field in request"},
            "_headers": {"X-Custom-Header": "validation-failed"},
        })
    );
}

#[test]
fn test_scenario_required_field_present() {
    let envelope = CustomResponsesFunction::new()
        .invoke(&json!({"body": {"required_field": "x"}}))
        .unwrap();
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "_shsf": "v2",
            "_code": 200,
            "_res": {"state": true, "message": "Request processed successfully", "data": "x"},
            "_headers": {"X-Custom-Header": "validation-success"},
        })
    );
}

#[test]
fn test_scenario_login() {
    let envelope = RoutingFunction::new()
        .unwrap()
        .invoke(&json!({"route": "login", "body": {"username": "alice"}}))
        .unwrap();
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "_shsf": "v2",
            "_code": 200,
            "_res": {
                "state": true,
                "message": "User alice logged in",
                "route": "login",
                "token": "example-auth-token",
            },
        })
    );
}

#[test]
fn test_scenario_unknown_route() {
    let envelope = RoutingFunction::new()
        .unwrap()
        .invoke(&json!({"route": "unknownpath"}))
        .unwrap();
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "_shsf": "v2",
            "_code": 404,
            "_res": {
                "state": false,
                "error": "Route 'unknownpath' not found",
                "available_routes": ["register", "login", "profile", "default"],
            },
        })
    );
}

#[test]
fn test_scenario_permanent_redirect() {
    let envelope = RedirectsFunction
        .invoke(&json!({"body": {"target": "https://x.com", "type": "permanent"}}))
        .unwrap();
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({"_shsf": "v2", "_code": 301, "_location": "https://x.com"})
    );
}

#[test]
fn test_scenario_non_mapping_argument() {
    for function in bundled() {
        let envelope = function.invoke(&json!("not a mapping")).unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "_shsf": "v2",
                "_code": 400,
                "_res": {"state": false, "error": "Invalid payload format"},
            }),
            "function {}",
            function.name()
        );
    }
}

#[test]
fn test_non_mappings_never_redirect() {
    let args = [
        json!(null),
        json!(true),
        json!(17),
        json!("route"),
        json!(["route", "login"]),
    ];
    for function in bundled() {
        for arg in &args {
            let envelope = function.invoke(arg).unwrap();
            assert_eq!(envelope.status(), StatusCode::BAD_REQUEST);
            assert!(envelope.redirect_location().is_none());
        }
    }
}

#[test]
fn test_every_envelope_is_body_xor_redirect() {
    let args = [
        json!({}),
        json!({"body": {"required_field": 1}}),
        json!({"body": {"target": "/x", "type": "permanent"}}),
        json!({"route": "register", "body": {"username": "u", "email": "e"}}),
        json!({"route": "profile"}),
        json!({"route": "nowhere"}),
        json!({"headers": {"x-secure-header": "t"}}),
    ];
    for function in bundled() {
        for arg in &args {
            let envelope = function.invoke(arg).unwrap();
            assert_ne!(envelope.body().is_some(), envelope.redirect_location().is_some());

            let wire = serde_json::to_value(&envelope).unwrap();
            assert_eq!(wire["_shsf"], PROTOCOL_VERSION);
            assert_ne!(wire.get("_res").is_some(), wire.get("_location").is_some());
        }
    }
}

#[test]
fn test_dispatch_is_total() {
    let routing = RoutingFunction::new().unwrap();
    let routes = [
        "", "default", "login", "LOGIN", "register", "profile", "a/b", "../etc", " ", "ünïcode",
    ];
    for route in routes {
        let envelope = routing.invoke(&json!({"route": route})).unwrap();
        let known = routing.routes().iter().any(|r| r == route);
        if known {
            assert_ne!(envelope.status(), StatusCode::NOT_FOUND, "route {:?}", route);
        } else {
            assert_eq!(envelope.status(), StatusCode::NOT_FOUND, "route {:?}", route);
            assert_eq!(
                envelope.body().unwrap()["error"],
                format!("Route '{}' not found", route)
            );
        }
    }
}

#[test]
fn test_redirect_is_deterministic() {
    for target in ["https://x.com", "/dashboard", ""] {
        let permanent = Envelope::redirect(target, true);
        assert_eq!(permanent.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(permanent.redirect_location(), Some(target));

        let temporary = Envelope::redirect(target, false);
        assert_eq!(temporary.status(), StatusCode::FOUND);
        assert_eq!(temporary.redirect_location(), Some(target));
    }
}

#[test]
fn test_invocations_are_idempotent() {
    let arg = json!({
        "route": "register",
        "body": {"username": "zed", "email": "z@example.com", "extra": {"b": 1, "a": 2}},
        "headers": {"X-Secure-Header": "t"},
    });
    for function in bundled() {
        let first = function.invoke(&arg).unwrap().to_json().unwrap();
        let second = function.invoke(&arg).unwrap().to_json().unwrap();
        assert_eq!(first, second, "function {}", function.name());
    }
}

#[test]
fn test_wire_round_trip_is_recognized() {
    let mut data = Map::new();
    data.insert("n".to_string(), json!(1));
    let envelope = Envelope::success(StatusCode::CREATED, data).with_header("X-A", "b");

    let json = envelope.to_json().unwrap();
    let recognized: Envelope = serde_json::from_str(&json).unwrap();
    assert_eq!(recognized, envelope);
}

#[test]
fn test_data_passing_passthrough() {
    let envelope = DataPassingFunction
        .invoke(&json!({"body": {"event": "ping"}}))
        .unwrap();
    assert_eq!(
        envelope.body(),
        Some(&json!({
            "message": "Processed ping event for Guest",
            "received_data": {"event": "ping"},
        }))
    );
}

#[test]
fn test_secure_headers_reply() {
    let envelope = SecureHeadersFunction.invoke(&json!({"body": {}})).unwrap();
    let reply = HttpReply::from_outcome(Ok(envelope));
    assert_eq!(reply.status, 403);
    assert_eq!(reply.header("content-type"), Some("application/json"));
}

#[test]
fn test_concurrent_invocations_share_nothing() {
    let routing = std::sync::Arc::new(RoutingFunction::new().unwrap());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let routing = routing.clone();
            std::thread::spawn(move || {
                let name = format!("user{}", i);
                let envelope = routing
                    .invoke(&json!({"route": "login", "body": {"username": name}}))
                    .unwrap();
                (name, envelope)
            })
        })
        .collect();

    for handle in handles {
        let (name, envelope) = handle.join().unwrap();
        assert_eq!(
            envelope.body().unwrap()["message"],
            format!("User {} logged in", name)
        );
    }
}
