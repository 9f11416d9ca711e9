// Integration tests for the full request flow
// These tests drive the handler end to end with the sample application
#![allow(clippy::unwrap_used)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambda_runtime::{Context, LambdaEvent};
use serde_json::{Value, json};
use serverless_gateway_adapter::app::HelloWorld;
use serverless_gateway_adapter::config::{AdapterConfig, MultiValueHeaderPolicy};
use serverless_gateway_adapter::gateway::{GatewayAdapter, matches};
use serverless_gateway_adapter::handler::function_handler;
use serverless_gateway_adapter::models::InternalResponse;

#[tokio::test]
async fn test_hello_world_flow() {
    let event = create_test_lambda_event(gateway_event("GET", "/"));

    let result = function_handler(&HelloWorld, &AdapterConfig::default(), event)
        .await
        .unwrap();

    assert_eq!(result["statusCode"], 200);
    assert_eq!(result["isBase64Encoded"], false);
    assert_eq!(result["headers"]["content-type"], "application/json");
    let body: Value = serde_json::from_str(result["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({"message": "Hello World"}));
}

#[tokio::test]
async fn test_hello_world_behind_base_path() {
    let config = AdapterConfig::default().with_base_path("/api");
    let event = create_test_lambda_event(gateway_event("GET", "/api"));

    let result = function_handler(&HelloWorld, &config, event).await.unwrap();
    assert_eq!(result["statusCode"], 200);
}

#[tokio::test]
async fn test_unknown_route_flow() {
    let event = create_test_lambda_event(gateway_event("GET", "/missing"));

    let result = function_handler(&HelloWorld, &AdapterConfig::default(), event)
        .await
        .unwrap();
    assert_eq!(result["statusCode"], 404);
}

#[tokio::test]
async fn test_concurrent_invocations() {
    let config = AdapterConfig::default();

    let invocations = (0..10).map(|i| {
        let path = if i % 2 == 0 { "/" } else { "/nope" };
        function_handler(
            &HelloWorld,
            &config,
            create_test_lambda_event(gateway_event("GET", path)),
        )
    });
    let results = futures::future::join_all(invocations).await;

    for (i, result) in results.into_iter().enumerate() {
        let expected = if i % 2 == 0 { 200 } else { 404 };
        assert_eq!(result.unwrap()["statusCode"], expected);
    }
}

#[test]
fn test_detection() {
    assert!(matches(&gateway_event("GET", "/")));
    assert!(!matches(&json!({"headers": {}, "requestContext": {}})));
    assert!(!matches(&json!({
        "headers": {"X-Serverless-Gateway-Id": "d5dabc"}
    })));
    assert!(!matches(&json!({"requestContext": {}})));
}

#[test]
fn test_body_round_trip() {
    let config = AdapterConfig::default();
    let bodies: [&[u8]; 4] = [b"", b"plain text", b"\x00\x01\xfe\xff", "héllo".as_bytes()];

    for body in bodies {
        let mut event = gateway_event("POST", "/");
        event["body"] = json!(STANDARD.encode(body));
        event["isBase64Encoded"] = json!(true);
        let request = GatewayAdapter::new(event, Context::default(), &config)
            .build_request()
            .unwrap();
        assert_eq!(request.body, body);

        if let Ok(text) = std::str::from_utf8(body) {
            let mut event = gateway_event("POST", "/");
            event["body"] = json!(text);
            event["isBase64Encoded"] = json!(false);
            let request = GatewayAdapter::new(event, Context::default(), &config)
                .build_request()
                .unwrap();
            assert_eq!(request.body, body);
        }
    }
}

#[test]
fn test_repeated_response_headers() {
    let config = AdapterConfig::default();
    let adapter = GatewayAdapter::new(gateway_event("GET", "/"), Context::default(), &config);

    let result = adapter
        .build_result(
            InternalResponse::new(200)
                .with_header("Set-Cookie", "first=1")
                .with_header("Set-Cookie", "second=2"),
        )
        .unwrap();

    assert_eq!(result.multi_value_headers["set-cookie"], ["first=1", "second=2"]);
    assert_eq!(result.headers["set-cookie"], "second=2");
}

#[test]
fn test_path_stripping() {
    let config = AdapterConfig::default().with_base_path("/api");

    let request = GatewayAdapter::new(
        gateway_event("GET", "/api/users/5"),
        Context::default(),
        &config,
    )
    .build_request()
    .unwrap();
    assert_eq!(request.path, "/users/5");

    let request = GatewayAdapter::new(
        gateway_event("GET", "/other/users/5"),
        Context::default(),
        &config,
    )
    .build_request()
    .unwrap();
    assert_eq!(request.path, "/other/users/5");
}

#[test]
fn test_text_and_binary_bodies() {
    let config = AdapterConfig::default();
    let adapter = GatewayAdapter::new(gateway_event("GET", "/"), Context::default(), &config);

    let json_result = adapter
        .build_result(
            InternalResponse::new(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"a":1}"#),
        )
        .unwrap();
    assert!(!json_result.is_base64_encoded);
    assert_eq!(json_result.body, r#"{"a":1}"#);

    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let png_result = adapter
        .build_result(
            InternalResponse::new(200)
                .with_header("content-type", "image/png")
                .with_body(png.to_vec()),
        )
        .unwrap();
    assert!(png_result.is_base64_encoded);
    assert_eq!(STANDARD.decode(&png_result.body).unwrap(), png);
}

#[test]
fn test_cookie_union() {
    let config = AdapterConfig::default();
    let mut event = gateway_event("GET", "/");
    event["headers"]["cookie"] = json!("a=1");
    event["cookies"] = json!(["b=2", "c=3"]);

    let request = GatewayAdapter::new(event, Context::default(), &config)
        .build_request()
        .unwrap();

    let cookies: Vec<&str> = request
        .headers
        .iter()
        .filter(|(name, _)| name == "cookie")
        .map(|(_, value)| value.as_str())
        .collect();
    assert_eq!(cookies, ["a=1; b=2; c=3"]);
}

#[test]
fn test_missing_query_parameters() {
    let config = AdapterConfig::default();
    let request = GatewayAdapter::new(gateway_event("GET", "/"), Context::default(), &config)
        .build_request()
        .unwrap();
    assert_eq!(request.query_string, "");
}

#[test]
fn test_header_names_lowercased_once_and_policy_applied() {
    let config = AdapterConfig::default().with_multi_value_header_policy(MultiValueHeaderPolicy::Last);
    let mut event = gateway_event("GET", "/");
    event["multiValueHeaders"] = json!({"X-Forwarded-For": ["10.0.0.1", "10.0.0.2"]});
    event["headers"]["X-Forwarded-For"] = json!("10.0.0.2");

    let request = GatewayAdapter::new(event, Context::default(), &config)
        .build_request()
        .unwrap();

    assert!(request
        .headers
        .iter()
        .all(|(name, _)| *name == name.to_ascii_lowercase()));
    assert_eq!(
        request
            .headers
            .iter()
            .filter(|(name, _)| name == "x-forwarded-for")
            .count(),
        1
    );
    assert_eq!(request.header("x-forwarded-for"), Some("10.0.0.2"));
}

#[test]
fn test_identity_and_server() {
    let config = AdapterConfig::default();
    let mut event = gateway_event("GET", "/");
    event["headers"]["Host"] = json!("api.example.com:8443");
    event["headers"]["X-Forwarded-Proto"] = json!("http");

    let request = GatewayAdapter::new(event, Context::default(), &config)
        .build_request()
        .unwrap();

    assert_eq!(request.scheme, "http");
    assert_eq!(request.server, ("api.example.com".to_string(), 8443));
    assert_eq!(request.client, ("192.0.2.10".to_string(), 0));
}

fn gateway_event(method: &str, path: &str) -> Value {
    json!({
        "httpMethod": method,
        "headers": {
            "Host": "d5d.apigw.yandexcloud.net",
            "X-Serverless-Gateway-Id": "d5dabc",
            "X-Envoy-Original-Path": path
        },
        "requestContext": {
            "identity": {"sourceIp": "192.0.2.10"}
        }
    })
}

/// Helper function to create a test Lambda event
fn create_test_lambda_event(payload: Value) -> LambdaEvent<Value> {
    LambdaEvent {
        payload,
        context: Context::default(),
    }
}
