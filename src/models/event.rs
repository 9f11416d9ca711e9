//! Inbound event envelope delivered by the serverless gateway.
//!
//! The gateway sends an API-Gateway-like JSON object. Only `headers`,
//! `requestContext` and `httpMethod` are structurally required; everything
//! else depends on the route configuration and may be absent or `null`.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Header whose presence identifies events coming from this gateway.
pub const GATEWAY_ID_HEADER: &str = "X-Serverless-Gateway-Id";

/// Header carrying the path as the client requested it, before any
/// gateway-internal routing rewrote it.
pub const ORIGINAL_PATH_HEADER: &str = "X-Envoy-Original-Path";

/// Typed, read-only view of a gateway event.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    pub headers: IndexMap<String, String>,
    #[serde(default)]
    pub multi_value_headers: Option<IndexMap<String, Vec<String>>>,
    pub request_context: RequestContext,
    pub http_method: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
    #[serde(default)]
    pub query_string_parameters: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub multi_value_query_string_parameters: Option<IndexMap<String, Vec<String>>>,
    #[serde(default)]
    pub cookies: Option<Vec<String>>,
    #[serde(default, alias = "path_params", alias = "pathParameters")]
    pub path_params: Option<Map<String, Value>>,
}

/// Nested `requestContext` object.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub identity: Option<Identity>,
    /// Authorizer claims; opaque to the adapter.
    #[serde(default)]
    pub authorizer: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub source_ip: Option<String>,
}

impl GatewayEvent {
    /// Parses the typed view out of a raw event.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::MalformedEvent` when `headers`, `requestContext`
    /// or `httpMethod` is missing, or when any present field has the wrong type.
    pub fn from_value(event: &Value) -> Result<Self, super::AdapterError> {
        let Some(object) = event.as_object() else {
            return Err(super::AdapterError::MalformedEvent(
                "event is not a JSON object".to_string(),
            ));
        };
        for key in ["headers", "requestContext"] {
            if object.get(key).is_none_or(Value::is_null) {
                return Err(super::AdapterError::MalformedEvent(format!(
                    "missing required key `{key}`"
                )));
            }
        }
        Ok(Self::deserialize(event)?)
    }

    /// Source IP of the caller, empty when the gateway did not report one.
    #[must_use]
    pub fn source_ip(&self) -> &str {
        self.request_context
            .identity
            .as_ref()
            .and_then(|identity| identity.source_ip.as_deref())
            .unwrap_or_default()
    }
}
