use serde_json::Value;

use crate::models::GATEWAY_ID_HEADER;

/// Returns `true` if `event` was produced by the serverless gateway.
///
/// The event must carry the exact `X-Serverless-Gateway-Id` header key and a
/// `requestContext` key. Missing or non-object `headers` is a non-match, never
/// an error.
#[must_use]
pub fn matches(event: &Value) -> bool {
    event
        .get("headers")
        .and_then(Value::as_object)
        .is_some_and(|headers| headers.contains_key(GATEWAY_ID_HEADER))
        && event.get("requestContext").is_some()
}
