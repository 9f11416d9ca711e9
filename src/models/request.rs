//! Gateway-independent description of an HTTP request handed to the application.

use lambda_runtime::Context;
use serde_json::{Map, Value};

/// Normalized request produced by the decode path.
#[derive(Debug, Clone)]
pub struct InternalRequest {
    pub method: String,
    pub http_version: String,
    /// Header pairs in event order; names are lower-case.
    pub headers: Vec<(String, String)>,
    /// Application-relative path, without query string.
    pub path: String,
    pub root_path: String,
    /// Form-encoded query string, without the leading `?`.
    pub query_string: String,
    pub scheme: String,
    pub server: (String, u16),
    /// Client address. The gateway does not report the port, so it is always `0`.
    pub client: (String, u16),
    pub path_params: Map<String, Value>,
    /// Authorizer context as delivered by the gateway.
    pub user: Value,
    pub body: Vec<u8>,
    pub extension: PlatformExtension,
}

/// Original event and execution context, kept for application-level
/// introspection. Never consulted by the adapter itself.
#[derive(Debug, Clone, Default)]
pub struct PlatformExtension {
    pub event: Value,
    pub context: Context,
}

impl InternalRequest {
    /// Returns the value of a header by lower-case name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
