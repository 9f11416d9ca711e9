//! Application response and the gateway result envelope it is encoded into.

use indexmap::IndexMap;
use serde::Serialize;

/// Response returned by the embedded application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternalResponse {
    pub status: u16,
    /// Raw header pairs; names may repeat.
    pub headers: Vec<(Vec<u8>, Vec<u8>)>,
    pub body: Vec<u8>,
}

impl InternalResponse {
    #[must_use]
    pub const fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// JSON envelope the gateway expects back from the function.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResult {
    pub status_code: u16,
    pub headers: IndexMap<String, String>,
    pub multi_value_headers: IndexMap<String, Vec<String>>,
    pub body: String,
    pub is_base64_encoded: bool,
}
