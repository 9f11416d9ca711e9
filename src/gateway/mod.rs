//! Serverless gateway adapter.
//!
//! [`detect::matches`] decides whether an event belongs to this gateway;
//! [`GatewayAdapter`] translates the event into an [`InternalRequest`] and the
//! application's [`InternalResponse`] back into a [`GatewayResult`].

pub mod decode;
pub mod detect;
pub mod encode;

pub use detect::matches;

use lambda_runtime::Context;
use lambda_runtime::tracing::debug;
use serde_json::{Map, Value};

use crate::config::AdapterConfig;
use crate::models::{
    AdapterError, GatewayEvent, GatewayResult, InternalRequest, InternalResponse,
    PlatformExtension,
};

const HTTP_VERSION: &str = "1.1";

/// Per-invocation adapter. Owns the event and context, borrows the config.
#[derive(Debug)]
pub struct GatewayAdapter<'a> {
    event: Value,
    context: Context,
    config: &'a AdapterConfig,
}

impl<'a> GatewayAdapter<'a> {
    #[must_use]
    pub const fn new(event: Value, context: Context, config: &'a AdapterConfig) -> Self {
        Self {
            event,
            context,
            config,
        }
    }

    /// Whether `event` can be handled by this adapter.
    #[must_use]
    pub fn infer(event: &Value) -> bool {
        matches(event)
    }

    /// Decodes the event into the request handed to the application.
    ///
    /// # Errors
    ///
    /// - `MalformedEvent` if `headers`, `requestContext`, `httpMethod` or the
    ///   original-path header is missing
    /// - `BodyDecode` if a base64 body is invalid
    pub fn build_request(&self) -> Result<InternalRequest, AdapterError> {
        let event = GatewayEvent::from_value(&self.event)?;

        let body = decode::decode_body(
            event.body.as_deref(),
            event.is_base64_encoded.unwrap_or(false),
        )?;
        let headers = decode::normalize_headers(&event, self.config.multi_value_header_policy);
        let path = decode::resolve_path(&headers, &self.config.api_gateway_base_path)?;
        let query_string = decode::query_string(&event);
        let scheme = decode::resolve_scheme(&headers);
        let server = decode::resolve_server(&headers, &scheme);
        let client = (event.source_ip().to_string(), 0);
        let user = event
            .request_context
            .authorizer
            .clone()
            .filter(|authorizer| !authorizer.is_null())
            .unwrap_or_else(|| Value::Object(Map::new()));

        debug!(
            method = %event.http_method,
            path = %path,
            query = %query_string,
            body_len = body.len(),
            "Decoded gateway event"
        );

        Ok(InternalRequest {
            method: event.http_method,
            http_version: HTTP_VERSION.to_string(),
            headers: headers.into_iter().collect(),
            path,
            root_path: String::new(),
            query_string,
            scheme,
            server,
            client,
            path_params: event.path_params.unwrap_or_default(),
            user,
            body,
            extension: PlatformExtension {
                event: self.event.clone(),
                context: self.context.clone(),
            },
        })
    }

    /// Encodes the application's response into the gateway result envelope.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Encoding` if a response header is not UTF-8.
    pub fn build_result(&self, response: InternalResponse) -> Result<GatewayResult, AdapterError> {
        let (headers, multi_value_headers) = encode::fold_headers(&response.headers)?;
        let (body, is_base64_encoded) = encode::encode_body(
            &response.body,
            headers.get("content-type").map(String::as_str),
            &self.config.text_mime_types,
        );

        debug!(
            status = response.status,
            is_base64_encoded,
            body_len = body.len(),
            "Encoded gateway result"
        );

        Ok(GatewayResult {
            status_code: response.status,
            headers,
            multi_value_headers,
            body,
            is_base64_encoded,
        })
    }
}
