use anyhow::Result;
use async_trait::async_trait;
use lambda_runtime::tracing::debug;
use serde_json::json;

use crate::models::{InternalRequest, InternalResponse};

/// Embedded web application the adapter dispatches requests to.
///
/// The adapter treats implementations as a black box: one request in, one
/// complete response out.
#[async_trait]
pub trait Application: Send + Sync {
    /// Handle a single request.
    ///
    /// # Errors
    ///
    /// Any error aborts the invocation; the adapter does not retry.
    async fn call(&self, request: InternalRequest) -> Result<InternalResponse>;
}

/// Minimal application answering `GET /` with a JSON greeting.
#[derive(Debug, Default, Clone, Copy)]
pub struct HelloWorld;

#[async_trait]
impl Application for HelloWorld {
    async fn call(&self, request: InternalRequest) -> Result<InternalResponse> {
        debug!(method = %request.method, path = %request.path, "HelloWorld handling request");

        let response = match (request.method.as_str(), request.path.as_str()) {
            ("GET", "/") => InternalResponse::new(200)
                .with_header("content-type", "application/json")
                .with_body(serde_json::to_vec(&json!({"message": "Hello World"}))?),
            _ => InternalResponse::new(404)
                .with_header("content-type", "application/json")
                .with_body(serde_json::to_vec(&json!({"detail": "Not Found"}))?),
        };
        Ok(response)
    }
}
