use lambda_runtime::tracing::{debug, error, info};
use lambda_runtime::{Diagnostic, LambdaEvent};
use serde_json::Value;

use crate::app::Application;
use crate::config::AdapterConfig;
use crate::gateway::GatewayAdapter;
use crate::models::AdapterError;

fn adapter_diagnostic(error: &AdapterError) -> Diagnostic {
    error!(error_type = error.error_type(), error = %error, "Gateway adapter failed");
    Diagnostic {
        error_type: error.error_type().to_string(),
        error_message: error.to_string(),
    }
}

/// Lambda event handler. Decodes the gateway event, dispatches it to `app`
/// and encodes the response back into the gateway's result envelope.
/// Logs the full event when `RUST_LOG=debug/trace`, only `event_size` otherwise.
///
/// # Errors
///
/// Returns a `Diagnostic` error with one of the following types:
///
/// - `UnsupportedEvent`: The event does not come from the serverless gateway
/// - `MalformedEvent`: A required part of the event is missing or mistyped
/// - `BodyDecodeError`: The request body is not valid base64
/// - `ApplicationError`: The application failed to produce a response
/// - `EncodingError`: A response header is not valid UTF-8
/// - `SerializationError`: The result could not be serialized to JSON
pub async fn function_handler<A>(
    app: &A,
    config: &AdapterConfig,
    event: LambdaEvent<Value>,
) -> Result<Value, Diagnostic>
where
    A: Application + ?Sized,
{
    let (event_payload, context) = event.into_parts();
    debug!(payload = ?event_payload, "Received event");
    info!(
        request_id = %context.request_id,
        event_size = event_payload.to_string().len(),
        "Invocation started"
    );

    if !GatewayAdapter::infer(&event_payload) {
        error!("Event does not match the serverless gateway shape");
        return Err(Diagnostic {
            error_type: "UnsupportedEvent".to_string(),
            error_message: "Event is not a serverless gateway event".to_string(),
        });
    }

    let adapter = GatewayAdapter::new(event_payload, context, config);
    let request = adapter.build_request().map_err(|e| adapter_diagnostic(&e))?;

    info!(
        message = format!("Dispatching {} {}", request.method, request.path)
    );

    let response = app.call(request).await.map_err(|e| {
        // Use {:#} to get the full error chain with causes
        error!(error = %format!("{e:#}"), "Application failed");
        Diagnostic {
            error_type: "ApplicationError".to_string(),
            error_message: format!("{e:#}"),
        }
    })?;

    let result = adapter
        .build_result(response)
        .map_err(|e| adapter_diagnostic(&e))?;
    info!(status = result.status_code, "Invocation finished");

    serde_json::to_value(result).map_err(|e| {
        error!(error = %e, "Failed to serialize result");
        Diagnostic {
            error_type: "SerializationError".to_string(),
            error_message: format!("Failed to serialize result: {e}"),
        }
    })
}
