use lambda_runtime::{Error, service_fn};
use serverless_gateway_adapter::app::HelloWorld;
use serverless_gateway_adapter::config::AdapterConfig;
use serverless_gateway_adapter::handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    let config = AdapterConfig::from_env()?;
    lambda_runtime::tracing::info!(
        base_path = %config.api_gateway_base_path,
        text_mime_types = ?config.text_mime_types,
        "Loaded adapter configuration"
    );

    let app = HelloWorld;
    let (app, config) = (&app, &config);
    lambda_runtime::run(service_fn(move |event| async move {
        function_handler(app, config, event).await
    }))
    .await
}
