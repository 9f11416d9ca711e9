pub mod error;
pub mod event;
pub mod request;
pub mod response;

pub use error::AdapterError;
pub use event::{GATEWAY_ID_HEADER, GatewayEvent, ORIGINAL_PATH_HEADER, RequestContext};
pub use request::{InternalRequest, PlatformExtension};
pub use response::{GatewayResult, InternalResponse};
