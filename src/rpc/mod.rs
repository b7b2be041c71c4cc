pub mod envelope;
pub mod protocol;

pub use envelope::{build_request, resolve_endpoint, ResponseFormat, RpcRequest};
pub use protocol::{JsonRpcEnvelope, JsonRpcResponse};
