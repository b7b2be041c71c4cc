mod node_error;
mod remote_error;

pub use node_error::{NodeError, NodeErrorKind};
pub use remote_error::RemoteErrorBody;
