pub mod convert;
pub mod operation_errors;
pub mod output;
pub mod redact;
pub mod suggest;
