pub mod app;
pub mod constants;
pub mod errors;
pub mod managers;
pub mod rpc;
pub mod schema;
pub mod services;
pub mod utils;
