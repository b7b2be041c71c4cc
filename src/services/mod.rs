pub mod context;
pub mod credentials;
pub mod logger;
pub mod normalizer;
pub mod session;
pub mod transport;
pub mod validation;
