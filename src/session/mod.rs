mod config;
mod filter;
mod session;

pub use config::{SessionConfig, DEFAULT_API_VERSION};
pub use filter::Filter;
pub use session::{Method, VmStore, CREDENTIALS_TYPE_ID, SESSION_COOKIE};
