pub mod credentials;
pub mod parser;
pub mod schema;
pub mod types;

pub use credentials::resolve_credential;
pub use parser::parse_config;
pub use types::*;
