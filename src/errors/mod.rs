pub mod types;

pub use types::TrustlensError;
