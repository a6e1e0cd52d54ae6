pub mod crossref;
pub mod nvd;
pub mod tables;

pub use crossref::ExploitCrossReferencer;
pub use nvd::NvdClient;
