pub mod keywords;
pub mod mitre;
pub mod owasp;
pub mod resolver;

pub use keywords::KeywordTable;
pub use mitre::{CweCatalog, CweDetails};
pub use owasp::risk_category_for;
pub use resolver::{ClassificationResolver, StructuredMetadata};
