//! zbMATH Open importer: record types, search query construction, the
//! record → front matter transform, and the bundle writer.

pub mod api;
pub mod citation;
pub mod import;
pub mod query;
pub mod record;
pub mod stats;
pub mod transform;

pub use api::{DEFAULT_BASE_URL, ZbMathClient};
pub use citation::{CitationClient, DEFAULT_RESOLVER_URL};
pub use import::{ImportOptions, ImportOutcome, WriteDecision, import_all, import_document};
pub use query::build_query;
pub use record::DocumentRecord;
pub use stats::RunSummary;
pub use transform::{AuthorDirectory, PublicationFields, transform};
