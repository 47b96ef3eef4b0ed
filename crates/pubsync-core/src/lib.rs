//! Shared building blocks for publication bundle importers

pub mod front_matter;
pub mod logging;
pub mod template;

pub use front_matter::FrontMatter;
pub use logging::init_logging;
pub use template::PUBLICATION_TEMPLATE;
