//! Seed template for new publication bundles

/// Markdown document a freshly created bundle starts from. The importer
/// fills the front matter in; the body is left for hand-written notes.
pub const PUBLICATION_TEMPLATE: &str = include_str!("../templates/publication.md");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrontMatter;

    #[test]
    fn template_parses() {
        let fm = FrontMatter::parse(PUBLICATION_TEMPLATE).unwrap();
        assert!(fm.contains("title"));
        assert!(fm.contains("publication_types"));
        assert!(fm.contains("draft"));
    }
}
