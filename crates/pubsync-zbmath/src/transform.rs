//! Document record → front matter field mapping

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_yaml::Value;

use pubsync_core::FrontMatter;

use crate::record::DocumentRecord;

/// CSL type used for document-type codes without a mapping.
pub const DEFAULT_CSL_TYPE: &str = "manuscript";

/// Front matter key carrying the provider revision datestamp.
pub const PROVENANCE_KEY: &str = "zbmath_date";

/// zbMATH document-type code → CSL publication type.
pub fn csl_type(code: Option<&str>) -> &'static str {
    match code {
        Some("j") => "article-journal",  // journal article
        Some("p") => "article",          // preprint
        Some("a") => "chapter",          // book chapter
        Some("s") => "paper-conference", // conference paper
        _ => DEFAULT_CSL_TYPE,
    }
}

/// Read-only map from zbMATH author code to local author slug.
///
/// Always passed explicitly; the flat-roster variant uses an empty
/// directory, in which case every contributor falls back to their display
/// name.
#[derive(Debug, Clone, Default)]
pub struct AuthorDirectory {
    slugs: BTreeMap<String, String>,
}

impl AuthorDirectory {
    pub fn insert(&mut self, code: impl Into<String>, slug: impl Into<String>) {
        self.slugs.insert(code.into(), slug.into());
    }

    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.slugs.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

impl<C: Into<String>, S: Into<String>> FromIterator<(C, S)> for AuthorDirectory {
    fn from_iter<T: IntoIterator<Item = (C, S)>>(iter: T) -> Self {
        Self {
            slugs: iter
                .into_iter()
                .map(|(c, s)| (c.into(), s.into()))
                .collect(),
        }
    }
}

/// One entry of the generic `links` front matter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub name: String,
    pub url: String,
    pub id: String,
}

/// Normalized field set for one publication, ready to merge into a
/// front matter document.
#[derive(Debug, Clone)]
pub struct PublicationFields {
    pub title: String,
    pub subtitle: String,
    /// `{year}-01-01`; a missing year leaves the placeholder `-01-01`
    pub date: String,
    /// Import wall-clock, RFC 3339
    pub publish_date: String,
    pub authors: Vec<String>,
    pub publication_type: &'static str,
    pub abstract_text: String,
    pub featured: bool,
    /// Series title in emphasis markup, or empty
    pub venue: String,
    pub tags: Vec<String>,
    pub links: Vec<PageLink>,
    pub doi: Option<String>,
    /// Provider revision datestamp, stored for staleness comparison
    pub datestamp: String,
}

/// Map one raw record into its front matter field set.
///
/// `now` is the import wall-clock, injected so runs are reproducible under
/// test. A missing or empty year is a data-quality error, reported but
/// non-fatal.
pub fn transform(
    record: &DocumentRecord,
    authors: &AuthorDirectory,
    featured: bool,
    now: DateTime<Utc>,
) -> PublicationFields {
    let year = record.year.clone().unwrap_or_default();
    if year.is_empty() {
        log::error!("invalid year for document {}", record.id);
    }

    let resolved_authors = record
        .contributors
        .authors
        .iter()
        .filter_map(|contributor| {
            let slug = contributor
                .codes
                .first()
                .and_then(|code| authors.resolve(code));
            match (slug, &contributor.name) {
                (Some(slug), _) => Some(slug.to_string()),
                (None, Some(name)) => Some(name.clone()),
                (None, None) => {
                    log::debug!("document {}: contributor without name or code", record.id);
                    None
                }
            }
        })
        .collect();

    let mut links = vec![PageLink {
        name: "zbmath".to_string(),
        url: record.record_url(),
        id: record.id.to_string(),
    }];
    let mut doi = None;
    for link in &record.links {
        let Some(url) = &link.url else { continue };
        match link.link_type.as_deref() {
            Some("doi") => doi = Some(url.clone()),
            link_type => links.push(PageLink {
                name: link_type.unwrap_or("link").to_string(),
                url: url.clone(),
                id: link.identifier.clone().unwrap_or_default(),
            }),
        }
    }

    PublicationFields {
        title: record.title_text().unwrap_or_default().to_string(),
        subtitle: record.subtitle_text().unwrap_or_default().to_string(),
        date: format!("{year}-01-01"),
        publish_date: now.to_rfc3339_opts(SecondsFormat::Micros, false),
        authors: resolved_authors,
        publication_type: csl_type(record.type_code()),
        abstract_text: record.abstract_text().unwrap_or_default().to_string(),
        featured,
        venue: record
            .series_title()
            .map(|t| format!("*{t}*"))
            .unwrap_or_default(),
        tags: record.keywords.clone(),
        links,
        doi,
        datestamp: record.datestamp.clone().unwrap_or_default(),
    }
}

impl PublicationFields {
    /// Merge every field into the page. Existing keys are replaced; keys
    /// this importer does not own are left untouched.
    pub fn apply(&self, page: &mut FrontMatter) -> Result<()> {
        page.set(PROVENANCE_KEY, Value::String(self.datestamp.clone()));
        page.set("title", Value::String(self.title.clone()));
        page.set("subtitle", Value::String(self.subtitle.clone()));
        page.set("date", Value::String(self.date.clone()));
        page.set("publishDate", Value::String(self.publish_date.clone()));
        page.set("authors", string_sequence(&self.authors));
        page.set(
            "publication_types",
            Value::Sequence(vec![Value::String(self.publication_type.to_string())]),
        );
        page.set("abstract", Value::String(self.abstract_text.clone()));
        page.set("featured", Value::Bool(self.featured));
        page.set("publication", Value::String(self.venue.clone()));
        page.set("tags", string_sequence(&self.tags));
        page.set(
            "links",
            serde_yaml::to_value(&self.links).context("cannot serialize links")?,
        );
        if let Some(doi) = &self.doi {
            page.set("doi", Value::String(doi.clone()));
        }
        Ok(())
    }
}

fn string_sequence(items: &[String]) -> Value {
    Value::Sequence(items.iter().map(|s| Value::String(s.clone())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn sample() -> DocumentRecord {
        serde_json::from_str(
            r#"{
                "id": 7654321,
                "datestamp": "2023-11-02T10:15:00Z",
                "title": {"title": "On widgets", "subtitle": "A survey"},
                "year": "2023",
                "document_type": {"code": "j"},
                "contributors": {"authors": [
                    {"name": "Smith, Jane", "codes": ["smith.jane"]},
                    {"name": "Doe, John", "codes": ["doe.john-b"]}
                ]},
                "editorial_contributions": [
                    {"contribution_type": "summary", "text": "Summary text."}
                ],
                "keywords": ["widgets"],
                "source": {"series": {"title": "J. Widget Theory"}},
                "links": [
                    {"type": "doi", "url": "10.1000/xyz", "identifier": "10.1000/xyz"},
                    {"type": "arxiv", "url": "https://arxiv.org/abs/2301.00001", "identifier": "2301.00001"}
                ],
                "zbmath_url": "https://zbmath.org/7654321"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn maps_known_type_codes() {
        assert_eq!(csl_type(Some("j")), "article-journal");
        assert_eq!(csl_type(Some("p")), "article");
        assert_eq!(csl_type(Some("a")), "chapter");
        assert_eq!(csl_type(Some("s")), "paper-conference");
    }

    #[test]
    fn unmapped_type_codes_default_to_manuscript() {
        assert_eq!(csl_type(Some("x")), "manuscript");
        assert_eq!(csl_type(None), "manuscript");
    }

    #[test]
    fn resolves_directory_authors_and_falls_back_to_names() {
        let directory: AuthorDirectory = [("smith.jane", "jsmith")].into_iter().collect();
        let fields = transform(&sample(), &directory, false, now());
        assert_eq!(fields.authors, vec!["jsmith", "Doe, John"]);
    }

    #[test]
    fn empty_directory_uses_display_names() {
        let fields = transform(&sample(), &AuthorDirectory::default(), false, now());
        assert_eq!(fields.authors, vec!["Smith, Jane", "Doe, John"]);
    }

    #[test]
    fn date_from_year() {
        let fields = transform(&sample(), &AuthorDirectory::default(), false, now());
        assert_eq!(fields.date, "2023-01-01");
    }

    #[test]
    fn missing_year_leaves_placeholder() {
        let record: DocumentRecord = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        let fields = transform(&record, &AuthorDirectory::default(), false, now());
        assert_eq!(fields.date, "-01-01");
    }

    #[test]
    fn publish_date_is_rfc3339_utc() {
        let fields = transform(&sample(), &AuthorDirectory::default(), false, now());
        assert_eq!(fields.publish_date, "2024-06-15T12:00:00.000000+00:00");
    }

    #[test]
    fn doi_routed_to_dedicated_field() {
        let fields = transform(&sample(), &AuthorDirectory::default(), false, now());
        assert_eq!(fields.doi.as_deref(), Some("10.1000/xyz"));
        // doi link is not duplicated into the generic list
        assert!(fields.links.iter().all(|l| l.name != "doi"));
    }

    #[test]
    fn links_start_with_self_link() {
        let fields = transform(&sample(), &AuthorDirectory::default(), false, now());
        assert_eq!(
            fields.links[0],
            PageLink {
                name: "zbmath".to_string(),
                url: "https://zbmath.org/7654321".to_string(),
                id: "7654321".to_string(),
            }
        );
        assert_eq!(fields.links[1].name, "arxiv");
        assert_eq!(fields.links[1].id, "2301.00001");
    }

    #[test]
    fn venue_wrapped_in_emphasis() {
        let fields = transform(&sample(), &AuthorDirectory::default(), false, now());
        assert_eq!(fields.venue, "*J. Widget Theory*");

        let bare: DocumentRecord = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        let fields = transform(&bare, &AuthorDirectory::default(), false, now());
        assert_eq!(fields.venue, "");
    }

    #[test]
    fn apply_merges_into_template() {
        let mut page = FrontMatter::parse(pubsync_core::PUBLICATION_TEMPLATE).unwrap();
        let fields = transform(&sample(), &AuthorDirectory::default(), true, now());
        fields.apply(&mut page).unwrap();

        assert_eq!(page.get_str("title"), Some("On widgets"));
        assert_eq!(page.get_str("date"), Some("2023-01-01"));
        assert_eq!(page.get_str(PROVENANCE_KEY), Some("2023-11-02T10:15:00Z"));
        assert_eq!(page.get_str("doi"), Some("10.1000/xyz"));
        assert_eq!(page.get("featured"), Some(&Value::Bool(true)));
        let types = page.get("publication_types").unwrap().as_sequence().unwrap();
        assert_eq!(types[0].as_str(), Some("article-journal"));
        // template keys the importer does not own survive the merge
        assert!(page.contains("draft"));
    }
}
