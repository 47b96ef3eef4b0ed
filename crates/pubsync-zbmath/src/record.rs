//! zbMATH Open document records (JSON → serde)

use serde::Deserialize;

/// Placeholder text the API returns when a review may not be redistributed.
/// Matched by exact equality when extracting abstracts.
pub const LICENSE_PLACEHOLDER: &str =
    "zbMATH Open Web Interface contents unavailable due to conflicting licenses.";

/// One document from the zbMATH search endpoint.
///
/// Every field tolerates absence; the API omits or nulls fields freely
/// depending on licensing and indexing state.
#[derive(Debug, Deserialize)]
pub struct DocumentRecord {
    /// zbMATH document number
    #[serde(default)]
    pub id: u64,

    /// Provider-side revision datestamp (staleness marker)
    #[serde(default)]
    pub datestamp: Option<String>,

    #[serde(default)]
    pub title: Option<TitleInfo>,

    /// Publication year as the API reports it: a string, possibly empty
    #[serde(default)]
    pub year: Option<String>,

    #[serde(default)]
    pub document_type: Option<DocumentType>,

    #[serde(default)]
    pub contributors: Contributors,

    /// Reviews, summaries and other editorial text attached to the document
    #[serde(default)]
    pub editorial_contributions: Vec<EditorialContribution>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub source: Option<SourceInfo>,

    /// Outbound links, typed (doi, arxiv, ...)
    #[serde(default)]
    pub links: Vec<LinkRecord>,

    /// Canonical record view on zbmath.org
    #[serde(default)]
    pub zbmath_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TitleInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DocumentType {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Contributors {
    #[serde(default)]
    pub authors: Vec<Contributor>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Contributor {
    /// Display name, "Family, Given" form
    #[serde(default)]
    pub name: Option<String>,
    /// zbMATH author codes, primary first
    #[serde(default)]
    pub codes: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct EditorialContribution {
    #[serde(default)]
    pub contribution_type: Option<String>,
    #[serde(default)]
    pub reviewer: Option<Reviewer>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Reviewer {
    #[serde(default)]
    pub reviewer_id: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SourceInfo {
    #[serde(default)]
    pub series: Option<SeriesInfo>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SeriesInfo {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LinkRecord {
    #[serde(rename = "type", default)]
    pub link_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
}

impl DocumentRecord {
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(|t| t.title.as_deref())
    }

    pub fn subtitle_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(|t| t.subtitle.as_deref())
    }

    /// Document type code, e.g. "j" for a journal article
    pub fn type_code(&self) -> Option<&str> {
        self.document_type.as_ref().and_then(|t| t.code.as_deref())
    }

    /// First unattributed summary, skipping the licensing placeholder.
    pub fn abstract_text(&self) -> Option<&str> {
        self.editorial_contributions
            .iter()
            .filter(|c| c.contribution_type.as_deref() == Some("summary"))
            .filter(|c| c.is_unattributed())
            .filter_map(|c| c.text.as_deref())
            .find(|text| *text != LICENSE_PLACEHOLDER)
    }

    pub fn series_title(&self) -> Option<&str> {
        self.source
            .as_ref()
            .and_then(|s| s.series.as_ref())
            .and_then(|s| s.title.as_deref())
    }

    /// URL of the record view on zbmath.org
    pub fn record_url(&self) -> String {
        self.zbmath_url
            .clone()
            .unwrap_or_else(|| format!("https://zbmath.org/{}", self.id))
    }
}

impl EditorialContribution {
    /// True when no reviewer is attributed to this contribution.
    pub fn is_unattributed(&self) -> bool {
        match &self.reviewer {
            None => true,
            Some(r) => matches!(r.reviewer_id, None | Some(serde_json::Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DOCUMENT: &str = r#"{
        "id": 7654321,
        "datestamp": "2023-11-02T10:15:00Z",
        "title": {"title": "On widgets", "subtitle": "A survey"},
        "year": "2023",
        "document_type": {"code": "j", "description": "journal article"},
        "contributors": {
            "authors": [
                {"name": "Smith, Jane", "codes": ["smith.jane"]},
                {"name": "Doe, John", "codes": ["doe.john-b"]}
            ]
        },
        "editorial_contributions": [
            {"contribution_type": "review", "reviewer": {"reviewer_id": 42}, "text": "A review."},
            {"contribution_type": "summary", "reviewer": {"reviewer_id": null}, "text": "Summary text."}
        ],
        "keywords": ["widgets", "surveys"],
        "source": {"series": {"title": "J. Widget Theory"}},
        "links": [
            {"type": "doi", "url": "10.1000/xyz", "identifier": "10.1000/xyz"},
            {"type": "arxiv", "url": "https://arxiv.org/abs/2301.00001", "identifier": "2301.00001"}
        ],
        "zbmath_url": "https://zbmath.org/7654321"
    }"#;

    #[test]
    fn parse_document() {
        let doc: DocumentRecord = serde_json::from_str(SAMPLE_DOCUMENT).unwrap();
        assert_eq!(doc.id, 7654321);
        assert_eq!(doc.title_text(), Some("On widgets"));
        assert_eq!(doc.subtitle_text(), Some("A survey"));
        assert_eq!(doc.type_code(), Some("j"));
        assert_eq!(doc.year.as_deref(), Some("2023"));
        assert_eq!(doc.keywords.len(), 2);
    }

    #[test]
    fn abstract_skips_attributed_reviews() {
        let doc: DocumentRecord = serde_json::from_str(SAMPLE_DOCUMENT).unwrap();
        assert_eq!(doc.abstract_text(), Some("Summary text."));
    }

    #[test]
    fn abstract_skips_license_placeholder() {
        let json = format!(
            r#"{{"id": 1, "editorial_contributions": [
                {{"contribution_type": "summary", "text": "{LICENSE_PLACEHOLDER}"}}
            ]}}"#
        );
        let doc: DocumentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.abstract_text(), None);
    }

    #[test]
    fn abstract_takes_first_match() {
        let json = r#"{"id": 1, "editorial_contributions": [
            {"contribution_type": "summary", "text": "First."},
            {"contribution_type": "summary", "text": "Second."}
        ]}"#;
        let doc: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(doc.abstract_text(), Some("First."));
    }

    #[test]
    fn series_title() {
        let doc: DocumentRecord = serde_json::from_str(SAMPLE_DOCUMENT).unwrap();
        assert_eq!(doc.series_title(), Some("J. Widget Theory"));
    }

    #[test]
    fn record_url_falls_back_to_id() {
        let doc: DocumentRecord = serde_json::from_str(r#"{"id": 99}"#).unwrap();
        assert_eq!(doc.record_url(), "https://zbmath.org/99");
    }

    #[test]
    fn minimal_document() {
        let doc: DocumentRecord = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(doc.title_text().is_none());
        assert!(doc.abstract_text().is_none());
        assert!(doc.contributors.authors.is_empty());
        assert!(doc.links.is_empty());
    }
}
