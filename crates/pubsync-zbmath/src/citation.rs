//! Best-effort DOI → BibTeX citation lookup

use anyhow::{Context, Result, bail};

pub const DEFAULT_RESOLVER_URL: &str = "https://doi.org";

/// Blocking client for DOI content negotiation.
pub struct CitationClient {
    http: reqwest::blocking::Client,
    resolver_url: String,
}

impl CitationClient {
    pub fn new(resolver_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("pubsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self {
            http,
            resolver_url: resolver_url.into(),
        })
    }

    /// Fetch a BibTeX record for a DOI. Any failure downgrades to `None`;
    /// citation files are optional.
    pub fn fetch_bibtex(&self, doi: &str) -> Option<String> {
        let url = self.resolve_url(doi);
        match self.try_fetch(&url) {
            Ok(bibtex) => Some(bibtex),
            Err(e) => {
                log::debug!("citation lookup failed for {doi}: {e:#}");
                None
            }
        }
    }

    /// DOI links arrive either as bare identifiers or as full resolver URLs.
    fn resolve_url(&self, doi: &str) -> String {
        if doi.starts_with("http://") || doi.starts_with("https://") {
            doi.to_string()
        } else {
            format!("{}/{}", self.resolver_url.trim_end_matches('/'), doi)
        }
    }

    fn try_fetch(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/x-bibtex")
            .send()?
            .error_for_status()?;
        let body = response.text()?;
        if !body.trim_start().starts_with('@') {
            bail!("resolver returned non-BibTeX content");
        }
        Ok(body)
    }
}
