//! zbMATH Open API client (blocking)

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::query;
use crate::record::DocumentRecord;

pub const DEFAULT_BASE_URL: &str = "https://api.zbmath.org/v1/";

/// Blocking client for the document search endpoint.
pub struct ZbMathClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<DocumentRecord>,
}

impl ZbMathClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("pubsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Run one search and return the record list.
    ///
    /// A transport failure or a non-2xx response is fatal for the run; the
    /// error carries the response body and the query for diagnosis.
    pub fn search(&self, query: &str) -> Result<Vec<DocumentRecord>> {
        let url = query::search_url(&self.base_url, query);
        log::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("search request failed for query `{query}`"))?;
        let status = response.status();
        let body = response.text().context("cannot read search response")?;

        if !status.is_success() {
            bail!("search returned {status} for query `{query}`: {body}");
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).context("invalid search response JSON")?;
        Ok(parsed.result)
    }
}
