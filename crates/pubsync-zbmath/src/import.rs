//! Bundle creation and the overwrite decision

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use pubsync_core::{FrontMatter, PUBLICATION_TEMPLATE};

use crate::citation::CitationClient;
use crate::record::DocumentRecord;
use crate::stats::RunSummary;
use crate::transform::{self, AuthorDirectory, PROVENANCE_KEY, PublicationFields};

/// Options shared by every record of one run.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Root directory for publication bundles
    pub pub_dir: PathBuf,
    pub featured: bool,
    /// Rewrite bundles even when the revision datestamp is unchanged
    pub overwrite: bool,
    /// Drop empty front matter fields on write
    pub compact: bool,
    /// Log every decision without touching the filesystem
    pub dry_run: bool,
}

/// What the writer decided to do with one bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// No bundle on disk yet
    Create,
    /// Bundle exists but is stale (or rewrite was forced)
    Refresh,
    /// Bundle exists and is current
    Skip,
}

/// Result of importing one record.
#[derive(Debug, Clone, Copy)]
pub struct ImportOutcome {
    pub decision: WriteDecision,
    /// A citation file was produced for this bundle
    pub citation: bool,
}

/// Decide between create, refresh and skip for one bundle.
///
/// An existing bundle is refreshed when the caller forces it, when the
/// stored revision datestamp differs from the incoming one, or when the
/// stored publication type differs from the freshly computed one.
pub fn decide(
    existing: Option<&FrontMatter>,
    fields: &PublicationFields,
    force: bool,
) -> WriteDecision {
    let Some(page) = existing else {
        return WriteDecision::Create;
    };
    if force {
        return WriteDecision::Refresh;
    }

    let revision_changed = page.get_str(PROVENANCE_KEY) != Some(fields.datestamp.as_str());
    let stored_type = page
        .get("publication_types")
        .and_then(|v| v.as_sequence())
        .and_then(|s| s.first())
        .and_then(|v| v.as_str());
    let type_changed = stored_type != Some(fields.publication_type);

    if revision_changed || type_changed {
        WriteDecision::Refresh
    } else {
        WriteDecision::Skip
    }
}

/// Import one record into its bundle under `opts.pub_dir`.
pub fn import_document(
    record: &DocumentRecord,
    authors: &AuthorDirectory,
    citations: &CitationClient,
    opts: &ImportOptions,
    now: DateTime<Utc>,
) -> Result<ImportOutcome> {
    log::info!("importing document {}", record.id);

    let bundle_path = opts.pub_dir.join(record.id.to_string());
    let markdown_path = bundle_path.join("index.md");

    let fields = transform::transform(record, authors, opts.featured, now);

    let existing = if markdown_path.exists() {
        Some(FrontMatter::load(&markdown_path)?)
    } else {
        None
    };

    let decision = decide(existing.as_ref(), &fields, opts.overwrite);
    let mut page = match decision {
        WriteDecision::Skip => {
            log::warn!(
                "skipping {}: bundle exists and is unchanged; pass --overwrite to force a rewrite",
                bundle_path.display()
            );
            return Ok(ImportOutcome {
                decision,
                citation: false,
            });
        }
        WriteDecision::Create => {
            log::info!("creating bundle {}", bundle_path.display());
            if !opts.dry_run {
                std::fs::create_dir_all(&bundle_path)
                    .with_context(|| format!("cannot create {}", bundle_path.display()))?;
            }
            FrontMatter::parse(PUBLICATION_TEMPLATE).context("invalid bundle template")?
        }
        // Refresh reuses the on-disk document so hand-edited keys survive.
        WriteDecision::Refresh => existing.unwrap_or_default(),
    };

    fields.apply(&mut page)?;

    log::info!("writing {}", markdown_path.display());
    if !opts.dry_run {
        page.write(&markdown_path, opts.compact)?;
    }

    let citation = save_citation(record, citations, &bundle_path, opts.dry_run);
    Ok(ImportOutcome { decision, citation })
}

/// Try to produce at most one `cite.bib` for the bundle.
fn save_citation(
    record: &DocumentRecord,
    citations: &CitationClient,
    bundle_path: &Path,
    dry_run: bool,
) -> bool {
    for link in &record.links {
        match link.link_type.as_deref() {
            Some("doi") => {
                let Some(doi) = &link.url else { continue };
                let Some(bibtex) = citations.fetch_bibtex(doi) else {
                    continue;
                };
                let cite_path = bundle_path.join("cite.bib");
                log::info!("saving citation to {}", cite_path.display());
                if !dry_run {
                    if let Err(e) = std::fs::write(&cite_path, bibtex) {
                        log::error!("could not save {}: {e}", cite_path.display());
                        return false;
                    }
                }
                return true;
            }
            // arXiv asks automated tools not to crawl its pages; those
            // links are left alone on purpose.
            Some("arxiv") => {}
            _ => {}
        }
    }
    false
}

/// One pass over the search results. Per-record failures are logged and
/// counted; they never abort the run.
pub fn import_all(
    records: &[DocumentRecord],
    authors: &AuthorDirectory,
    citations: &CitationClient,
    opts: &ImportOptions,
    now: DateTime<Utc>,
) -> RunSummary {
    let mut summary = RunSummary::default();
    for record in records {
        match import_document(record, authors, citations, opts, now) {
            Ok(outcome) => summary.record(outcome),
            Err(e) => {
                log::error!("document {}: {e:#}", record.id);
                summary.failed += 1;
            }
        }
    }
    summary
}
