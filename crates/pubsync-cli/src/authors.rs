//! Author roster loading
//!
//! Two sources feed the roster: a flat YAML file listing zbMATH author
//! codes, or a directory of per-author profile bundles whose front matter
//! declares `zbmath_ids`. Only the second source can map codes back to
//! local author slugs.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use pubsync_core::FrontMatter;
use pubsync_zbmath::AuthorDirectory;

/// The resolved author roster for one run.
#[derive(Debug, Default)]
pub struct AuthorRoster {
    /// zbMATH author codes to query for
    pub codes: Vec<String>,
    /// code → local slug mapping (empty for the flat-file variant)
    pub directory: AuthorDirectory,
}

#[derive(Deserialize)]
struct RosterFile {
    #[serde(default)]
    authors: Vec<String>,
}

impl AuthorRoster {
    /// Load the flat variant: `authors: [code, ...]` in one YAML file.
    pub fn from_config(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read author list {}", path.display()))?;
        let roster: RosterFile = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse author list {}", path.display()))?;
        Ok(Self {
            codes: roster.authors,
            directory: AuthorDirectory::default(),
        })
    }

    /// Load the profile-directory variant: each `<slug>/_index.md` may carry
    /// a `zbmath_ids` list in its front matter.
    ///
    /// Profiles without ids, or with unreadable front matter, are skipped;
    /// an author with no zbMATH presence is not an error.
    pub fn from_profiles(dir: &Path) -> Result<Self> {
        let mut entries: Vec<_> = std::fs::read_dir(dir)
            .with_context(|| format!("cannot read author directory {}", dir.display()))?
            .collect::<std::io::Result<_>>()
            .with_context(|| format!("cannot read author directory {}", dir.display()))?;
        entries.sort_by_key(|e| e.file_name());

        let mut roster = Self::default();
        for entry in entries {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let slug = entry.file_name().to_string_lossy().into_owned();
            let Some(profile) = profile_document(&path) else {
                continue;
            };
            let page = match FrontMatter::load(&profile) {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("skipping author profile {}: {e:#}", profile.display());
                    continue;
                }
            };
            for code in profile_ids(&page) {
                roster.directory.insert(code.clone(), slug.clone());
                roster.codes.push(code);
            }
        }
        Ok(roster)
    }
}

/// The profile document inside one author bundle, if present.
fn profile_document(author_dir: &Path) -> Option<std::path::PathBuf> {
    ["_index.md", "index.md"]
        .iter()
        .map(|name| author_dir.join(name))
        .find(|p| p.exists())
}

/// `zbmath_ids` entries, accepting both string and numeric scalars.
fn profile_ids(page: &FrontMatter) -> Vec<String> {
    page.get("zbmath_ids")
        .and_then(|v| v.as_sequence())
        .map(|seq| {
            seq.iter()
                .filter_map(|v| match v {
                    serde_yaml::Value::String(s) => Some(s.clone()),
                    serde_yaml::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}
