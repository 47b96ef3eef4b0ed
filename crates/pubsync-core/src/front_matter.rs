//! YAML front matter documents for markdown page bundles
//!
//! A [`FrontMatter`] is the in-memory form of one `index.md`: an ordered
//! YAML mapping plus the markdown body. Documents are loaded, mutated in
//! memory, and written back wholesale; there is no partial-field patching.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_yaml::{Mapping, Value};

/// One markdown document with a YAML front matter header.
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    yaml: Mapping,
    body: String,
}

impl FrontMatter {
    /// Parse a document whose content starts with a `---` fenced YAML header.
    pub fn parse(content: &str) -> Result<Self> {
        let (yaml_str, body) = split(content)?;
        let yaml: Mapping =
            serde_yaml::from_str(yaml_str).context("invalid YAML in front matter")?;
        Ok(Self {
            yaml,
            body: body.to_string(),
        })
    }

    /// Load a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Look up a front matter value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.yaml
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Look up a string-valued key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a key, replacing any existing value. Insertion order of new keys
    /// is preserved on output.
    pub fn set(&mut self, key: &str, value: Value) {
        self.yaml.insert(Value::String(key.to_string()), value);
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Serialize back to fenced-markdown form.
    ///
    /// With `compact`, keys holding null or empty values are dropped from
    /// the header instead of being written out.
    pub fn to_document(&self, compact: bool) -> Result<String> {
        let yaml = if compact {
            let filtered: Mapping = self
                .yaml
                .iter()
                .filter(|(_, v)| !is_empty_value(v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            serde_yaml::to_string(&filtered)
        } else {
            serde_yaml::to_string(&self.yaml)
        }
        .context("cannot serialize front matter")?;
        Ok(format!("---\n{yaml}---\n{}", self.body))
    }

    /// Write the whole document to disk.
    pub fn write(&self, path: &Path, compact: bool) -> Result<()> {
        let content = self.to_document(compact)?;
        std::fs::write(path, content).with_context(|| format!("cannot write {}", path.display()))
    }
}

/// Split raw content into the YAML header and the markdown body.
fn split(content: &str) -> Result<(&str, &str)> {
    let stripped = content.trim_start_matches('\u{feff}');
    let Some(rest) = stripped.strip_prefix("---") else {
        bail!("missing front matter delimiter (---)");
    };
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .context("missing newline after front matter start")?;

    let Some(idx) = rest.find("\n---") else {
        bail!("missing closing front matter delimiter (---)");
    };
    let yaml = &rest[..idx + 1];
    let after = &rest[idx + 4..];
    let body = after
        .strip_prefix('\n')
        .or_else(|| after.strip_prefix("\r\n"))
        .unwrap_or(after);
    Ok((yaml, body))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Sequence(s) => s.is_empty(),
        Value::Mapping(m) => m.is_empty(),
        _ => false,
    }
}
