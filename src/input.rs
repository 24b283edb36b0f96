//! Input parsing: an INI file describing the portal URL and the field
//! values to enter. The whole plan is loaded and validated before any
//! browser work starts, so a bad file never opens a session.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Selector for the submit control when the input file does not name one.
pub const DEFAULT_SUBMIT_SELECTOR: &str = "button[type='submit']";

/// One configured form field: the input-file key, the value to enter, and
/// the CSS selector locating the element on the portal page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    pub value: String,
    pub selector: String,
}

impl FieldEntry {
    /// Selector derived from a field name: matches the element's `name`
    /// attribute or its id.
    pub fn default_selector(name: &str) -> String {
        format!("[name=\"{name}\"], #{name}")
    }
}

/// A fully parsed input file: target URL, fields in file order, and the
/// selector of the submit control.
#[derive(Debug, Clone)]
pub struct FillPlan {
    pub url: String,
    pub fields: Vec<FieldEntry>,
    pub submit_selector: String,
}

impl FillPlan {
    /// Read and parse the input file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&text)
    }

    /// Parse INI text: `[section]` headers, `key = value` lines, `#`/`;`
    /// comments and blank lines. Recognized sections are `[portal]`
    /// (url, submit), `[fields]` (name = value, order preserved) and
    /// `[selectors]` (per-field selector overrides).
    pub fn parse(text: &str) -> Result<Self> {
        let mut section: Option<Section> = None;
        let mut url = None;
        let mut submit_selector = None;
        let mut fields: Vec<(String, String)> = Vec::new();
        let mut selectors: Vec<(String, String)> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }
            if let Some(name) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                section = Some(Section::from_name(name.trim(), line)?);
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(Error::ConfigError(format!(
                    "line {line}: expected 'key = value', got '{trimmed}'"
                )));
            };
            let key = key.trim();
            let value = strip_inline_comment(value).trim();
            if key.is_empty() {
                return Err(Error::ConfigError(format!("line {line}: empty key")));
            }
            match section {
                None => {
                    return Err(Error::ConfigError(format!(
                        "line {line}: '{key}' appears before any [section] header"
                    )));
                }
                Some(Section::Portal) => match key {
                    "url" => url = Some(value.to_string()),
                    "submit" => submit_selector = Some(value.to_string()),
                    other => {
                        return Err(Error::ConfigError(format!(
                            "line {line}: unknown [portal] key '{other}'"
                        )));
                    }
                },
                Some(Section::Fields) => fields.push((key.to_string(), value.to_string())),
                Some(Section::Selectors) => selectors.push((key.to_string(), value.to_string())),
            }
        }

        let url = match url {
            Some(u) if !u.is_empty() => u,
            _ => {
                return Err(Error::ConfigError(
                    "missing 'url' in the [portal] section".into(),
                ));
            }
        };
        if fields.is_empty() {
            return Err(Error::ConfigError(
                "the [fields] section is missing or empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        for (name, _) in &fields {
            if !seen.insert(name.as_str()) {
                return Err(Error::ConfigError(format!(
                    "duplicate field '{name}' in [fields]"
                )));
            }
        }
        for (name, _) in &selectors {
            if !seen.contains(name.as_str()) {
                return Err(Error::ConfigError(format!(
                    "[selectors] names '{name}' which is not in [fields]"
                )));
            }
        }

        let fields = fields
            .into_iter()
            .map(|(name, value)| {
                let selector = selectors
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, s)| s.clone())
                    .unwrap_or_else(|| FieldEntry::default_selector(&name));
                FieldEntry {
                    name,
                    value,
                    selector,
                }
            })
            .collect();

        Ok(Self {
            url,
            fields,
            submit_selector: submit_selector
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SUBMIT_SELECTOR.to_string()),
        })
    }
}

#[derive(Clone, Copy)]
enum Section {
    Portal,
    Fields,
    Selectors,
}

impl Section {
    fn from_name(name: &str, line: usize) -> Result<Self> {
        match name {
            "portal" => Ok(Section::Portal),
            "fields" => Ok(Section::Fields),
            "selectors" => Ok(Section::Selectors),
            other => Err(Error::ConfigError(format!(
                "line {line}: unknown section [{other}]"
            ))),
        }
    }
}

// Trailing `; comment` on a value line, as accepted by common INI dialects.
fn strip_inline_comment(value: &str) -> &str {
    match value.find(" ;") {
        Some(pos) => &value[..pos],
        None => value,
    }
}
