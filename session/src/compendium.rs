//! Imported rules compendium.
//!
//! Rules arrive as uploaded files. `.json` files are parsed into structured
//! records; anything else becomes a single rule holding the raw text. Imports
//! are all-or-nothing: a failed parse leaves the previous rule set in place.

use serde::Deserialize;

#[cfg(test)]
#[path = "compendium_test.rs"]
mod compendium_test;

/// One rule entry, searchable by title and body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("file is not utf-8 text")]
    NotText(#[from] std::str::Utf8Error),
    #[error("invalid rules json: {0}")]
    Json(#[from] serde_json::Error),
}

/// The session's rule collection. Starts empty; each successful import
/// replaces the whole set.
#[derive(Debug, Default)]
pub struct Compendium {
    rules: Vec<Rule>,
}

impl Compendium {
    /// Imports rules from an uploaded file, replacing the current set.
    ///
    /// Files named `*.json` parse as either an array of `{title, text}`
    /// records (missing fields default to empty) or an object whose keys
    /// become titles and whose values are re-serialized as compact JSON.
    /// Any other JSON top level imports an empty set. Non-JSON files become
    /// a single rule titled with the filename.
    ///
    /// # Errors
    ///
    /// Returns an error for non-UTF-8 content or malformed JSON; the
    /// previous rule set is kept in that case.
    pub fn import(&mut self, filename: &str, bytes: &[u8]) -> Result<usize, ImportError> {
        let text = std::str::from_utf8(bytes)?;
        let is_json = filename
            .rsplit_once('.')
            .map_or(false, |(_, ext)| ext.eq_ignore_ascii_case("json"));

        self.rules = if is_json {
            parse_json_rules(text)?
        } else {
            vec![Rule { title: filename.to_owned(), text: text.to_owned() }]
        };
        Ok(self.rules.len())
    }

    /// Case-insensitive substring search over titles and bodies. An empty
    /// query matches every rule.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Rule> {
        let needle = query.to_lowercase();
        self.rules
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.text.to_lowercase().contains(&needle)
            })
            .collect()
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_json_rules(text: &str) -> Result<Vec<Rule>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            // Non-record items degrade to an empty rule rather than
            // failing the whole import.
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(title, value)| Rule { title, text: value.to_string() })
            .collect(),
        _ => Vec::new(),
    })
}
