//! File-backed persistence for the facts document and context injection.
//!
//! The store is deliberately simple: one JSON object, loaded in full,
//! merged, and rewritten on every mutation. The write goes to a temp
//! file in the same directory and is renamed into place, so a reader in
//! the same process never observes a half-written document. Concurrent
//! writers must be serialized by the host (one logical writer per store).

use crate::rules;
use serde::{Deserialize, Serialize};
use solace_core::StoreError;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A fact value: one current string, or a deduplicated union list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    Scalar(String),
    List(Vec<String>),
}

/// The full facts document. BTreeMap keeps the rendered context stable.
pub type Facts = BTreeMap<String, FactValue>;

/// Durable key/value memory of facts about the user.
///
/// The storage location is constructor-supplied so multiple instances
/// (per test, per user) never collide on a shared file.
#[derive(Debug)]
pub struct FactStore {
    path: PathBuf,
}

impl FactStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current persisted facts. A missing file is an empty store;
    /// an unreadable or unparsable one is an error the caller may treat
    /// as empty (the next extraction will rewrite it).
    pub fn facts(&self) -> Result<Facts, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Facts::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        serde_json::from_str(&content).map_err(|e| StoreError::corrupt(&self.path, e))
    }

    /// Scan the utterance against the rule table, merge any matches into
    /// the persisted document, and return the complete updated mapping.
    ///
    /// Idempotent for scalar facts and union-idempotent for list facts.
    /// A corrupt document on disk is recovered by starting from empty.
    pub fn extract_facts(&self, utterance: &str) -> Result<Facts, StoreError> {
        let mut facts = self.load_or_empty();
        let written = rules::apply_rules(utterance, &mut facts);
        if written > 0 {
            tracing::info!(written, "learned new facts from utterance");
        }
        self.save(&facts)?;
        Ok(facts)
    }

    /// Render every stored fact into a text preamble, followed by the
    /// original prompt, for the response generator. No side effects;
    /// an empty (or unreadable) store still returns the prompt intact.
    pub fn render_context(&self, prompt: &str) -> String {
        format!(
            "Here is what you remember about the user:\n{}\n\nUser said: {prompt}",
            self.render_facts()
        )
    }

    /// Just the humanized `Key name: value` lines, one per stored fact,
    /// with no prompt scaffold around them. Empty store renders to an
    /// empty string.
    pub fn render_facts(&self) -> String {
        self.load_or_empty()
            .iter()
            .map(|(key, value)| format!("{}: {}", humanize_key(key), render_value(value)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn load_or_empty(&self) -> Facts {
        match self.facts() {
            Ok(facts) => facts,
            Err(e) => {
                tracing::warn!("facts document unreadable, treating store as empty: {e}");
                Facts::new()
            }
        }
    }

    fn save(&self, facts: &Facts) -> Result<(), StoreError> {
        let dir = parent_dir(&self.path);
        std::fs::create_dir_all(dir).map_err(|e| StoreError::io(&self.path, e))?;

        let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::to_writer_pretty(tmp.as_file(), facts)
            .map_err(|e| StoreError::corrupt(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;
        Ok(())
    }
}

/// "favorite_color" -> "Favorite color".
fn humanize_key(key: &str) -> String {
    rules::capitalize(&key.replace('_', " "))
}

fn render_value(value: &FactValue) -> String {
    match value {
        FactValue::Scalar(v) => v.clone(),
        FactValue::List(items) => items.join(", "),
    }
}

pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}
