use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SolaceConfig {
    pub companion: CompanionConfig,
    pub stores: StoreConfig,
    pub lexicon: Lexicon,
}

impl SolaceConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: SolaceConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("OLLAMA_BASE_URL") {
            self.companion.base_url = v;
        }
        if let Ok(v) = std::env::var("SOLACE_MODEL") {
            self.companion.model = v;
        }
        if let Ok(v) = std::env::var("SOLACE_DATA_DIR") {
            self.stores.data_dir = PathBuf::from(v);
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Base URL of the local model server (Ollama-compatible).
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding both persisted documents.
    pub data_dir: PathBuf,
    pub facts_file: String,
    pub event_log_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            facts_file: "memory.json".to_string(),
            event_log_file: "event_log.json".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn facts_path(&self) -> PathBuf {
        self.data_dir.join(&self.facts_file)
    }

    pub fn event_log_path(&self) -> PathBuf {
        self.data_dir.join(&self.event_log_file)
    }
}

// ============================================================================
// Keyword lexicon
// ============================================================================

/// The detector's keyword tables, shipped as editable configuration so a
/// deployment can replace a list wholesale without a rebuild. Matching is
/// substring containment against the lowercased utterance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Bumped whenever the default lists change shape.
    pub version: u32,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub confusion: Vec<String>,
    pub emergency: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            version: 1,
            positive: to_strings(&[
                "happy",
                "good",
                "great",
                "wonderful",
                "joy",
                "excited",
                "pleased",
                "delighted",
                "content",
                "calm",
                "relaxed",
            ]),
            negative: to_strings(&[
                "sad",
                "depressed",
                "anxious",
                "worried",
                "pain",
                "hurt",
                "bad",
                "terrible",
                "awful",
                "miserable",
                "unhappy",
            ]),
            confusion: to_strings(&[
                "confused",
                "can't remember",
                "forgot",
                "don't know",
                "unsure",
                "uncertain",
                "disoriented",
                "lost",
            ]),
            emergency: to_strings(&[
                "emergency",
                "help",
                "fallen",
                "can't breathe",
                "chest pain",
                "severe",
                "dizzy",
                "faint",
                "ambulance",
            ]),
        }
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = SolaceConfig::default();
        assert_eq!(cfg.companion.base_url, "http://localhost:11434");
        assert_eq!(cfg.companion.model, "mistral");
        assert_eq!(cfg.stores.facts_path(), PathBuf::from("data/memory.json"));
        assert_eq!(cfg.lexicon.version, 1);
        assert!(cfg.lexicon.emergency.contains(&"help".to_string()));
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[companion]
model = "llama3"
"#;
        let cfg: SolaceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.companion.model, "llama3");
        // Defaults for unspecified fields
        assert_eq!(cfg.companion.timeout_secs, 30);
        assert_eq!(cfg.stores.event_log_file, "event_log.json");
        assert_eq!(cfg.lexicon.confusion.len(), 8);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[companion]
base_url = "http://companion.local:11434"
model = "mistral:7b"
timeout_secs = 10

[stores]
data_dir = "/var/lib/solace"
facts_file = "facts.json"
event_log_file = "signals.json"

[lexicon]
version = 2
emergency = ["mayday"]
"#;
        let cfg: SolaceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.companion.base_url, "http://companion.local:11434");
        assert_eq!(cfg.companion.timeout_secs, 10);
        assert_eq!(
            cfg.stores.event_log_path(),
            PathBuf::from("/var/lib/solace/signals.json")
        );
        assert_eq!(cfg.lexicon.version, 2);
        // Override replaces a list wholesale, not element-wise
        assert_eq!(cfg.lexicon.emergency, vec!["mayday".to_string()]);
        // Untouched lists keep their defaults
        assert!(cfg.lexicon.positive.contains(&"happy".to_string()));
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        std::env::set_var("SOLACE_MODEL", "phi3");
        std::env::set_var("OLLAMA_BASE_URL", "http://10.0.0.5:11434");

        let mut cfg = SolaceConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.companion.model, "phi3");
        assert_eq!(cfg.companion.base_url, "http://10.0.0.5:11434");

        std::env::remove_var("SOLACE_MODEL");
        std::env::remove_var("OLLAMA_BASE_URL");

        // Nonexistent path returns defaults (no env interference)
        let cfg = SolaceConfig::load_or_default("/nonexistent/solace.toml");
        assert_eq!(cfg.companion.model, "mistral");
    }
}
