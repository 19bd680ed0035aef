//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `BLOCKGEN_OPENAI_API_KEY`, then `OPENAI_API_KEY`
//! 2. Project-local: `.blockgen/config.toml`
//! 3. Global: `~/.blockgen/config.toml`

use blockgen_core::{BlockgenError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Provider-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

/// How batches are sent to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One call at a time with a fixed pause between calls
    Serial,
    /// A fixed-size worker pool with a small random stagger per call
    Parallel,
}

/// Resolved dispatch parameters handed to the batch runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Serial { delay: Duration },
    Parallel { workers: usize, max_jitter: Duration },
}

/// Classification settings
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationConfig {
    pub provider: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub batch_size: usize,
    pub mode: DispatchMode,
    pub workers: usize,
    pub delay_secs: u64,
    pub max_jitter_ms: u64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.1,
            max_tokens: 2000,
            batch_size: 20,
            mode: DispatchMode::Parallel,
            workers: 8,
            delay_secs: 20,
            max_jitter_ms: 400,
        }
    }
}

impl ClassificationConfig {
    /// Dispatch parameters for the configured mode
    pub fn dispatch(&self) -> Dispatch {
        match self.mode {
            DispatchMode::Serial => Dispatch::Serial {
                delay: Duration::from_secs(self.delay_secs),
            },
            DispatchMode::Parallel => Dispatch::Parallel {
                workers: self.workers.max(1),
                max_jitter: Duration::from_millis(self.max_jitter_ms),
            },
        }
    }

    fn apply(&mut self, section: ClassificationSection) {
        if let Some(provider) = section.provider {
            self.provider = provider;
        }
        if let Some(model) = section.model {
            self.model = model;
        }
        if let Some(temperature) = section.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = section.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(batch_size) = section.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(mode) = section.mode {
            self.mode = mode;
        }
        if let Some(workers) = section.workers {
            self.workers = workers;
        }
        if let Some(delay_secs) = section.delay_secs {
            self.delay_secs = delay_secs;
        }
        if let Some(max_jitter_ms) = section.max_jitter_ms {
            self.max_jitter_ms = max_jitter_ms;
        }
    }
}

/// `[classification]` table as written in a config file; unset keys inherit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationSection {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub batch_size: Option<usize>,
    #[serde(default)]
    pub mode: Option<DispatchMode>,
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub delay_secs: Option<u64>,
    #[serde(default)]
    pub max_jitter_ms: Option<u64>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockgenConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    pub classification: ClassificationSection,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct BlockgenConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub classification: ClassificationConfig,
}

impl BlockgenConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = BlockgenConfig::default();

        // Layer 1: Global config (~/.blockgen/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge_file(Self::load_file(&global_path)?);
            }
        }

        // Layer 2: Project-local config (.blockgen/config.toml)
        let local_path = PathBuf::from(".blockgen/config.toml");
        if local_path.exists() {
            config.merge_file(Self::load_file(&local_path)?);
        }

        // Layer 3: Environment variable overrides
        config.apply_env_overrides(|name| std::env::var(name).ok());

        Ok(config)
    }

    /// Load config from one explicit file, skipping the global and project layers
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = BlockgenConfig::default();
        config.merge_file(Self::load_file(path)?);
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
            .filter(|k| !k.is_empty())
    }

    /// Get API URL override for a provider
    pub fn api_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_url.as_deref())
    }

    /// Check if a provider is enabled
    pub fn is_enabled(&self, provider_name: &str) -> bool {
        self.providers
            .get(provider_name)
            .map(|p| p.enabled)
            .unwrap_or(true)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".blockgen").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<BlockgenConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            BlockgenError::TomlParseError(format!("{}: {}", path.display(), e))
        })
    }

    fn merge_file(&mut self, overlay: BlockgenConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = self.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            entry.enabled = provider.enabled;
        }

        self.classification.apply(overlay.classification);
    }

    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Later names win
        for env_key in ["OPENAI_API_KEY", "BLOCKGEN_OPENAI_API_KEY"] {
            if let Some(key) = lookup(env_key).filter(|k| !k.is_empty()) {
                let entry = self.providers.entry("openai".to_string()).or_default();
                entry.api_key = Some(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("blockgen_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_config_file() {
        let config_str = r#"
[providers.openai]
api_key = "sk-test-123"
api_url = "https://llm.example.com/v1/chat/completions"

[classification]
model = "gpt-4o"
batch_size = 25
mode = "serial"
delay_secs = 5
"#;
        let path = temp_config(config_str);
        let mut config = BlockgenConfig::default();
        config.merge_file(BlockgenConfig::load_file(&path).unwrap());

        assert_eq!(config.api_key("openai"), Some("sk-test-123"));
        assert_eq!(
            config.api_url("openai"),
            Some("https://llm.example.com/v1/chat/completions")
        );
        assert_eq!(config.classification.model, "gpt-4o");
        assert_eq!(config.classification.batch_size, 25);
        assert_eq!(
            config.classification.dispatch(),
            Dispatch::Serial {
                delay: Duration::from_secs(5)
            }
        );
        // Untouched keys keep their defaults
        assert_eq!(config.classification.max_tokens, 2000);
        assert_eq!(config.classification.workers, 8);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_later_layer_wins() {
        let global = temp_config("[classification]\nbatch_size = 10\nworkers = 2\n");
        let local = temp_config("[classification]\nbatch_size = 30\n");

        let mut config = BlockgenConfig::default();
        config.merge_file(BlockgenConfig::load_file(&global).unwrap());
        config.merge_file(BlockgenConfig::load_file(&local).unwrap());

        assert_eq!(config.classification.batch_size, 30);
        assert_eq!(config.classification.workers, 2);

        std::fs::remove_dir_all(global.parent().unwrap()).ok();
        std::fs::remove_dir_all(local.parent().unwrap()).ok();
    }

    #[test]
    fn test_env_var_override() {
        let mut config = BlockgenConfig::default();
        config.providers.insert(
            "openai".to_string(),
            ProviderConfig {
                api_key: Some("file-key".to_string()),
                api_url: None,
                enabled: true,
            },
        );

        config.apply_env_overrides(|name| match name {
            "OPENAI_API_KEY" => Some("plain-key".to_string()),
            "BLOCKGEN_OPENAI_API_KEY" => Some("scoped-key".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key("openai"), Some("scoped-key"));
    }

    #[test]
    fn test_empty_env_var_ignored() {
        let mut config = BlockgenConfig::default();
        config.apply_env_overrides(|_| Some(String::new()));
        assert_eq!(config.api_key("openai"), None);
    }

    #[test]
    fn test_load_from_file_skips_other_layers() {
        let path = temp_config("[classification]\nprovider = \"mock\"\nworkers = 2\n");
        let config = BlockgenConfig::load_from_file(&path).unwrap();

        assert_eq!(config.classification.provider, "mock");
        assert_eq!(config.classification.workers, 2);
        assert_eq!(config.classification.batch_size, ClassificationConfig::default().batch_size);

        assert!(BlockgenConfig::load_from_file(&path.with_file_name("absent.toml")).is_err());
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_invalid_config_is_error() {
        let path = temp_config("[classification]\nmode = \"sideways\"\n");
        let err = BlockgenConfig::load_file(&path).unwrap_err();
        assert!(matches!(err, BlockgenError::TomlParseError(_)));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_defaults() {
        let config = BlockgenConfig::default();
        assert_eq!(config.classification.provider, "openai");
        assert_eq!(config.classification.model, "gpt-4o-mini");
        assert_eq!(config.classification.batch_size, 20);
        assert_eq!(
            config.classification.dispatch(),
            Dispatch::Parallel {
                workers: 8,
                max_jitter: Duration::from_millis(400)
            }
        );
        assert!(config.is_enabled("openai"));
        assert_eq!(config.api_key("nonexistent"), None);
    }
}
