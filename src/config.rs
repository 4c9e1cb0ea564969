//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Fixed Argos Translate endpoint.
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.argosopentech.com/translate";

/// Fixed Stable Diffusion v1.5 hosted inference endpoint.
pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/runwayml/stable-diffusion-v1-5";

/// Environment variables checked for the inference token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["HUGGINGFACE_API_KEY", "VITE_HUGGINGFACE_API_KEY"];

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Service endpoints.
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Default parameter values (used when CLI flags are absent).
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Hugging Face inference token.
    pub huggingface: Option<String>,
}

/// Service endpoint URLs.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Translation endpoint.
    pub translate: String,
    /// Image inference endpoint.
    pub inference: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            translate: DEFAULT_TRANSLATE_URL.to_string(),
            inference: DEFAULT_INFERENCE_URL.to_string(),
        }
    }
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default output format.
    pub format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { format: "jpeg".to_string() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the inference token, preferring environment variables.
    #[must_use]
    pub fn huggingface_key(&self) -> Option<String> {
        TOKEN_ENV_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| self.keys.huggingface.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `HINDI_IMAGEN_CONFIG` environment variable
/// 3. `~/.config/hindi-imagen/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("HINDI_IMAGEN_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/hindi-imagen/config.toml")
    } else {
        PathBuf::from("hindi-imagen.toml")
    }
}
