//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::engine::Mode;
use crate::rules::{EvalOptions, ExactOutOfRange};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Settings> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
/// Fails with `AlreadyInitialized` once settings have been read.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    if INSTANCE.get().is_some() {
        return Err(SettingsError::AlreadyInitialized);
    }
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub rules: RuleSettings,
    pub engine: EngineSettings,
    /// Parsed `engine.default_mode`.
    #[serde(skip)]
    default_mode: Mode,
}

impl Settings {
    pub fn eval_options(&self) -> EvalOptions {
        EvalOptions {
            exact_out_of_range: self.rules.exact_out_of_range,
        }
    }

    pub fn default_mode(&self) -> Mode {
        self.default_mode
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleSettings {
    pub exact_out_of_range: ExactOutOfRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    pub default_mode: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    s.default_mode = s
        .engine
        .default_mode
        .parse()
        .map_err(|_| SettingsError::InvalidValue {
            field: "engine.default_mode".to_string(),
            reason: format!("unknown mode {:?}", s.engine.default_mode),
        })?;
    Ok(s)
}
