//! Configuration file parser for ~/.config/odm/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning when the file
//! contains potential typos.
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

use crate::feed::{default_channels, FeedChannel, DEFAULT_USER_AGENT};

/// Allowed number of entries per refresh.
pub const ITEM_LIMIT_RANGE: RangeInclusive<u32> = 10..=50;
/// Allowed recency window in days.
pub const DAY_WINDOW_RANGE: RangeInclusive<u32> = 1..=30;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `User-Agent` sent with feed requests.
    pub user_agent: String,

    /// Whether titles are translated on refresh.
    pub translate: bool,

    /// Provider language code titles are translated into.
    pub target_language: String,

    /// Entries shown per refresh, clamped to [`ITEM_LIMIT_RANGE`].
    pub item_limit: u32,

    /// Maximum entry age in days, clamped to [`DAY_WINDOW_RANGE`].
    pub day_window: u32,

    /// Alternative translation endpoint host (HTTPS, or localhost for testing).
    pub translate_base_url: Option<String>,

    /// Channel selected at startup, by name.
    pub default_channel: Option<String>,

    /// Selectable channels. Replaces the built-in set when present.
    pub channels: Vec<FeedChannel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            translate: true,
            target_language: "ko".to_string(),
            item_limit: 20,
            day_window: 7,
            translate_base_url: None,
            default_channel: None,
            channels: default_channels(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 8] = [
        "user_agent",
        "translate",
        "target_language",
        "item_limit",
        "day_window",
        "translate_base_url",
        "default_channel",
        "channels",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    /// - Out-of-range limits → clamped, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        let config = config.validated();
        tracing::info!(
            path = %path.display(),
            channels = config.channels.len(),
            translate = config.translate,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Clamps limits into their ranges and restores the built-in channels
    /// when the file lists none.
    pub fn validated(mut self) -> Self {
        self.item_limit = clamp_logged("item_limit", self.item_limit, &ITEM_LIMIT_RANGE);
        self.day_window = clamp_logged("day_window", self.day_window, &DAY_WINDOW_RANGE);

        if self.channels.is_empty() {
            tracing::warn!("Config lists no channels, using built-in channels");
            self.channels = default_channels();
        }
        if self.user_agent.trim().is_empty() {
            self.user_agent = DEFAULT_USER_AGENT.to_string();
        }
        self
    }
}

/// Clamps `value` into `range`, warning when it had to move.
pub fn clamp_logged(key: &str, value: u32, range: &RangeInclusive<u32>) -> u32 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        tracing::warn!(
            key = key,
            value = value,
            clamped = clamped,
            "Value out of range, clamping"
        );
    }
    clamped
}

// ============================================================================
// Tests
// ============================================================================
