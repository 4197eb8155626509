//! Game and provider configuration.
//!
//! - `GameConfig`: pair count, mismatch delay, deal seed
//! - `ProviderConfig`: character API endpoint and credentials
//! - `AppConfig`: both, loadable from a TOML file
//!
//! ```toml
//! [game]
//! pair_count = 8
//! mismatch_delay_ms = 1000
//! seed = 42
//!
//! [provider]
//! public_key = "..."
//! private_key = "..."
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::rng::GameRng;
use crate::error::{Error, Result};

/// Largest supported number of pairs.
pub const MAX_PAIRS: usize = 64;

/// Default pause before a mismatched pair is turned face down again.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 1000;

/// Default character API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://gateway.marvel.com/v1/public";

/// Settings for a single game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of distinct items, and so of pairs, in the deck.
    pub pair_count: usize,

    /// How long a mismatched pair stays face up, in milliseconds.
    pub mismatch_delay_ms: u64,

    /// Deal seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: 8,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of pairs.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Set the mismatch delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Fix the deal seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The mismatch delay as a `Duration`.
    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    /// Build the RNG for dealing.
    #[must_use]
    pub fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }

    /// Check the settings are playable.
    pub fn validate(&self) -> Result<()> {
        if self.pair_count == 0 {
            return Err(Error::config("game.pair_count", "pair count must be at least 1"));
        }
        if self.pair_count > MAX_PAIRS {
            return Err(Error::config(
                "game.pair_count",
                format!("pair count must be at most {}", MAX_PAIRS),
            ));
        }
        Ok(())
    }
}

/// Credentials and endpoint for the character API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API root, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Public API key, sent as `apikey`.
    pub public_key: String,

    /// Private API key, only ever used to compute the request hash.
    pub private_key: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl ProviderConfig {
    /// Create a provider configuration for the default endpoint.
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Point the provider at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that credentials are present.
    pub fn validate(&self) -> Result<()> {
        if self.public_key.trim().is_empty() {
            return Err(Error::config("provider.public_key", "public key must not be empty"));
        }
        if self.private_key.trim().is_empty() {
            return Err(Error::config("provider.private_key", "private key must not be empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::config("provider.base_url", "base URL must not be empty"));
        }
        Ok(())
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Game settings.
    #[serde(default)]
    pub game: GameConfig,

    /// Character API settings. Without them, numeric labels are used.
    #[serde(default)]
    pub provider: Option<ProviderConfig>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config("config_file", format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| Error::config("config_format", format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.game.validate()?;
        if let Some(provider) = &self.provider {
            provider.validate()?;
        }
        Ok(())
    }
}
