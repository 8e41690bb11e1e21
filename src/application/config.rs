//! Tunables for one handshake session, loaded from TOML.
//!
//! ```toml
//! session_timeout_secs = 120
//!
//! [render]
//! size_px = 350
//! ec_level = "medium"
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ports::{EcLevel, RenderHint};

const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 120;
const DEFAULT_RENDER_SIZE_PX: u32 = 350;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandshakeConfig {
    /// How long a rendered code stays valid without the peer acknowledging.
    pub session_timeout_secs: u64,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub size_px: u32,
    pub ec_level: EcLevel,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
            render: RenderConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size_px: DEFAULT_RENDER_SIZE_PX,
            ec_level: EcLevel::default(),
        }
    }
}

impl HandshakeConfig {
    /// Parse and validate TOML text.
    ///
    /// # Errors
    /// `Parse` for bad TOML or unknown keys, `Invalid` for zero values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: HandshakeConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. A missing file yields the defaults.
    ///
    /// # Errors
    /// `Read` if the file exists but cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Write the config as pretty TOML.
    ///
    /// # Errors
    /// `Invalid` if the values would not load back, `Serialize` or `Write`
    /// otherwise.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.validate()?;
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// # Errors
    /// `Invalid` for a zero timeout or zero render size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_timeout_secs == 0 {
            return Err(ConfigError::Invalid("session_timeout_secs must be > 0"));
        }
        if self.render.size_px == 0 {
            return Err(ConfigError::Invalid("render.size_px must be > 0"));
        }
        Ok(())
    }

    #[must_use]
    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }

    #[must_use]
    pub fn render_hint(&self) -> RenderHint {
        RenderHint {
            size_px: self.render.size_px,
            ec_level: self.render.ec_level,
        }
    }
}
