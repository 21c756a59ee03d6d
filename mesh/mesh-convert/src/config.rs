//! TOML configuration files.
//!
//! ```toml
//! [options]
//! merge_vertices = true
//! scale_factor = 25.4
//! center_to_origin = true
//!
//! [naming]
//! mode = "custom"
//! name = "bracket"
//! out_dir = "exports"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::naming::NamingMode;
use crate::options::ConvertOptions;

/// A complete converter configuration as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Pipeline options.
    pub options: ConvertOptions,
    /// Output naming.
    pub naming: NamingConfig,
}

impl ConvertConfig {
    /// Parse and validate a config from TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys, or a
    /// validation error for out-of-range values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.options.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file cannot be read, otherwise as
    /// [`ConvertConfig::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// How output file stems are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingKind {
    /// Keep the input stem.
    #[default]
    Same,
    /// Input stem plus `_converted`.
    Suffix,
    /// A user-supplied name.
    Custom,
}

/// The `[naming]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Naming mode.
    pub mode: NamingKind,
    /// Base name for [`NamingKind::Custom`].
    pub name: Option<String>,
    /// Output directory; `None` writes beside each input.
    pub out_dir: Option<PathBuf>,
}

impl NamingConfig {
    /// The naming mode this table selects.
    ///
    /// A custom mode with no name yields an empty custom name, which the
    /// namer rejects.
    #[must_use]
    pub fn mode(&self) -> NamingMode {
        match self.mode {
            NamingKind::Same => NamingMode::SameName,
            NamingKind::Suffix => NamingMode::Suffix,
            NamingKind::Custom => NamingMode::Custom(self.name.clone().unwrap_or_default()),
        }
    }
}
