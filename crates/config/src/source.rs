//! Configuration resolution.
//!
//! The annotation pipeline never reads settings directly; it asks a
//! [`ConfigSource`] for a fresh [`Config`] snapshot at the start of each run,
//! so edits to the settings take effect on the next run.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Config, ConfigError};

/// Source of resolved configuration snapshots.
pub trait ConfigSource: Send + Sync {
	/// Returns the current configuration, defaulted where unset.
	fn resolve(&self) -> Config;
}

/// A fixed configuration, resolved identically every time.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig(pub Config);

impl ConfigSource for StaticConfig {
	fn resolve(&self) -> Config {
		self.0.clone()
	}
}

/// Configuration read from a TOML file on every resolve.
///
/// A missing file resolves to defaults silently. An unreadable or invalid
/// file also resolves to defaults, with a warning, so a bad edit to the file
/// never stops annotation.
#[derive(Debug, Clone)]
pub struct FileConfig {
	path: PathBuf,
}

impl FileConfig {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for FileConfig {
	fn resolve(&self) -> Config {
		match Config::load(&self.path) {
			Ok(config) => config,
			Err(ConfigError::Io { error, .. }) if error.kind() == io::ErrorKind::NotFound => {
				debug!(path = %self.path.display(), "config file absent, using defaults");
				Config::default()
			}
			Err(error) => {
				warn!(path = %self.path.display(), %error, "invalid config file, using defaults");
				Config::default()
			}
		}
	}
}
