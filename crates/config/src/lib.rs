//! Configuration for noteline.
//!
//! Configuration is a flat TOML document. Every key is optional; absent keys
//! take the defaults below.
//!
//! ```toml
//! commentPrefix = "//"
//! maxLength = 80
//! commentColor = "#6A9955"
//! fontStyle = "italic"
//! languages = ["java", "javascript", "typescript"]
//! debounceMs = 500
//! ```
//!
//! The first four keys form the [`AnnotateConfig`] record consumed by each
//! annotation run. `languages` gates which documents are annotated at all, and
//! `debounceMs` is the quiet period after an edit before a new run starts.

pub mod error;
pub mod source;
pub mod style;

use std::path::Path;
use std::time::Duration;

use noteline_primitives::{AnnotationStyle, Color, FontStyle};
use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use source::{ConfigSource, FileConfig, StaticConfig};

/// Language tags annotated when `languages` is not configured.
pub const DEFAULT_LANGUAGES: &[&str] = &["java", "javascript", "typescript"];

/// Quiet period after an edit when `debounceMs` is not configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Smallest accepted `maxLength`; anything shorter cannot hold a summary
/// plus the truncation marker.
pub const MIN_MAX_LENGTH: usize = 4;

/// Resolved settings for one annotation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateConfig {
	/// Prefix placed before every summary, e.g. `//`.
	pub comment_prefix: String,
	/// Maximum summary length in characters, truncation marker included.
	pub max_length: usize,
	/// Summary text color.
	pub color: Color,
	/// Summary font style.
	pub font_style: FontStyle,
}

impl Default for AnnotateConfig {
	fn default() -> Self {
		Self {
			comment_prefix: "//".to_string(),
			max_length: 80,
			color: Color::SUMMARY_GREEN,
			font_style: FontStyle::Italic,
		}
	}
}

impl AnnotateConfig {
	/// Returns the rendering style for annotations produced under this config.
	pub fn style(&self) -> AnnotationStyle {
		AnnotationStyle {
			color: self.color,
			font_style: self.font_style,
			..AnnotationStyle::default()
		}
	}
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Per-run annotation settings.
	pub annotate: AnnotateConfig,
	/// Supported language tags.
	pub languages: Vec<String>,
	/// Delay between the last edit and the run it triggers.
	pub debounce: Duration,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			annotate: AnnotateConfig::default(),
			languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
			debounce: DEFAULT_DEBOUNCE,
		}
	}
}

/// On-disk shape; every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
	comment_prefix: Option<String>,
	max_length: Option<usize>,
	comment_color: Option<String>,
	font_style: Option<String>,
	languages: Option<Vec<String>>,
	debounce_ms: Option<u64>,
}

impl Config {
	/// Parse a TOML string into a [`Config`], applying defaults to absent keys.
	pub fn parse(input: &str) -> Result<Self> {
		let raw: RawConfig = toml::from_str(input)?;
		let mut config = Self::default();

		if let Some(prefix) = raw.comment_prefix {
			config.annotate.comment_prefix = prefix;
		}
		if let Some(max_length) = raw.max_length {
			if max_length < MIN_MAX_LENGTH {
				return Err(ConfigError::InvalidValue {
					field: "maxLength",
					reason: format!("{max_length} is below the minimum of {MIN_MAX_LENGTH}"),
				});
			}
			config.annotate.max_length = max_length;
		}
		if let Some(color) = raw.comment_color {
			config.annotate.color = style::parse_color(&color)?;
		}
		if let Some(font_style) = raw.font_style {
			config.annotate.font_style = style::parse_font_style(&font_style)?;
		}
		if let Some(languages) = raw.languages {
			config.languages = languages;
		}
		if let Some(ms) = raw.debounce_ms {
			config.debounce = Duration::from_millis(ms);
		}

		Ok(config)
	}

	/// Load and parse a configuration file.
	pub fn load(path: &Path) -> Result<Self> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&input)
	}

	/// Returns true if documents tagged `language` should be annotated.
	pub fn supports(&self, language: &str) -> bool {
		self.languages.iter().any(|l| l == language)
	}
}
