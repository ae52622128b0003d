use std::fmt;

use serde::{Serialize, Serializer};

/// A true-color RGB value.
///
/// Displays (and serializes) as a lowercase `#rrggbb` hex string, the form
/// host renderers accept for inline decoration colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	/// Muted green used for summaries when no color is configured.
	pub const SUMMARY_GREEN: Self = Self::rgb(0x6a, 0x99, 0x55);

	/// Creates a color from its components.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::SUMMARY_GREEN
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

impl Serialize for Color {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn displays_as_hex() {
		assert_eq!(Color::SUMMARY_GREEN.to_string(), "#6a9955");
		assert_eq!(Color::rgb(0, 255, 16).to_string(), "#00ff10");
	}
}
