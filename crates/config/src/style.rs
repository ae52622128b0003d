//! Parsing of color and font style values.

use noteline_primitives::{Color, FontStyle};

use crate::error::{ConfigError, Result};

/// Parse a color value from a string.
///
/// Supports hex (`#RGB`, `#RRGGBB`) and a small set of CSS color names.
pub fn parse_color(value: &str) -> Result<Color> {
	let value = value.trim();

	if let Some(hex) = value.strip_prefix('#') {
		return parse_hex_color(hex);
	}

	parse_named_color(value)
}

/// Parses a hex color string (`RGB` or `RRGGBB`, without the `#`).
fn parse_hex_color(hex: &str) -> Result<Color> {
	let err = || ConfigError::InvalidColor(format!("#{hex}"));
	if !hex.is_ascii() {
		return Err(err());
	}

	match hex.len() {
		3 => {
			let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).map_err(|_| err())?;
			let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).map_err(|_| err())?;
			let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).map_err(|_| err())?;
			Ok(Color::rgb(r, g, b))
		}
		6 => {
			let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| err())?;
			let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| err())?;
			let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| err())?;
			Ok(Color::rgb(r, g, b))
		}
		_ => Err(err()),
	}
}

/// Parses a CSS color name (e.g., "grey", "dark-green") into a Color.
fn parse_named_color(name: &str) -> Result<Color> {
	let normalized = name.to_lowercase().replace(['-', '_'], "");

	match normalized.as_str() {
		"black" => Ok(Color::rgb(0, 0, 0)),
		"white" => Ok(Color::rgb(255, 255, 255)),
		"gray" | "grey" => Ok(Color::rgb(128, 128, 128)),
		"darkgray" | "darkgrey" => Ok(Color::rgb(169, 169, 169)),
		"lightgray" | "lightgrey" => Ok(Color::rgb(211, 211, 211)),
		"green" => Ok(Color::rgb(0, 128, 0)),
		"darkgreen" => Ok(Color::rgb(0, 100, 0)),
		"olive" => Ok(Color::rgb(128, 128, 0)),
		"teal" => Ok(Color::rgb(0, 128, 128)),
		"blue" => Ok(Color::rgb(0, 0, 255)),
		"steelblue" => Ok(Color::rgb(70, 130, 180)),
		"orange" => Ok(Color::rgb(255, 165, 0)),
		"red" => Ok(Color::rgb(255, 0, 0)),
		_ => Err(ConfigError::InvalidColor(name.to_string())),
	}
}

/// Parse a font style keyword.
pub fn parse_font_style(value: &str) -> Result<FontStyle> {
	match value.trim().to_lowercase().as_str() {
		"normal" => Ok(FontStyle::Normal),
		"italic" => Ok(FontStyle::Italic),
		"oblique" => Ok(FontStyle::Oblique),
		_ => Err(ConfigError::InvalidFontStyle(value.to_string())),
	}
}
