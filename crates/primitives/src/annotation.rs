use std::sync::Arc;

use serde::Serialize;

use crate::Color;

/// Font style applied to an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
	Normal,
	#[default]
	Italic,
	Oblique,
}

impl FontStyle {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Normal => "normal",
			Self::Italic => "italic",
			Self::Oblique => "oblique",
		}
	}
}

/// Rendering hints for an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnnotationStyle {
	/// Text color.
	pub color: Color,
	/// Font style.
	pub font_style: FontStyle,
	/// Gap between the end of the line and the annotation, in ems.
	pub margin_left_em: u8,
}

impl Default for AnnotationStyle {
	fn default() -> Self {
		Self {
			color: Color::default(),
			font_style: FontStyle::default(),
			margin_left_em: 1,
		}
	}
}

/// Inline text rendered after the end of one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
	/// Zero-based line the annotation belongs to.
	pub line: u32,
	/// UTF-16 column the annotation is anchored at (the end of the line).
	pub anchor: u32,
	/// Display text, including the leading comment prefix.
	pub text: String,
	pub style: AnnotationStyle,
}

/// Ordered annotations for one document.
///
/// Published and cached behind an [`Arc`] so partial and final snapshots can
/// be handed to the rendering surface without copying.
pub type AnnotationSet = Arc<[Annotation]>;
