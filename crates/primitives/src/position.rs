/// Zero-based line/character position.
///
/// `character` counts UTF-16 code units, the LSP default encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
	/// Zero-based line index.
	pub line: u32,
	/// Zero-based UTF-16 offset in the line.
	pub character: u32,
}

impl Position {
	/// Creates a new position.
	pub const fn new(line: u32, character: u32) -> Self {
		Self { line, character }
	}
}

impl From<Position> for lsp_types::Position {
	fn from(pos: Position) -> Self {
		lsp_types::Position {
			line: pos.line,
			character: pos.character,
		}
	}
}

impl From<lsp_types::Position> for Position {
	fn from(pos: lsp_types::Position) -> Self {
		Self::new(pos.line, pos.character)
	}
}

/// Returns the length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> u32 {
	text.chars().map(|c| c.len_utf16() as u32).sum()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn utf16_len_counts_surrogate_pairs() {
		assert_eq!(utf16_len("abc"), 3);
		assert_eq!(utf16_len("é"), 1);
		assert_eq!(utf16_len("😀x"), 3);
	}

	#[test]
	fn converts_to_lsp_position() {
		let pos: lsp_types::Position = Position::new(4, 7).into();
		assert_eq!(pos.line, 4);
		assert_eq!(pos.character, 7);
	}
}
