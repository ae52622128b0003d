use std::sync::Arc;

use crate::DocumentId;

/// Read-only view of one document taken at a point in time.
///
/// The host builds a new snapshot after every edit. A pipeline run holds one
/// snapshot (behind an [`Arc`]) from start to finish and never observes later
/// edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
	id: DocumentId,
	language: Arc<str>,
	lines: Vec<String>,
}

impl DocumentSnapshot {
	/// Creates a snapshot from pre-split lines.
	pub fn new(id: DocumentId, language: impl Into<Arc<str>>, lines: Vec<String>) -> Self {
		Self {
			id,
			language: language.into(),
			lines,
		}
	}

	/// Creates a snapshot by splitting `text` on line breaks.
	///
	/// Both `\n` and `\r\n` terminators are accepted. A trailing terminator
	/// yields a final empty line, matching how editors count lines.
	pub fn from_text(id: DocumentId, language: impl Into<Arc<str>>, text: &str) -> Self {
		let lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line).to_string()).collect();
		Self::new(id, language, lines)
	}

	pub fn id(&self) -> &DocumentId {
		&self.id
	}

	/// Language tag, e.g. `java`.
	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	/// Returns the text of line `idx` without its terminator.
	pub fn line(&self, idx: usize) -> Option<&str> {
		self.lines.get(idx).map(String::as_str)
	}

	pub fn lines(&self) -> impl Iterator<Item = &str> {
		self.lines.iter().map(String::as_str)
	}
}
