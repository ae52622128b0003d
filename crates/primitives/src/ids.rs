use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Stable key for one open text buffer.
///
/// Holds the canonical resource URI of the buffer. The same id is reused
/// across edits of the buffer; closing and reopening the file yields an equal
/// id but a fresh entry in every per-document table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(Arc<str>);

impl DocumentId {
	/// Creates an id from an already canonical URI string.
	pub fn new(uri: impl Into<Arc<str>>) -> Self {
		Self(uri.into())
	}

	/// Creates a `file://` id from an absolute filesystem path.
	///
	/// Returns `None` for relative paths or paths that cannot be expressed
	/// as a file URL.
	pub fn from_path(path: &Path) -> Option<Self> {
		let url = url::Url::from_file_path(path).ok()?;
		Some(Self(url.as_str().into()))
	}

	/// Returns the URI string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for DocumentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for DocumentId {
	fn from(uri: &str) -> Self {
		Self::new(uri)
	}
}
