//! Output surfaces owned by the host: annotation rendering and progress.

use std::time::Duration;

use noteline_primitives::{AnnotationSet, DocumentId};
use thiserror::Error;

/// Failures from a host surface. Each one aborts only the operation that
/// raised it.
#[derive(Debug, Error)]
pub enum SurfaceError {
	/// The surface has not been created yet.
	#[error("render surface not initialized")]
	Uninitialized,
	/// No visible view shows the document.
	#[error("no visible view for {0}")]
	NotVisible(DocumentId),
}

/// Renders inline annotations.
pub trait RenderSurface: Send + Sync {
	/// Replaces every annotation currently rendered for `id` with `set`.
	fn render(&self, id: &DocumentId, set: AnnotationSet) -> Result<(), SurfaceError>;

	/// Removes every annotation rendered for `id`.
	fn clear_all(&self, id: &DocumentId) -> Result<(), SurfaceError>;
}

/// Reports run progress, typically in a status bar.
pub trait ProgressSurface: Send + Sync {
	fn show_progress(&self, id: &DocumentId, completed: usize, total: usize);

	fn show_done(&self, id: &DocumentId, found: usize, elapsed: Duration);

	fn hide(&self);
}

/// A progress surface that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSurface for NoProgress {
	fn show_progress(&self, _id: &DocumentId, _completed: usize, _total: usize) {}

	fn show_done(&self, _id: &DocumentId, _found: usize, _elapsed: Duration) {}

	fn hide(&self) {}
}
