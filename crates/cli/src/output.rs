//! Terminal surfaces: captured annotations and logged progress.

use std::collections::HashMap;
use std::time::Duration;

use noteline_annotate::{ProgressSurface, RenderSurface, SurfaceError};
use noteline_primitives::{AnnotationSet, DocumentId, DocumentSnapshot};
use parking_lot::Mutex;
use tracing::info;

/// Keeps the latest rendered set per document for printing once a run ends.
#[derive(Default)]
pub struct CaptureSurface {
	shown: Mutex<HashMap<DocumentId, AnnotationSet>>,
}

impl CaptureSurface {
	pub fn shown(&self, id: &DocumentId) -> Option<AnnotationSet> {
		self.shown.lock().get(id).cloned()
	}
}

impl RenderSurface for CaptureSurface {
	fn render(&self, id: &DocumentId, set: AnnotationSet) -> Result<(), SurfaceError> {
		self.shown.lock().insert(id.clone(), set);
		Ok(())
	}

	fn clear_all(&self, id: &DocumentId) -> Result<(), SurfaceError> {
		self.shown.lock().remove(id);
		Ok(())
	}
}

/// Reports progress through the log.
pub struct LogProgress;

impl ProgressSurface for LogProgress {
	fn show_progress(&self, id: &DocumentId, completed: usize, total: usize) {
		info!(doc = %id, "analyzing {completed}/{total}");
	}

	fn show_done(&self, id: &DocumentId, found: usize, elapsed: Duration) {
		info!(doc = %id, "{found} annotations in {:.1}s", elapsed.as_secs_f64());
	}

	fn hide(&self) {}
}

/// Renders `doc` with each annotation appended to its line.
///
/// Line breaks are reproduced as `\n`, so a source ending in a newline renders
/// ending in one too.
pub fn annotated_source(doc: &DocumentSnapshot, set: &AnnotationSet) -> String {
	let by_line: HashMap<usize, &str> = set.iter().map(|a| (a.line as usize, a.text.as_str())).collect();
	let mut out = String::new();
	for (idx, line) in doc.lines().enumerate() {
		if idx > 0 {
			out.push('\n');
		}
		out.push_str(line);
		if let Some(annotation) = by_line.get(&idx) {
			out.push_str(annotation);
		}
	}
	out
}
