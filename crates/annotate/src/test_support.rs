//! Stub host services for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use noteline_primitives::{AnnotationSet, DocumentId, DocumentSnapshot, HoverFragment, Position};
use parking_lot::Mutex;

use crate::hover::{HoverError, HoverSource};
use crate::scan::identifier_at;
use crate::surface::{ProgressSurface, RenderSurface, SurfaceError};

pub(crate) fn snapshot(lines: &[&str]) -> DocumentSnapshot {
	snapshot_for("file:///test/Main.java", lines)
}

pub(crate) fn snapshot_for(uri: &str, lines: &[&str]) -> DocumentSnapshot {
	DocumentSnapshot::new(DocumentId::new(uri), "java", lines.iter().map(|line| line.to_string()).collect())
}

/// Hover source answering by identifier name.
///
/// Documents are resolved through [`ScriptedHover::track`]; unknown
/// documents and unknown identifiers answer with no fragments.
#[derive(Default)]
pub(crate) struct ScriptedHover {
	docs: HashMap<String, String>,
	failing: HashSet<String>,
	cold: AtomicUsize,
	latency: Option<Duration>,
	calls: AtomicUsize,
	texts: Mutex<HashMap<DocumentId, Arc<[String]>>>,
}

impl ScriptedHover {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn with_doc(mut self, name: &str, markdown: &str) -> Self {
		self.docs.insert(name.to_string(), markdown.to_string());
		self
	}

	pub(crate) fn failing(mut self, name: &str) -> Self {
		self.failing.insert(name.to_string());
		self
	}

	/// The first `calls` queries answer with nothing.
	pub(crate) fn cold_for(self, calls: usize) -> Self {
		self.cold.store(calls, Ordering::SeqCst);
		self
	}

	pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = Some(latency);
		self
	}

	pub(crate) fn track(&self, doc: &DocumentSnapshot) {
		let lines: Arc<[String]> = doc.lines().map(str::to_string).collect();
		self.texts.lock().insert(doc.id().clone(), lines);
	}

	pub(crate) fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl HoverSource for ScriptedHover {
	async fn hover(&self, id: &DocumentId, position: Position) -> Result<Vec<HoverFragment>, HoverError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(latency) = self.latency {
			tokio::time::sleep(latency).await;
		}
		if self.cold.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)).is_ok() {
			return Ok(Vec::new());
		}

		let name = {
			let texts = self.texts.lock();
			let Some(lines) = texts.get(id) else {
				return Ok(Vec::new());
			};
			let Some(line) = lines.get(position.line as usize) else {
				return Ok(Vec::new());
			};
			match identifier_at(line, position.character) {
				Some(name) => name.to_string(),
				None => return Ok(Vec::new()),
			}
		};

		if self.failing.contains(&name) {
			return Err(HoverError::Service(format!("no hover for {name}")));
		}
		Ok(self.docs.get(&name).map(|doc| vec![HoverFragment::Markdown(doc.clone())]).unwrap_or_default())
	}
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Rendered {
	Set(DocumentId, AnnotationSet),
	Cleared(DocumentId),
}

/// Render surface recording every call.
#[derive(Default)]
pub(crate) struct RecordingSurface {
	pub(crate) calls: Mutex<Vec<Rendered>>,
	pub(crate) fail: bool,
}

impl RecordingSurface {
	pub(crate) fn failing() -> Self {
		Self {
			fail: true,
			..Self::default()
		}
	}

	pub(crate) fn renders(&self) -> Vec<Rendered> {
		self.calls.lock().clone()
	}

	pub(crate) fn last_set(&self, id: &DocumentId) -> Option<AnnotationSet> {
		self.calls.lock().iter().rev().find_map(|call| match call {
			Rendered::Set(doc, set) if doc == id => Some(set.clone()),
			_ => None,
		})
	}
}

impl RenderSurface for RecordingSurface {
	fn render(&self, id: &DocumentId, set: AnnotationSet) -> Result<(), SurfaceError> {
		if self.fail {
			return Err(SurfaceError::NotVisible(id.clone()));
		}
		self.calls.lock().push(Rendered::Set(id.clone(), set));
		Ok(())
	}

	fn clear_all(&self, id: &DocumentId) -> Result<(), SurfaceError> {
		if self.fail {
			return Err(SurfaceError::Uninitialized);
		}
		self.calls.lock().push(Rendered::Cleared(id.clone()));
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Status {
	Progress(usize, usize),
	Done(usize),
	Hidden,
}

/// Progress surface recording every call.
#[derive(Default)]
pub(crate) struct RecordingProgress {
	pub(crate) events: Mutex<Vec<Status>>,
}

impl RecordingProgress {
	pub(crate) fn events(&self) -> Vec<Status> {
		self.events.lock().clone()
	}
}

impl ProgressSurface for RecordingProgress {
	fn show_progress(&self, _id: &DocumentId, completed: usize, total: usize) {
		self.events.lock().push(Status::Progress(completed, total));
	}

	fn show_done(&self, _id: &DocumentId, found: usize, _elapsed: Duration) {
		self.events.lock().push(Status::Done(found));
	}

	fn hide(&self) {
		self.events.lock().push(Status::Hidden);
	}
}
