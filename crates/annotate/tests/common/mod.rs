#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use noteline_annotate::scan::identifier_at;
use noteline_annotate::{AnnotationStore, Annotator, HoverError, HoverSource, NoProgress, RenderSurface, SurfaceError};
use noteline_config::{Config, ConfigSource, StaticConfig};
use noteline_primitives::{AnnotationSet, DocumentId, DocumentSnapshot, HoverFragment, Position};
use parking_lot::Mutex;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("noteline_annotate=debug").try_init();
}

pub fn java(uri: &str, text: &str) -> Arc<DocumentSnapshot> {
	Arc::new(DocumentSnapshot::from_text(DocumentId::new(uri), "java", text))
}

/// Language-server stand-in: documentation keyed by identifier, resolved
/// against the registered document text.
#[derive(Default)]
pub struct FakeServer {
	entries: HashMap<String, Vec<HoverFragment>>,
	latency: Option<Duration>,
	documents: Mutex<HashMap<DocumentId, Arc<DocumentSnapshot>>>,
	queries: Mutex<Vec<(DocumentId, Position)>>,
}

impl FakeServer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn entry(mut self, name: &str, fragments: Vec<HoverFragment>) -> Self {
		self.entries.insert(name.to_string(), fragments);
		self
	}

	pub fn documented(self, name: &str, summary: &str) -> Self {
		self.entry(name, vec![HoverFragment::Markdown(summary.to_string())])
	}

	pub fn latency(mut self, latency: Duration) -> Self {
		self.latency = Some(latency);
		self
	}

	pub fn open(&self, doc: &Arc<DocumentSnapshot>) {
		self.documents.lock().insert(doc.id().clone(), doc.clone());
	}

	pub fn queries(&self) -> Vec<(DocumentId, Position)> {
		self.queries.lock().clone()
	}
}

#[async_trait]
impl HoverSource for FakeServer {
	async fn hover(&self, id: &DocumentId, position: Position) -> Result<Vec<HoverFragment>, HoverError> {
		self.queries.lock().push((id.clone(), position));
		if let Some(latency) = self.latency {
			tokio::time::sleep(latency).await;
		}
		let doc = self.documents.lock().get(id).cloned().ok_or(HoverError::NotReady)?;
		let name = doc
			.line(position.line as usize)
			.and_then(|line| identifier_at(line, position.character))
			.unwrap_or_default();
		Ok(self.entries.get(name).cloned().unwrap_or_default())
	}
}

/// Render surface keeping only what is currently visible.
#[derive(Default)]
pub struct Canvas {
	shown: Mutex<HashMap<DocumentId, AnnotationSet>>,
	renders: Mutex<usize>,
}

impl Canvas {
	pub fn shown(&self, id: &DocumentId) -> Option<AnnotationSet> {
		self.shown.lock().get(id).cloned()
	}

	pub fn render_count(&self) -> usize {
		*self.renders.lock()
	}
}

impl RenderSurface for Canvas {
	fn render(&self, id: &DocumentId, set: AnnotationSet) -> Result<(), SurfaceError> {
		*self.renders.lock() += 1;
		self.shown.lock().insert(id.clone(), set);
		Ok(())
	}

	fn clear_all(&self, id: &DocumentId) -> Result<(), SurfaceError> {
		self.shown.lock().remove(id);
		Ok(())
	}
}

pub struct Pipeline {
	pub server: Arc<FakeServer>,
	pub canvas: Arc<Canvas>,
	pub annotator: Arc<Annotator>,
}

impl Pipeline {
	pub fn new(server: FakeServer) -> Self {
		Self::with_config(server, Arc::new(StaticConfig(Config::default())))
	}

	pub fn with_config(server: FakeServer, config: Arc<dyn ConfigSource>) -> Self {
		let server = Arc::new(server);
		let canvas = Arc::new(Canvas::default());
		let annotator = Arc::new(Annotator::new(
			server.clone(),
			canvas.clone(),
			Arc::new(NoProgress),
			config,
			Arc::new(AnnotationStore::new()),
		));
		Self { server, canvas, annotator }
	}

	pub fn store(&self) -> &AnnotationStore {
		self.annotator.store()
	}
}
