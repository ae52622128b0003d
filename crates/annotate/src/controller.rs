//! Host event handling.
//!
//! The [`Controller`] maps editor lifecycle events onto annotation runs:
//! edits are debounced per document, view switches reuse the cache, closes
//! release everything. Documents in languages outside the configured set are
//! ignored throughout.

use std::sync::Arc;
use std::time::Duration;

use noteline_primitives::{DocumentId, DocumentSnapshot};
use noteline_worker::{TaskClass, spawn};
use tracing::{debug, info, trace, warn};

use crate::orchestrator::{Annotator, RunOutcome};

/// How long the completion status stays visible after a run.
pub const STATUS_LINGER: Duration = Duration::from_secs(3);

/// Lifecycle events reported by the host editor.
#[derive(Debug, Clone)]
pub enum HostEvent {
	/// A document was opened. Opening alone does not start a run.
	Opened(Arc<DocumentSnapshot>),
	/// A document's text changed; carries the new snapshot.
	Changed(Arc<DocumentSnapshot>),
	/// The focused view changed, possibly to nothing.
	ActiveViewChanged(Option<Arc<DocumentSnapshot>>),
	/// A document was closed.
	Closed(DocumentId),
}

/// What the controller did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
	Ignored,
	/// The document's language is not configured.
	Unsupported,
	Tracked,
	/// A debounced run was scheduled.
	Scheduled,
	Started,
	/// Cached annotations were re-rendered without a run.
	Restored,
	Closed,
}

/// Routes host events to annotation runs.
pub struct Controller {
	annotator: Arc<Annotator>,
}

impl Controller {
	pub fn new(annotator: Arc<Annotator>) -> Self {
		Self { annotator }
	}

	pub fn annotator(&self) -> &Arc<Annotator> {
		&self.annotator
	}

	/// Starts runs for every visible document in a supported language.
	///
	/// Returns the number of runs started.
	pub fn activate<I>(&self, visible: I) -> usize
	where
		I: IntoIterator<Item = Arc<DocumentSnapshot>>,
	{
		let config = self.annotator.config().resolve();
		let mut started = 0;
		for doc in visible {
			if config.supports(doc.language()) {
				start_run(&self.annotator, TaskClass::Background, doc);
				started += 1;
			}
		}
		info!(started, "controller.activate");
		started
	}

	/// Cancels every run and pending timer, drops all caches and hides the
	/// status.
	pub fn deactivate(&self) {
		self.annotator.store().clear();
		self.annotator.progress().hide();
		info!("controller.deactivate");
	}

	pub fn handle(&self, event: HostEvent) -> Dispatch {
		match event {
			HostEvent::Opened(doc) => {
				if !self.supports(&doc) {
					return Dispatch::Unsupported;
				}
				trace!(doc = %doc.id(), "controller.opened");
				Dispatch::Tracked
			}
			HostEvent::Changed(doc) => self.schedule(doc),
			HostEvent::ActiveViewChanged(Some(doc)) => self.restore_or_run(doc),
			HostEvent::ActiveViewChanged(None) => Dispatch::Ignored,
			HostEvent::Closed(id) => self.close(&id),
		}
	}

	/// Discards the cache for `doc` and starts a fresh run immediately,
	/// superseding any pending edit timer.
	pub fn refresh(&self, doc: Arc<DocumentSnapshot>) -> Dispatch {
		if !self.supports(&doc) {
			info!(doc = %doc.id(), language = doc.language(), "refresh skipped: language not supported");
			return Dispatch::Unsupported;
		}
		let store = self.annotator.store();
		store.invalidate(doc.id());
		store.cancel_debounce(doc.id());
		start_run(&self.annotator, TaskClass::Interactive, doc);
		Dispatch::Started
	}

	fn supports(&self, doc: &DocumentSnapshot) -> bool {
		self.annotator.config().resolve().supports(doc.language())
	}

	fn schedule(&self, doc: Arc<DocumentSnapshot>) -> Dispatch {
		let config = self.annotator.config().resolve();
		if !config.supports(doc.language()) {
			return Dispatch::Unsupported;
		}

		let store = self.annotator.store();
		store.invalidate(doc.id());
		let timer = store.begin_debounce(doc.id());
		let quiet = config.debounce;
		let annotator = Arc::clone(&self.annotator);
		spawn(TaskClass::Background, async move {
			if !timer.sleep(quiet).await || !annotator.store().end_debounce(doc.id(), &timer) {
				return;
			}
			trace!(doc = %doc.id(), "controller.debounce_elapsed");
			start_run(&annotator, TaskClass::Background, doc);
		});
		Dispatch::Scheduled
	}

	fn restore_or_run(&self, doc: Arc<DocumentSnapshot>) -> Dispatch {
		if !self.supports(&doc) {
			return Dispatch::Unsupported;
		}
		let store = self.annotator.store();
		match store.get_cached(doc.id()) {
			Some(set) => {
				if let Err(error) = self.annotator.render().render(doc.id(), set) {
					warn!(doc = %doc.id(), %error, "render failed");
				}
				Dispatch::Restored
			}
			None => {
				// A pending edit timer would restart this run.
				if store.cancel_debounce(doc.id()) {
					trace!(doc = %doc.id(), "controller.debounce_preempted");
				}
				start_run(&self.annotator, TaskClass::Interactive, doc);
				Dispatch::Started
			}
		}
	}

	fn close(&self, id: &DocumentId) -> Dispatch {
		self.annotator.store().remove(id);
		if let Err(error) = self.annotator.render().clear_all(id) {
			debug!(doc = %id, %error, "clear failed");
		}
		Dispatch::Closed
	}
}

/// Launches a run and hides the status [`STATUS_LINGER`] after it completes,
/// unless another run is live by then.
fn start_run(annotator: &Arc<Annotator>, class: TaskClass, doc: Arc<DocumentSnapshot>) {
	let run = annotator.launch_as(class, doc);
	let annotator = Arc::clone(annotator);
	spawn(TaskClass::Background, async move {
		match run.await {
			Ok(RunOutcome::Completed { .. }) => {
				tokio::time::sleep(STATUS_LINGER).await;
				if annotator.store().active_runs() == 0 {
					annotator.progress().hide();
				}
			}
			Ok(RunOutcome::Cancelled) => {}
			Err(error) => warn!(%error, "annotation run aborted"),
		}
	});
}
