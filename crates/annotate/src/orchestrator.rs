//! Whole-document annotation runs.
//!
//! A run probes the hover source for readiness, annotates every line in
//! bounded-width batches, publishes partial results while it goes, and
//! finally commits the complete set to the [`AnnotationStore`]. Cancellation
//! is observed between lines and between batches; a cancelled or superseded
//! run never commits.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use noteline_config::ConfigSource;
use noteline_primitives::{Annotation, AnnotationSet, DocumentId, DocumentSnapshot};
use noteline_worker::{RunToken, TaskClass, spawn};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::hover::HoverSource;
use crate::line::annotate_line;
use crate::probe::{ProbePolicy, probe};
use crate::store::{AnnotationStore, RunPhase};
use crate::surface::{ProgressSurface, RenderSurface};

/// Scheduling knobs for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineTuning {
	/// Lines annotated concurrently per batch.
	pub batch_width: usize,
	/// Publish partial results each time this many annotations are found.
	pub publish_every: usize,
	/// Report progress each time this many lines complete.
	pub progress_every: usize,
	pub probe: ProbePolicy,
}

impl Default for PipelineTuning {
	fn default() -> Self {
		Self {
			batch_width: 10,
			publish_every: 5,
			progress_every: 5,
			probe: ProbePolicy::default(),
		}
	}
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
	/// The run committed `found` annotations over `total` lines.
	Completed { found: usize, total: usize, elapsed: Duration },
	/// The run was cancelled or superseded and committed nothing.
	Cancelled,
}

/// Runs the annotation pipeline against host services.
pub struct Annotator {
	hover: Arc<dyn HoverSource>,
	render: Arc<dyn RenderSurface>,
	progress: Arc<dyn ProgressSurface>,
	config: Arc<dyn ConfigSource>,
	store: Arc<AnnotationStore>,
	tuning: PipelineTuning,
}

impl Annotator {
	pub fn new(
		hover: Arc<dyn HoverSource>,
		render: Arc<dyn RenderSurface>,
		progress: Arc<dyn ProgressSurface>,
		config: Arc<dyn ConfigSource>,
		store: Arc<AnnotationStore>,
	) -> Self {
		Self {
			hover,
			render,
			progress,
			config,
			store,
			tuning: PipelineTuning::default(),
		}
	}

	pub fn with_tuning(mut self, tuning: PipelineTuning) -> Self {
		self.tuning = tuning;
		self
	}

	pub fn store(&self) -> &Arc<AnnotationStore> {
		&self.store
	}

	pub fn config(&self) -> &Arc<dyn ConfigSource> {
		&self.config
	}

	pub fn render(&self) -> &Arc<dyn RenderSurface> {
		&self.render
	}

	pub fn progress(&self) -> &Arc<dyn ProgressSurface> {
		&self.progress
	}

	/// Starts a background run for `doc`. See [`Annotator::launch_as`].
	pub fn launch(self: &Arc<Self>, doc: Arc<DocumentSnapshot>) -> JoinHandle<RunOutcome> {
		self.launch_as(TaskClass::Background, doc)
	}

	/// Starts a run for `doc`, spawned under `class`.
	///
	/// Any previous run for the document is cancelled before this returns. The
	/// run's store registration is released when it finishes.
	pub fn launch_as(self: &Arc<Self>, class: TaskClass, doc: Arc<DocumentSnapshot>) -> JoinHandle<RunOutcome> {
		let token = self.store.begin_run(doc.id());
		let this = Arc::clone(self);
		spawn(class, async move {
			let id = doc.id().clone();
			let outcome = this.run(doc, token.clone()).await;
			this.store.end_run(&id, &token);
			outcome
		})
	}

	/// Annotates `doc` under `token`.
	///
	/// `token` should come from [`AnnotationStore::begin_run`]; a token that is
	/// not the current run for the document can never commit.
	pub async fn run(&self, doc: Arc<DocumentSnapshot>, token: RunToken) -> RunOutcome {
		let id = doc.id().clone();
		let started = Instant::now();
		debug!(doc = %id, generation = token.generation(), lines = doc.line_count(), "run.start");

		self.store.set_phase(&id, &token, RunPhase::Probing);
		let ready = probe(&doc, self.hover.as_ref(), &token, &self.tuning.probe).await;
		if token.is_cancelled() {
			return self.cancelled(&id, &token, "probe");
		}
		if !ready {
			debug!(doc = %id, "hover source not confirmed ready, scanning anyway");
		}

		let config = self.config.resolve().annotate;
		self.store.set_phase(&id, &token, RunPhase::Scanning);

		let total = doc.line_count();
		let batch_width = self.tuning.batch_width.max(1);
		let publish_every = self.tuning.publish_every.max(1);
		let progress_every = self.tuning.progress_every.max(1);
		self.progress.show_progress(&id, 0, total);

		let mut found: Vec<Annotation> = Vec::new();
		let mut completed = 0usize;
		let mut batch_start = 0usize;
		while batch_start < total {
			if token.is_cancelled() {
				return self.cancelled(&id, &token, "scan");
			}
			let batch_end = (batch_start + batch_width).min(total);
			let results = join_all(
				(batch_start..batch_end).map(|idx| annotate_line(&doc, idx, &config, self.hover.as_ref(), &token)),
			)
			.await;

			for result in results {
				completed += 1;
				if completed % progress_every == 0 || completed == total {
					self.progress.show_progress(&id, completed, total);
				}
				let Some(annotation) = result else {
					continue;
				};
				found.push(annotation);
				if found.len() % publish_every == 0 && !token.is_cancelled() {
					self.publish(&id, found.clone().into());
				}
			}
			batch_start = batch_end;
		}

		if token.is_cancelled() {
			return self.cancelled(&id, &token, "scan");
		}
		let count = found.len();
		let set: AnnotationSet = found.into();
		if !self.store.commit(&id, &token, set.clone()) {
			return self.cancelled(&id, &token, "commit");
		}
		self.publish(&id, set);

		let elapsed = started.elapsed();
		self.progress.show_done(&id, count, elapsed);
		info!(doc = %id, found = count, total, elapsed_ms = elapsed.as_millis() as u64, "run.completed");
		RunOutcome::Completed { found: count, total, elapsed }
	}

	fn publish(&self, id: &DocumentId, set: AnnotationSet) {
		if let Err(error) = self.render.render(id, set) {
			warn!(doc = %id, %error, "render failed");
		}
	}

	fn cancelled(&self, id: &DocumentId, token: &RunToken, stage: &'static str) -> RunOutcome {
		self.store.set_phase(id, token, RunPhase::Cancelled);
		debug!(doc = %id, generation = token.generation(), stage, "run.cancelled");
		RunOutcome::Cancelled
	}
}
