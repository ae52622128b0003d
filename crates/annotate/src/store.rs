//! Per-document run bookkeeping and annotation cache.
//!
//! One [`AnnotationStore`] lives for the whole session and is shared by
//! reference with every component. For each document it tracks:
//!
//! - the current run token (at most one live run per document),
//! - the debounce timer token (single slot, latest edit wins),
//! - the last committed [`AnnotationSet`],
//! - the [`RunPhase`] of the current run.
//!
//! Tokens are matched by generation, so a stale run that finishes late can
//! neither commit its result nor clear a newer run's bookkeeping.

use std::collections::HashMap;

use noteline_primitives::{AnnotationSet, DocumentId};
use noteline_worker::{GenerationClock, RunToken};
use parking_lot::Mutex;
use tracing::trace;

/// Lifecycle of one annotation run.
///
/// `Idle -> Probing -> Scanning -> Completed`, with `Cancelled` reachable
/// from `Probing` and `Scanning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
	#[default]
	Idle,
	Probing,
	Scanning,
	Completed,
	Cancelled,
}

#[derive(Debug, Default)]
struct DocEntry {
	run: Option<RunToken>,
	debounce: Option<RunToken>,
	cached: Option<AnnotationSet>,
	phase: RunPhase,
}

impl DocEntry {
	fn is_current_run(&self, token: &RunToken) -> bool {
		self.run.as_ref().is_some_and(|run| run.generation() == token.generation())
	}

	fn cancel_run(&mut self) -> bool {
		match self.run.take() {
			Some(run) => {
				run.cancel();
				true
			}
			None => false,
		}
	}
}

/// Session-wide store of per-document run state and cached annotations.
#[derive(Debug, Default)]
pub struct AnnotationStore {
	docs: Mutex<HashMap<DocumentId, DocEntry>>,
	clock: GenerationClock,
}

impl AnnotationStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the last committed annotations for `id`.
	pub fn get_cached(&self, id: &DocumentId) -> Option<AnnotationSet> {
		self.docs.lock().get(id).and_then(|entry| entry.cached.clone())
	}

	/// Replaces the cached annotations for `id` unconditionally.
	pub fn set_cached(&self, id: &DocumentId, set: AnnotationSet) {
		self.docs.lock().entry(id.clone()).or_default().cached = Some(set);
	}

	/// Drops the cache for `id` and cancels its live run, if any.
	pub fn invalidate(&self, id: &DocumentId) {
		let mut docs = self.docs.lock();
		let Some(entry) = docs.get_mut(id) else {
			return;
		};
		entry.cached = None;
		if entry.cancel_run() {
			entry.phase = RunPhase::Cancelled;
		}
		trace!(doc = %id, "store.invalidate");
	}

	/// Cancels any live run for `id` and registers a fresh token.
	///
	/// The previous token is cancelled before the new one is returned, so the
	/// new run cannot issue a query while the old one is still live.
	pub fn begin_run(&self, id: &DocumentId) -> RunToken {
		let token = RunToken::new(self.clock.next());
		let mut docs = self.docs.lock();
		let entry = docs.entry(id.clone()).or_default();
		entry.cancel_run();
		entry.run = Some(token.clone());
		entry.phase = RunPhase::Idle;
		trace!(doc = %id, generation = token.generation(), "store.begin_run");
		token
	}

	/// Unregisters `token` if it is still the current run for `id`.
	///
	/// Returns false when a newer run (or a close) already replaced it.
	pub fn end_run(&self, id: &DocumentId, token: &RunToken) -> bool {
		let mut docs = self.docs.lock();
		let Some(entry) = docs.get_mut(id) else {
			return false;
		};
		if !entry.is_current_run(token) {
			return false;
		}
		entry.run = None;
		true
	}

	/// Stores `set` as the result of run `token`.
	///
	/// Succeeds only while `token` is the live current run for `id`; the check
	/// and the cache replacement happen under one lock.
	pub fn commit(&self, id: &DocumentId, token: &RunToken, set: AnnotationSet) -> bool {
		let mut docs = self.docs.lock();
		let Some(entry) = docs.get_mut(id) else {
			return false;
		};
		if token.is_cancelled() || !entry.is_current_run(token) {
			return false;
		}
		entry.cached = Some(set);
		entry.phase = RunPhase::Completed;
		true
	}

	/// Returns the phase of the latest run for `id`.
	pub fn phase(&self, id: &DocumentId) -> RunPhase {
		self.docs.lock().get(id).map(|entry| entry.phase).unwrap_or_default()
	}

	/// Records `phase` for run `token`; ignored once the run is superseded.
	pub fn set_phase(&self, id: &DocumentId, token: &RunToken, phase: RunPhase) -> bool {
		let mut docs = self.docs.lock();
		match docs.get_mut(id) {
			Some(entry) if entry.is_current_run(token) => {
				entry.phase = phase;
				true
			}
			_ => false,
		}
	}

	/// Re-arms the debounce slot for `id`, cancelling the pending timer.
	pub fn begin_debounce(&self, id: &DocumentId) -> RunToken {
		let timer = RunToken::new(self.clock.next());
		let mut docs = self.docs.lock();
		let entry = docs.entry(id.clone()).or_default();
		if let Some(prev) = entry.debounce.replace(timer.clone()) {
			prev.cancel();
		}
		timer
	}

	/// Takes the debounce slot if `timer` still owns it.
	///
	/// Returns true exactly once for the latest timer of a quiet period.
	pub fn end_debounce(&self, id: &DocumentId, timer: &RunToken) -> bool {
		let mut docs = self.docs.lock();
		let Some(entry) = docs.get_mut(id) else {
			return false;
		};
		if timer.is_cancelled() || entry.debounce.as_ref().is_none_or(|slot| slot.generation() != timer.generation()) {
			return false;
		}
		entry.debounce = None;
		true
	}

	/// Cancels the pending debounce timer for `id`.
	///
	/// Returns true if a timer was armed.
	pub fn cancel_debounce(&self, id: &DocumentId) -> bool {
		let mut docs = self.docs.lock();
		match docs.get_mut(id).and_then(|entry| entry.debounce.take()) {
			Some(timer) => {
				timer.cancel();
				true
			}
			None => false,
		}
	}

	/// Forgets `id` entirely, cancelling its run and pending timer.
	pub fn remove(&self, id: &DocumentId) {
		if let Some(mut entry) = self.docs.lock().remove(id) {
			entry.cancel_run();
			if let Some(timer) = entry.debounce.take() {
				timer.cancel();
			}
		}
	}

	/// Cancels every run and timer and drops all caches.
	pub fn clear(&self) {
		let mut docs = self.docs.lock();
		for entry in docs.values_mut() {
			entry.cancel_run();
			if let Some(timer) = entry.debounce.take() {
				timer.cancel();
			}
		}
		docs.clear();
	}

	/// Number of documents with a live run.
	pub fn active_runs(&self) -> usize {
		self.docs.lock().values().filter(|entry| entry.run.is_some()).count()
	}

	/// Returns true if `id` has a live run.
	pub fn is_running(&self, id: &DocumentId) -> bool {
		self.docs.lock().get(id).is_some_and(|entry| entry.run.is_some())
	}
}
