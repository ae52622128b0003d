use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Monotonic generation clock for run tokens.
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	next: Arc<AtomicU64>,
}

impl GenerationClock {
	/// Creates a new generation clock starting at generation 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the next generation ID.
	pub fn next(&self) -> u64 {
		self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}
}

/// Generation-scoped cancellation token for one run or timer.
///
/// Clones share cancellation state. Two tokens are the same run iff their
/// generations match; bookkeeping compares generations rather than pointer
/// identity.
#[derive(Debug, Clone)]
pub struct RunToken {
	generation: u64,
	cancel: CancellationToken,
}

impl RunToken {
	/// Creates a new token for `generation`.
	pub fn new(generation: u64) -> Self {
		Self {
			generation,
			cancel: CancellationToken::new(),
		}
	}

	/// Returns generation ID.
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true when cancellation is requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Requests cancellation.
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Sleeps for `duration` unless cancelled first.
	///
	/// Returns `true` if the full duration elapsed, `false` on cancellation.
	pub async fn sleep(&self, duration: Duration) -> bool {
		tokio::select! {
			biased;
			_ = self.cancel.cancelled() => false,
			_ = tokio::time::sleep(duration) => true,
		}
	}
}
