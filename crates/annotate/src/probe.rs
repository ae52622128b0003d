//! Readiness probing of the hover source.
//!
//! Language servers answer hover requests with nothing while they index. A run
//! first waits, with capped exponential backoff, until a known call site
//! yields documentation.

use std::time::Duration;

use noteline_primitives::DocumentSnapshot;
use noteline_worker::RunToken;
use tracing::{debug, trace};

use crate::hover::HoverSource;
use crate::scan::scan;

/// Backoff schedule for [`probe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePolicy {
	/// Delay after the first failed attempt.
	pub initial_delay: Duration,
	/// Upper bound on a single delay.
	pub max_delay: Duration,
	/// Upper bound on the cumulative delay.
	pub budget: Duration,
	/// Number of leading lines searched for a probe target.
	pub probe_lines: usize,
}

impl Default for ProbePolicy {
	fn default() -> Self {
		Self {
			initial_delay: Duration::from_millis(200),
			max_delay: Duration::from_millis(2000),
			budget: Duration::from_secs(60),
			probe_lines: 20,
		}
	}
}

impl ProbePolicy {
	/// Delay before retry number `attempt` (zero-based), before budget clamping.
	pub fn delay(&self, attempt: u32) -> Duration {
		let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
		self.initial_delay.saturating_mul(factor).min(self.max_delay)
	}
}

enum Attempt {
	Ready,
	NotReady,
	Cancelled,
}

/// Waits until the hover source returns documentation for a call site near
/// the top of `doc`.
///
/// Each attempt queries the first call site of every line among the first
/// [`ProbePolicy::probe_lines`]; any non-empty answer means ready.
///
/// Returns `true` once ready, `false` when the budget is exhausted or `token`
/// is cancelled. A document with no call site in its first
/// [`ProbePolicy::probe_lines`] lines never becomes ready. Hover errors count
/// as not ready.
pub async fn probe(doc: &DocumentSnapshot, hover: &dyn HoverSource, token: &RunToken, policy: &ProbePolicy) -> bool {
	let mut waited = Duration::ZERO;
	let mut attempt = 0u32;

	loop {
		match attempt_once(doc, hover, token, policy.probe_lines).await {
			Attempt::Ready => {
				debug!(doc = %doc.id(), attempt, waited_ms = waited.as_millis() as u64, "probe.ready");
				return true;
			}
			Attempt::Cancelled => return false,
			Attempt::NotReady => {}
		}

		if waited >= policy.budget {
			debug!(doc = %doc.id(), attempt, "probe.budget_exhausted");
			return false;
		}

		let delay = policy.delay(attempt).min(policy.budget - waited);
		trace!(doc = %doc.id(), attempt, delay_ms = delay.as_millis() as u64, "probe.backoff");
		if !token.sleep(delay).await {
			return false;
		}
		waited += delay;
		attempt = attempt.saturating_add(1);
	}
}

async fn attempt_once(doc: &DocumentSnapshot, hover: &dyn HoverSource, token: &RunToken, probe_lines: usize) -> Attempt {
	for (idx, text) in doc.lines().take(probe_lines).enumerate() {
		if token.is_cancelled() {
			return Attempt::Cancelled;
		}
		let Ok(line) = u32::try_from(idx) else {
			break;
		};
		let Some(site) = scan(text, line).next() else {
			continue;
		};

		let result = hover.hover(doc.id(), site.position()).await;
		if token.is_cancelled() {
			return Attempt::Cancelled;
		}
		match result {
			Ok(fragments) if fragments.iter().any(|fragment| !fragment.is_blank()) => return Attempt::Ready,
			Ok(_) => trace!(doc = %doc.id(), line, "probe.empty"),
			Err(error) => trace!(doc = %doc.id(), line, %error, "probe.hover_failed"),
		}
	}
	Attempt::NotReady
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use tokio::time::Instant;

	use super::*;
	use crate::test_support::{ScriptedHover, snapshot};

	#[test]
	fn delay_doubles_then_caps() {
		let policy = ProbePolicy::default();
		let delays: Vec<_> = (0..6).map(|attempt| policy.delay(attempt).as_millis()).collect();
		assert_eq!(delays, vec![200, 400, 800, 1600, 2000, 2000]);
		assert_eq!(policy.delay(40), Duration::from_millis(2000));
	}

	#[tokio::test(start_paused = true)]
	async fn ready_source_returns_immediately() {
		let hover = ScriptedHover::new().with_doc("calc", "Calculates a value.");
		let doc = snapshot(&["int x = calc(1);"]);
		hover.track(&doc);
		let start = Instant::now();

		assert!(probe(&doc, &hover, &RunToken::new(1), &ProbePolicy::default()).await);
		assert_eq!(start.elapsed(), Duration::ZERO);
		assert_eq!(hover.calls(), 1);
	}

	#[tokio::test(start_paused = true)]
	async fn ready_when_later_line_documented() {
		let hover = ScriptedHover::new().with_doc("calc", "Calculates a value.");
		let doc = snapshot(&["System.out.println(1);", "// calc(0)", "int x = calc(1);", "other();"]);
		hover.track(&doc);
		let start = Instant::now();

		assert!(probe(&doc, &hover, &RunToken::new(1), &ProbePolicy::default()).await);
		assert_eq!(start.elapsed(), Duration::ZERO);
		assert_eq!(hover.calls(), 2);
	}

	#[tokio::test(start_paused = true)]
	async fn failing_first_line_does_not_block_later_lines() {
		let hover = ScriptedHover::new().failing("println").with_doc("calc", "Calculates a value.");
		let doc = snapshot(&["System.out.println(1);", "int x = calc(1);"]);
		hover.track(&doc);
		let start = Instant::now();

		assert!(probe(&doc, &hover, &RunToken::new(1), &ProbePolicy::default()).await);
		assert_eq!(start.elapsed(), Duration::ZERO);
		assert_eq!(hover.calls(), 2);
	}

	#[tokio::test(start_paused = true)]
	async fn backs_off_until_source_warms_up() {
		let hover = ScriptedHover::new().with_doc("calc", "Calculates a value.").cold_for(3);
		let doc = snapshot(&["int x = calc(1);"]);
		hover.track(&doc);
		let start = Instant::now();

		assert!(probe(&doc, &hover, &RunToken::new(1), &ProbePolicy::default()).await);
		assert_eq!(start.elapsed(), Duration::from_millis(200 + 400 + 800));
		assert_eq!(hover.calls(), 4);
	}

	#[tokio::test(start_paused = true)]
	async fn gives_up_after_budget() {
		let hover = ScriptedHover::new();
		let doc = snapshot(&["int x = calc(1);"]);
		hover.track(&doc);
		let start = Instant::now();

		assert!(!probe(&doc, &hover, &RunToken::new(1), &ProbePolicy::default()).await);
		assert_eq!(start.elapsed(), Duration::from_secs(60));
	}

	#[tokio::test(start_paused = true)]
	async fn errors_count_as_not_ready() {
		let hover = ScriptedHover::new().with_doc("calc", "Calculates a value.").failing("calc");
		let doc = snapshot(&["int x = calc(1);"]);
		hover.track(&doc);
		let policy = ProbePolicy {
			budget: Duration::from_secs(1),
			..ProbePolicy::default()
		};

		assert!(!probe(&doc, &hover, &RunToken::new(1), &policy).await);
		assert!(hover.calls() > 1);
	}

	#[tokio::test(start_paused = true)]
	async fn only_first_lines_are_probed() {
		let hover = ScriptedHover::new().with_doc("late", "Late call.");
		let mut lines = vec!["// filler"; 20];
		lines.push("late();");
		let doc = snapshot(&lines);
		hover.track(&doc);
		let start = Instant::now();

		assert!(!probe(&doc, &hover, &RunToken::new(1), &ProbePolicy::default()).await);
		assert_eq!(hover.calls(), 0);
		assert_eq!(start.elapsed(), Duration::from_secs(60));
	}

	#[tokio::test(start_paused = true)]
	async fn cancellation_interrupts_backoff() {
		let hover = Arc::new(ScriptedHover::new());
		let doc = snapshot(&["int x = calc(1);"]);
		hover.track(&doc);
		let token = RunToken::new(1);
		let start = Instant::now();

		let task = {
			let token = token.clone();
			let hover = Arc::clone(&hover);
			tokio::spawn(async move { probe(&doc, hover.as_ref(), &token, &ProbePolicy::default()).await })
		};
		tokio::time::sleep(Duration::from_millis(300)).await;
		token.cancel();

		assert!(!task.await.unwrap());
		assert!(start.elapsed() < Duration::from_secs(1));
	}
}
