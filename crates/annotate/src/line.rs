//! Annotation of a single source line.

use noteline_config::AnnotateConfig;
use noteline_primitives::{Annotation, DocumentSnapshot, utf16_len};
use noteline_worker::RunToken;
use tracing::{trace, warn};

use crate::extract::extract;
use crate::hover::HoverSource;
use crate::scan::{is_skippable, scan};

/// Produces the annotation for line `idx` of `doc`, if any.
///
/// Call sites are queried left to right and the first one whose hover yields
/// a non-empty summary wins. Hover failures are logged and the next call site
/// is tried. Returns `None` for blank and comment lines without querying, and
/// as soon as `token` is observed cancelled.
pub async fn annotate_line(
	doc: &DocumentSnapshot,
	idx: usize,
	config: &AnnotateConfig,
	hover: &dyn HoverSource,
	token: &RunToken,
) -> Option<Annotation> {
	let text = doc.line(idx)?;
	if token.is_cancelled() || is_skippable(text) {
		return None;
	}
	let line = u32::try_from(idx).ok()?;

	for site in scan(text, line) {
		if token.is_cancelled() {
			return None;
		}
		let result = hover.hover(doc.id(), site.position()).await;
		if token.is_cancelled() {
			return None;
		}

		let fragments = match result {
			Ok(fragments) => fragments,
			Err(error) => {
				warn!(doc = %doc.id(), line, name = %site.name, %error, "hover query failed");
				continue;
			}
		};
		let summary = extract(&fragments, config.max_length);
		if summary.is_empty() {
			trace!(doc = %doc.id(), line, name = %site.name, "line.no_summary");
			continue;
		}

		return Some(Annotation {
			line,
			anchor: utf16_len(text),
			text: format!(" {} {}", config.comment_prefix, summary),
			style: config.style(),
		});
	}
	None
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::test_support::{ScriptedHover, snapshot};

	async fn run(hover: &ScriptedHover, lines: &[&str], idx: usize) -> Option<Annotation> {
		let doc = snapshot(lines);
		hover.track(&doc);
		annotate_line(&doc, idx, &AnnotateConfig::default(), hover, &RunToken::new(1)).await
	}

	#[tokio::test]
	async fn annotates_first_documented_call() {
		let hover = ScriptedHover::new().with_doc("calc", "```java\nint calc(int a)\n```\nCalculates a value.");
		let annotation = run(&hover, &["int x = calc(1);"], 0).await.unwrap();

		assert_eq!(annotation.line, 0);
		assert_eq!(annotation.anchor, 16);
		assert_eq!(annotation.text, " // Calculates a value.");
		assert_eq!(annotation.style, AnnotateConfig::default().style());
	}

	#[tokio::test]
	async fn falls_through_undocumented_and_failing_sites() {
		let hover = ScriptedHover::new()
			.with_doc("broken", "Never seen.")
			.failing("broken")
			.with_doc("second", "Second call wins.");
		let annotation = run(&hover, &["first(); broken(); second(); third();"], 0).await.unwrap();

		assert_eq!(annotation.text, " // Second call wins.");
		assert_eq!(hover.calls(), 3);
	}

	#[tokio::test]
	async fn comment_and_blank_lines_issue_no_queries() {
		let hover = ScriptedHover::new().with_doc("calc", "Calculates a value.");
		let lines = ["// calc(1)", "", "   ", " * calc(2)", "/* calc(3) */"];
		for idx in 0..lines.len() {
			assert_eq!(run(&hover, &lines, idx).await, None);
		}
		assert_eq!(hover.calls(), 0);
	}

	#[tokio::test]
	async fn out_of_range_line_is_none() {
		let hover = ScriptedHover::new();
		assert_eq!(run(&hover, &["calc();"], 5).await, None);
	}

	#[tokio::test]
	async fn cancelled_token_short_circuits() {
		let hover = ScriptedHover::new().with_doc("calc", "Calculates a value.");
		let doc = snapshot(&["calc();"]);
		hover.track(&doc);
		let token = RunToken::new(1);
		token.cancel();

		assert_eq!(annotate_line(&doc, 0, &AnnotateConfig::default(), &hover, &token).await, None);
		assert_eq!(hover.calls(), 0);
	}

	#[tokio::test]
	async fn honours_prefix_and_max_length() {
		let hover = ScriptedHover::new().with_doc("calc", "Calculates a value from its inputs.");
		let doc = snapshot(&["calc();"]);
		hover.track(&doc);
		let config = AnnotateConfig {
			comment_prefix: "#".into(),
			max_length: 10,
			..AnnotateConfig::default()
		};

		let annotation = annotate_line(&doc, 0, &config, &hover, &RunToken::new(1)).await.unwrap();
		assert_eq!(annotation.text, " # Calcula...");
	}
}
