//! Documentation summary extraction from hover text.
//!
//! Hover text mixes signatures, fenced code, markdown and doc-comment syntax.
//! [`extract`] picks the first line of free prose and cleans it into a short
//! summary. Rules are anchored at the start of the line (after any leading
//! `/`, `*` and whitespace):
//!
//! - fenced code blocks are skipped entirely;
//! - blank and `---` separator lines are skipped;
//! - a doc tag (`@param`, `Returns:`, ...) ends the prose, so extraction stops;
//! - declaration boilerplate (modifiers, bare signatures, primitive types)
//!   is skipped.

use std::sync::LazyLock;

use noteline_primitives::HoverFragment;
use regex::Regex;

/// Marker appended to truncated summaries.
pub const ELLIPSIS: &str = "...";

/// Cleaned lines this short or shorter are noise ("*", "}", "@@").
const MIN_SUMMARY_CHARS: usize = 3;

static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{3,}$").expect("separator regex compiles"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?i)^(?:@(?:param|returns?|throws|exception|see|since|deprecated|author|version)\b|(?:params?|parameters|returns?|throws|参数|返回)\s*[:：])",
	)
	.expect("doc tag regex compiles")
});
static MODIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?:public|private|protected|static|final|abstract|class|interface|enum)\s").expect("modifier regex compiles")
});
static SIGNATURE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+\s*\(.*\)\s*(?::\s*\w+)?$").expect("signature regex compiles"));
static PRIMITIVE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^(?:java\.|void\s|int\s|String\s|boolean\s|long\s|double\s|float\s)").expect("primitive regex compiles"));

static LEADING_STARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*+\s*").expect("regex compiles"));
static TRAILING_STARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*+$").expect("regex compiles"));
static COMMENT_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/\*+").expect("regex compiles"));
static COMMENT_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*+/").expect("regex compiles"));
static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("regex compiles"));
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-•]\s*").expect("regex compiles"));

/// Extracts a one-line summary from hover fragments.
///
/// Returns an empty string when no line qualifies. The result is at most
/// `max_length` characters; longer summaries end in [`ELLIPSIS`].
pub fn extract(fragments: &[HoverFragment], max_length: usize) -> String {
	let mut text = String::new();
	for fragment in fragments {
		text.push_str(&fragment.text());
		text.push('\n');
	}
	summarize(&text, max_length)
}

/// [`extract`] over already concatenated hover text.
pub fn summarize(text: &str, max_length: usize) -> String {
	let mut in_code_block = false;

	for raw in text.lines() {
		let line = raw.trim();

		if line.starts_with("```") {
			in_code_block = !in_code_block;
			continue;
		}
		if in_code_block || line.is_empty() || SEPARATOR_RE.is_match(line) {
			continue;
		}

		let body = line.trim_start_matches(|c: char| c == '/' || c == '*' || c.is_whitespace());
		if TAG_RE.is_match(body) {
			break;
		}
		if is_boilerplate(body) {
			continue;
		}

		let cleaned = clean(line);
		if cleaned.chars().count() > MIN_SUMMARY_CHARS {
			return truncate(&cleaned, max_length);
		}
	}

	String::new()
}

fn is_boilerplate(body: &str) -> bool {
	MODIFIER_RE.is_match(body) || SIGNATURE_RE.is_match(body) || PRIMITIVE_RE.is_match(body)
}

/// Strips comment markers, markdown emphasis, inline code ticks, HTML tags and
/// list bullets from one line.
fn clean(line: &str) -> String {
	let s = LEADING_STARS_RE.replace(line, "");
	let s = TRAILING_STARS_RE.replace(&s, "");
	let s = COMMENT_OPEN_RE.replace(&s, "");
	let s = COMMENT_CLOSE_RE.replace(&s, "");
	let s = s.replace('`', "");
	let s = HTML_TAG_RE.replace_all(&s, "");
	let s = BULLET_RE.replace(&s, "");
	s.trim().to_string()
}

fn truncate(summary: &str, max_length: usize) -> String {
	if summary.chars().count() <= max_length {
		return summary.to_string();
	}
	let mut out: String = summary.chars().take(max_length.saturating_sub(ELLIPSIS.len())).collect();
	out.push_str(ELLIPSIS);
	out
}
