//! Lexical call-site detection.
//!
//! A call site is an identifier immediately followed (modulo whitespace) by an
//! opening parenthesis, optionally preceded by a `receiver.` qualifier. This is
//! a heuristic: string literals, generics and lambdas are not understood.

use std::sync::LazyLock;

use noteline_primitives::{Position, utf16_len};
use regex::{CaptureMatches, Regex};

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+\.)?(\w+)\s*\(").expect("call-site regex compiles"));

/// Keywords that look like calls (`if (...)`) but never are.
const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch"];

/// A candidate method invocation on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
	/// Zero-based line index.
	pub line: u32,
	/// UTF-16 offset of the identifier (after any `receiver.`).
	pub character: u32,
	/// Called identifier.
	pub name: String,
	/// Receiver identifier, without the dot.
	pub receiver: Option<String>,
}

impl CallSite {
	/// Position of the identifier, suitable for a hover query.
	pub fn position(&self) -> Position {
		Position::new(self.line, self.character)
	}
}

/// Returns true for lines that never contain call sites worth annotating:
/// blank lines and lines opening or continuing a comment.
pub fn is_skippable(line_text: &str) -> bool {
	let trimmed = line_text.trim();
	trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

/// Scans one line for call sites, left to right.
///
/// The returned iterator is lazy and borrows `line_text`; calling `scan`
/// again restarts from the beginning of the line.
pub fn scan(line_text: &str, line: u32) -> CallSites<'_> {
	CallSites {
		line,
		text: line_text,
		matches: (!is_skippable(line_text)).then(|| CALL_RE.captures_iter(line_text)),
	}
}

/// Returns the identifier starting at UTF-16 offset `character` of `line_text`.
///
/// This is the inverse of [`CallSite::position`] for hover providers that
/// resolve names lexically.
pub fn identifier_at(line_text: &str, character: u32) -> Option<&str> {
	let mut offset = 0u32;
	let start = line_text.char_indices().find_map(|(idx, ch)| {
		if offset == character {
			return Some(idx);
		}
		offset += ch.len_utf16() as u32;
		None
	})?;
	let rest = &line_text[start..];
	let end = rest.find(|c: char| !(c.is_alphanumeric() || c == '_')).unwrap_or(rest.len());
	(end > 0).then(|| &rest[..end])
}

/// Iterator over the call sites of one line. See [`scan`].
pub struct CallSites<'a> {
	line: u32,
	text: &'a str,
	matches: Option<CaptureMatches<'static, 'a>>,
}

impl Iterator for CallSites<'_> {
	type Item = CallSite;

	fn next(&mut self) -> Option<CallSite> {
		loop {
			let caps = self.matches.as_mut()?.next()?;
			let Some(name) = caps.get(2) else {
				continue;
			};
			if CONTROL_KEYWORDS.contains(&name.as_str()) {
				continue;
			}

			let receiver = caps.get(1).map(|m| m.as_str().trim_end_matches('.').to_string());
			return Some(CallSite {
				line: self.line,
				character: utf16_len(&self.text[..name.start()]),
				name: name.as_str().to_string(),
				receiver,
			});
		}
	}
}
