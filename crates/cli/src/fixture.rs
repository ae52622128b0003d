//! Hover source replaying recorded responses.
//!
//! A fixture is a JSON object mapping identifiers to hover contents. Each
//! value is either a markdown string or an LSP `Hover` object:
//!
//! ```json
//! {
//!   "calc": "Calculates a value.",
//!   "info": { "contents": { "kind": "markdown", "value": "Logs at INFO." } }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use lsp_types::Hover;
use noteline_annotate::scan::identifier_at;
use noteline_annotate::{HoverError, HoverSource};
use noteline_primitives::{DocumentId, DocumentSnapshot, HoverFragment, Position, fragments_from_hover};
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureEntry {
	Text(String),
	Hover(Hover),
}

impl From<FixtureEntry> for Vec<HoverFragment> {
	fn from(entry: FixtureEntry) -> Self {
		match entry {
			FixtureEntry::Text(text) => vec![HoverFragment::Markdown(text)],
			FixtureEntry::Hover(hover) => fragments_from_hover(hover),
		}
	}
}

/// Answers hover queries for one document from a recorded fixture.
pub struct FixtureHover {
	doc: Arc<DocumentSnapshot>,
	entries: HashMap<String, Vec<HoverFragment>>,
}

impl FixtureHover {
	pub fn parse(json: &str, doc: Arc<DocumentSnapshot>) -> anyhow::Result<Self> {
		let raw: HashMap<String, FixtureEntry> = serde_json::from_str(json).context("hover fixture must be a JSON object")?;
		let entries = raw.into_iter().map(|(name, entry)| (name, entry.into())).collect();
		Ok(Self { doc, entries })
	}

	pub fn load(path: &Path, doc: Arc<DocumentSnapshot>) -> anyhow::Result<Self> {
		let json = std::fs::read_to_string(path).with_context(|| format!("reading hover fixture {}", path.display()))?;
		Self::parse(&json, doc).with_context(|| format!("parsing hover fixture {}", path.display()))
	}

	pub fn entry_count(&self) -> usize {
		self.entries.len()
	}
}

#[async_trait]
impl HoverSource for FixtureHover {
	async fn hover(&self, id: &DocumentId, position: Position) -> Result<Vec<HoverFragment>, HoverError> {
		if id != self.doc.id() {
			return Err(HoverError::NotReady);
		}
		let name = self
			.doc
			.line(position.line as usize)
			.and_then(|line| identifier_at(line, position.character))
			.unwrap_or_default();
		let fragments = self.entries.get(name).cloned().unwrap_or_default();
		debug!(name, line = position.line, fragments = fragments.len(), "fixture.hover");
		Ok(fragments)
	}
}
