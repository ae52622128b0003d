//! The external hover information source.

use async_trait::async_trait;
use noteline_primitives::{DocumentId, HoverFragment, Position};
use thiserror::Error;

/// Failures reported by a [`HoverSource`].
///
/// Callers treat every variant as "no information available right now".
#[derive(Debug, Error)]
pub enum HoverError {
	/// The service answered with an error.
	#[error("hover service failed: {0}")]
	Service(String),
	/// The service has not started or is not attached to this document.
	#[error("hover service not ready")]
	NotReady,
}

/// Asynchronous source of documentation for a document position.
///
/// Implementations may take arbitrarily long and may return an empty list
/// while the backing language server is still indexing.
#[async_trait]
pub trait HoverSource: Send + Sync {
	/// Returns the hover fragments at `position` of document `id`.
	async fn hover(&self, id: &DocumentId, position: Position) -> Result<Vec<HoverFragment>, HoverError>;
}
