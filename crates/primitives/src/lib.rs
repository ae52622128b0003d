//! Core types shared by the annotation pipeline: document identity and
//! snapshots, text positions, annotations with their styling, and hover
//! fragments.

/// Annotation and annotation style types.
pub mod annotation;
/// Display colors.
pub mod color;
/// Immutable document snapshots.
pub mod document;
/// Hover fragments returned by an information source.
pub mod hover;
/// Identifier types for documents.
pub mod ids;
/// Line/character positions.
pub mod position;

pub use annotation::{Annotation, AnnotationSet, AnnotationStyle, FontStyle};
pub use color::Color;
pub use document::DocumentSnapshot;
pub use hover::{HoverFragment, fragments_from_hover};
pub use ids::DocumentId;
pub use position::{Position, utf16_len};
