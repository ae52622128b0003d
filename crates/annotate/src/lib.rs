//! Inline documentation summaries for source call sites.
//!
//! For every line of a document, the first call site whose hover information
//! yields a usable summary gets an end-of-line annotation:
//!
//! ```text
//! int x = calc(1);  // Calculates a value.
//! ```
//!
//! The pipeline is split into small pieces:
//!
//! - [`mod@scan`] finds call sites lexically;
//! - [`mod@extract`] turns hover text into a one-line summary;
//! - [`mod@probe`] waits for the hover source to warm up;
//! - [`line`] annotates one line;
//! - [`orchestrator`] runs a whole document in batches;
//! - [`store`] owns per-document caches and run tokens;
//! - [`controller`] maps host events onto runs.
//!
//! Host services are injected through [`HoverSource`], [`RenderSurface`],
//! [`ProgressSurface`] and [`noteline_config::ConfigSource`].

pub mod controller;
pub mod extract;
pub mod hover;
pub mod line;
pub mod orchestrator;
pub mod probe;
pub mod scan;
pub mod store;
pub mod surface;

#[cfg(test)]
mod test_support;

pub use controller::{Controller, Dispatch, HostEvent, STATUS_LINGER};
pub use extract::extract;
pub use hover::{HoverError, HoverSource};
pub use line::annotate_line;
pub use orchestrator::{Annotator, PipelineTuning, RunOutcome};
pub use probe::{ProbePolicy, probe};
pub use scan::{CallSite, scan};
pub use store::{AnnotationStore, RunPhase};
pub use surface::{NoProgress, ProgressSurface, RenderSurface, SurfaceError};
