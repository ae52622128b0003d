//! Worker primitives for the annotation pipeline.
//!
//! - [`RunToken`]: generation-scoped cancellation handle for one run or timer.
//! - [`GenerationClock`]: monotonic source of run generations.
//! - [`spawn`]: task spawning tagged with a [`TaskClass`].

mod class;
mod spawn;
mod token;

pub use class::TaskClass;
pub use spawn::spawn;
pub use token::{GenerationClock, RunToken};
