/// Execution classes used for spawn logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Runs the user asked for directly: refreshes and view switches.
	Interactive,
	/// Annotation runs, debounce timers and status housekeeping.
	Background,
}

impl TaskClass {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Interactive => "interactive",
			Self::Background => "background",
		}
	}
}
