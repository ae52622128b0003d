use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "noteline")]
#[command(about = "Annotate call sites with one-line documentation summaries")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Annotate a source file using recorded hover responses
	Annotate {
		/// Source file to annotate
		file: PathBuf,

		/// JSON object mapping identifiers to hover contents
		#[arg(long, value_name = "JSON")]
		hovers: PathBuf,

		/// TOML configuration file
		#[arg(long, short = 'c', value_name = "TOML")]
		config: Option<PathBuf>,

		/// Language tag (inferred from the file extension if omitted)
		#[arg(long, short = 'l')]
		language: Option<String>,

		/// Print annotations as JSON instead of the annotated source
		#[arg(long)]
		json: bool,
	},
	/// Print the summary extracted from hover text
	Summarize {
		/// File holding hover text (reads stdin if omitted)
		file: Option<PathBuf>,

		/// Maximum summary length in characters
		#[arg(long, default_value_t = 80)]
		max_length: usize,
	},
}

/// Maps a file extension to a language tag.
pub fn language_for(path: &Path) -> Option<&'static str> {
	match path.extension()?.to_str()? {
		"java" => Some("java"),
		"js" | "mjs" | "cjs" | "jsx" => Some("javascript"),
		"ts" | "mts" | "cts" | "tsx" => Some("typescript"),
		_ => None,
	}
}
