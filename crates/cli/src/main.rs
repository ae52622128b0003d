//! noteline command-line driver.
//!
//! Runs the annotation pipeline over one file, answering hover queries from a
//! recorded fixture instead of a live language server.

mod cli;
mod fixture;
mod output;

use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use cli::{Cli, Command, language_for};
use fixture::FixtureHover;
use noteline_annotate::extract::summarize;
use noteline_annotate::{AnnotationStore, Annotator, Controller, PipelineTuning, ProbePolicy, RunOutcome};
use noteline_config::{Config, ConfigSource, StaticConfig};
use noteline_primitives::{DocumentId, DocumentSnapshot};
use output::{CaptureSurface, LogProgress, annotated_source};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match cli.command {
		Command::Annotate {
			file,
			hovers,
			config,
			language,
			json,
		} => annotate(&file, &hovers, config.as_deref(), language, json).await,
		Command::Summarize { file, max_length } => summarize_hover(file, max_length),
	}
}

async fn annotate(file: &Path, hovers: &Path, config: Option<&Path>, language: Option<String>, json: bool) -> anyhow::Result<()> {
	let text = std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
	let language = match language {
		Some(language) => language,
		None => language_for(file)
			.with_context(|| format!("cannot infer language of {}; pass --language", file.display()))?
			.to_string(),
	};
	let config = match config {
		Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => Config::default(),
	};
	if !config.supports(&language) {
		bail!("language `{language}` is not enabled (enabled: {})", config.languages.join(", "));
	}

	let doc = Arc::new(DocumentSnapshot::from_text(document_id(file), language, &text));
	let hover = Arc::new(FixtureHover::load(hovers, doc.clone())?);
	debug!(entries = hover.entry_count(), "loaded hover fixture");

	let surface = Arc::new(CaptureSurface::default());
	let config: Arc<dyn ConfigSource> = Arc::new(StaticConfig(config));
	// Recorded hovers are available immediately; one probe attempt suffices.
	let tuning = PipelineTuning {
		probe: ProbePolicy {
			budget: Duration::ZERO,
			..ProbePolicy::default()
		},
		..PipelineTuning::default()
	};
	let annotator = Arc::new(
		Annotator::new(hover, surface.clone(), Arc::new(LogProgress), config, Arc::new(AnnotationStore::new())).with_tuning(tuning),
	);
	let controller = Controller::new(annotator.clone());

	let run = annotator.launch(doc.clone());
	let outcome = tokio::select! {
		outcome = run => outcome.context("annotation task failed")?,
		_ = tokio::signal::ctrl_c() => {
			controller.deactivate();
			bail!("interrupted");
		}
	};
	let RunOutcome::Completed { found, total, elapsed } = outcome else {
		bail!("annotation run was cancelled");
	};
	info!(found, total, elapsed_ms = elapsed.as_millis() as u64, "done");

	let set = surface.shown(doc.id()).context("run completed without rendering")?;
	if json {
		println!("{}", serde_json::to_string_pretty(&*set)?);
	} else {
		print!("{}", annotated_source(&doc, &set));
	}
	Ok(())
}

fn summarize_hover(file: Option<PathBuf>, max_length: usize) -> anyhow::Result<()> {
	let text = match file {
		Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?,
		None => {
			let mut text = String::new();
			std::io::stdin().read_to_string(&mut text).context("reading stdin")?;
			text
		}
	};
	println!("{}", summarize(&text, max_length));
	Ok(())
}

fn document_id(file: &Path) -> DocumentId {
	std::path::absolute(file)
		.ok()
		.and_then(|path| DocumentId::from_path(&path))
		.unwrap_or_else(|| DocumentId::new(file.display().to_string()))
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("NOTELINE_LOG").unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("noteline=debug,noteline_annotate=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(true).init();
}
