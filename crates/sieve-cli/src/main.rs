use anyhow::{bail, Context, Result};
use clap::Parser;
use sieve_config::SieveConfig;
use sieve_diff::{collect_excerpts, parse_diff, ChangedFile, FileStatus};
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands, ExcerptArgs};
use crate::local_source::LocalDiffSource;
use crate::render::ExcerptView;

mod cli;
mod local_source;
mod render;
mod store;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Parse { diff, uri } => run_parse(&diff, uri),
        Commands::Excerpt(args) => run_excerpt(args).await,
    }
}

fn run_parse(diff: &Path, uri: Option<String>) -> Result<()> {
    let raw = std::fs::read_to_string(diff)
        .with_context(|| format!("Failed to read diff {}", diff.display()))?;

    let uri = uri.unwrap_or_else(|| diff.display().to_string());
    let file = ChangedFile::new(uri.clone(), uri, FileStatus::Modified);
    let file_diff = parse_diff(&file, &raw);

    println!("{}", serde_json::to_string_pretty(&file_diff)?);
    Ok(())
}

/// Build the changed file named on the command line.
fn changed_file(args: &ExcerptArgs) -> Result<ChangedFile> {
    let uri = args.file.display().to_string();
    let status = match (args.status, &args.diff) {
        (Some(status), _) => FileStatus::from(status),
        (None, Some(_)) => FileStatus::Modified,
        (None, None) => FileStatus::Added,
    };

    if status == FileStatus::Renamed {
        let Some(old_path) = &args.old_path else {
            bail!("--old-path is required for renamed files");
        };
        return Ok(ChangedFile::renamed(uri.clone(), uri, old_path.clone()));
    }
    Ok(ChangedFile::new(uri.clone(), uri, status))
}

async fn run_excerpt(args: ExcerptArgs) -> Result<()> {
    let config = SieveConfig::load();
    let mut options = config.trim_options();
    if let Some(radius) = args.radius {
        options.context_radius = radius;
    }
    if let Some(gap) = args.merge_gap {
        options.merge_gap = gap;
    }

    let file = changed_file(&args)?;
    let store_path = args
        .annotations
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.annotations_file));
    let annotations = store::load_annotations(&store_path)?;

    let source = LocalDiffSource::new(file.clone(), args.diff);
    let excerpts = collect_excerpts(&source, &annotations, &options)
        .await
        .with_context(|| format!("Failed to collect excerpts for {}", file.relative_path))?;

    if excerpts.is_empty() {
        println!("No annotations for {}", file.display_name());
        return Ok(());
    }
    for excerpt in &excerpts {
        print!("{}", ExcerptView(excerpt));
    }
    Ok(())
}
