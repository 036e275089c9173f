// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folio — lays out titled photo/text records as a paginated PDF.
//
// Entry point. Initialises logging, parses the command line, and dispatches
// to the document engine.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use folio_core::error::Result;
use folio_core::human_errors::humanize_error;
use folio_core::{BuildConfig, DocumentSpec};
use folio_document::{DocumentBuilder, PdfReader, build_async};

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Lay out titled photo/text records as a paginated PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a PDF from a JSON document description
    Build {
        /// Document description (`document_title` plus `pages`)
        #[arg(value_name = "SPEC")]
        spec: PathBuf,

        /// Output root; the PDF lands in `<ROOT>/<title>/PDFs/`
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// JSON build configuration
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the computed page layout as JSON without writing a PDF
    Layout {
        /// Document description (`document_title` plus `pages`)
        #[arg(value_name = "SPEC")]
        spec: PathBuf,

        /// JSON build configuration
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show page count and title of an existing PDF
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "command failed");
            let human = humanize_error(&err);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Build { spec, root, config } => {
            let mut config = load_config(config.as_deref())?;
            if root.is_some() {
                config.output_root = root;
            }
            let spec = load_spec(&spec)?;
            info!(title = %spec.document_title, pages = spec.page_count(), "Building document");

            let outcome = build_async(spec, config).await?;
            println!("{}", outcome.path.display());
            println!("  pages:  {}", outcome.page_count);
            println!("  bytes:  {}", outcome.byte_len);
            println!("  sha256: {}", outcome.sha256);
        }
        Command::Layout {
            spec,
            config,
            compact,
        } => {
            let config = load_config(config.as_deref())?;
            let spec = load_spec(&spec)?;
            let pages = DocumentBuilder::new(&config).render_pages(&spec);
            let layouts: Vec<_> = pages.iter().map(|page| page.layout()).collect();
            let json = if compact {
                serde_json::to_string(&layouts)?
            } else {
                serde_json::to_string_pretty(&layouts)?
            };
            println!("{json}");
        }
        Command::Inspect { file } => {
            let reader = PdfReader::open(&file)?;
            println!("{}", file.display());
            println!("  pages: {}", reader.page_count());
            if let Some(title) = reader.title() {
                println!("  title: {title}");
            }
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<BuildConfig> {
    match path {
        Some(path) => BuildConfig::load(path),
        None => Ok(BuildConfig::default()),
    }
}

/// Read a document description. Relative image paths are taken relative to
/// the description file, not the working directory.
fn load_spec(path: &Path) -> Result<DocumentSpec> {
    let raw = std::fs::read_to_string(path)?;
    let mut spec: DocumentSpec = serde_json::from_str(&raw)?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for page in &mut spec.pages {
        if let Some(image) = page.image_path.as_mut() {
            if image.is_relative() {
                *image = base.join(&*image);
            }
        }
    }
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_arguments_parse() {
        let cli = Cli::try_parse_from([
            "folio", "build", "trip.json", "--root", "/tmp/out", "-c", "folio.json",
        ])
        .unwrap();
        match cli.command {
            Command::Build { spec, root, config } => {
                assert_eq!(spec, PathBuf::from("trip.json"));
                assert_eq!(root, Some(PathBuf::from("/tmp/out")));
                assert_eq!(config, Some(PathBuf::from("folio.json")));
            }
            other => panic!("expected build, got {other:?}"),
        }
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["folio"]).is_err());
    }

    #[test]
    fn relative_image_paths_follow_the_spec_file() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("trip.json");
        std::fs::write(
            &spec_path,
            r#"{
                "document_title": "Trip",
                "pages": [
                    { "title": "Day 1", "image_path": "photos/one.jpg" },
                    { "title": "Day 2", "image_path": "/abs/two.jpg", "body_text": "Rain." },
                    { "title": "Day 3" }
                ]
            }"#,
        )
        .unwrap();

        let spec = load_spec(&spec_path).unwrap();
        assert_eq!(spec.document_title, "Trip");
        assert_eq!(
            spec.pages[0].image_path(),
            Some(dir.path().join("photos/one.jpg").as_path())
        );
        assert_eq!(spec.pages[1].image_path(), Some(Path::new("/abs/two.jpg")));
        assert_eq!(spec.pages[1].body_text(), Some("Rain."));
        assert_eq!(spec.pages[2].image_path(), None);
    }

    #[test]
    fn malformed_spec_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("bad.json");
        std::fs::write(&spec_path, "{ not json").unwrap();

        assert!(load_spec(&spec_path).is_err());
    }

    #[test]
    fn no_config_file_means_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.working_image_width, 400);
    }
}
