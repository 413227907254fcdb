//! # Lawcode Harness CLI (`lawctx`)
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lawctx parse <file>` | Print the section tree of one document |
//! | `lawctx get <file> <locator>` | Print one section by child-index path |
//! | `lawctx sources` | Show the corpus root and documents per jurisdiction |
//! | `lawctx ingest` | Build every document and export the leaf sections |
//!
//! ## Examples
//!
//! ```bash
//! lawctx parse data/00.raw/ny-laws/tax/tax.xml --json
//! lawctx get data/00.raw/ny-laws/tax/tax.xml 0/3/1
//! lawctx ingest --config ./config/lawctx.toml --output out/sections.jsonl --format jsonl
//! RUST_LOG=lawcode_harness=debug lawctx ingest --dry-run
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lawcode_harness::config::{self, ErrorPolicy, ExportFormat};
use lawcode_harness::ingest::{self, IngestOptions};
use lawcode_harness::progress::ProgressMode;
use lawcode_harness::{get, sources};
use tracing_subscriber::EnvFilter;

/// Lawcode Harness CLI: turn state legal-code XML into retrieval-ready
/// sections.
///
/// Commands that read the corpus take a `--config` flag pointing to a TOML
/// file. See `config/lawctx.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "lawctx",
    about = "Lawcode Harness: build addressable section hierarchies from legal-code XML",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/lawctx.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one document and print its section tree.
    ///
    /// Does not read the config file.
    Parse {
        /// Path to the document, under a `<state>-<lawtype>/<title>/` directory.
        file: PathBuf,

        /// Print the leaf section records as JSON instead of the tree.
        #[arg(long)]
        json: bool,

        /// Paragraph budget for `--json` output.
        #[arg(long, default_value_t = config::DEFAULT_MAX_TOKENS)]
        max_tokens: usize,
    },

    /// Print the section at a locator such as `0/1/2`.
    ///
    /// An empty locator (`""`) addresses the root. Does not read the
    /// config file.
    Get {
        file: PathBuf,
        locator: String,

        #[arg(long)]
        json: bool,
    },

    /// Show the corpus root and how many documents each jurisdiction has.
    Sources,

    /// Build every document in the corpus and export its leaf sections.
    Ingest {
        /// Build and count without writing an export.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of documents to process.
        #[arg(long)]
        limit: Option<usize>,

        /// What to do when a document fails. Overrides `[ingest].on_error`.
        #[arg(long, value_enum)]
        on_error: Option<ErrorPolicy>,

        /// Export destination. Overrides `[export].path`; stdout when neither is set.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Export format. Overrides `[export].format`.
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        /// Progress on stderr.
        #[arg(long, value_enum, default_value_t = ProgressMode::Auto)]
        progress: ProgressMode,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Commands that don't require config
    match &cli.command {
        Commands::Parse {
            file,
            json,
            max_tokens,
        } => return get::run_parse(file, *json, *max_tokens),
        Commands::Get {
            file,
            locator,
            json,
        } => return get::run_get(file, locator, *json),
        _ => {}
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
        Commands::Ingest {
            dry_run,
            limit,
            on_error,
            output,
            format,
            progress,
        } => {
            let options = IngestOptions {
                dry_run,
                limit,
                on_error,
                output,
                format,
                progress,
            };
            ingest::run_ingest(&cfg, &options)?;
        }
        Commands::Parse { .. } | Commands::Get { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
