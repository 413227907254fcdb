//! Ingestion pipeline orchestration.
//!
//! Coordinates a full corpus run: discovery → hierarchy build → paragraph
//! chunking → store upsert → export. Section ids are content-derived, so
//! re-running over an unchanged corpus reproduces the same records.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lawcode_core::store::memory::InMemoryStore;
use lawcode_core::store::{SectionStore, UpsertOutcome};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Config, ErrorPolicy, ExportFormat};
use crate::corpus::scan_corpus;
use crate::document::load_hierarchy;
use crate::export::write_export;
use crate::progress::{IngestProgressEvent, IngestProgressReporter, ProgressMode};
use crate::stats::write_summary;

/// Per-run switches layered over the config file.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Build and count, but write no export.
    pub dry_run: bool,
    /// Maximum number of documents to process.
    pub limit: Option<usize>,
    /// Overrides `[ingest].on_error`.
    pub on_error: Option<ErrorPolicy>,
    /// Overrides `[export].path`.
    pub output: Option<PathBuf>,
    /// Overrides `[export].format`.
    pub format: Option<ExportFormat>,
    pub progress: ProgressMode,
}

/// A document that could not be built and was skipped.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IngestFailure {
    pub path: String,
    pub kind: String,
    pub message: String,
}

/// Document and section counts for one `<state>-<lawtype>` jurisdiction.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct JurisdictionStats {
    pub documents: u64,
    pub sections: u64,
    pub paragraphs: u64,
}

/// Outcome of an ingest run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub documents_found: u64,
    pub documents_built: u64,
    pub sections: u64,
    pub paragraphs: u64,
    pub inserted: u64,
    pub updated: u64,
    pub unchanged: u64,
    pub failures: Vec<IngestFailure>,
    pub by_jurisdiction: BTreeMap<String, JurisdictionStats>,
}

impl IngestReport {
    pub fn documents_failed(&self) -> u64 {
        self.failures.len() as u64
    }
}

/// Walk the corpus and upsert the leaf sections of every document into
/// `store`.
///
/// A document that fails to build is logged and recorded under
/// [`ErrorPolicy::Skip`]; under [`ErrorPolicy::Abort`] the first failure
/// ends the run with an error naming the document.
pub fn ingest_corpus(
    config: &Config,
    policy: ErrorPolicy,
    limit: Option<usize>,
    store: &dyn SectionStore,
    reporter: &dyn IngestProgressReporter,
) -> Result<IngestReport> {
    let corpus = config.corpus.root.display().to_string();
    reporter.report(IngestProgressEvent::Discovering {
        corpus: corpus.clone(),
    });

    let mut entries = scan_corpus(&config.corpus)?;
    if let Some(lim) = limit {
        entries.truncate(lim);
    }

    let total = entries.len() as u64;
    let mut report = IngestReport {
        documents_found: total,
        ..IngestReport::default()
    };

    for (i, entry) in entries.iter().enumerate() {
        let hierarchy = match load_hierarchy(&entry.path) {
            Ok(h) => h,
            Err(e) => {
                if policy == ErrorPolicy::Abort {
                    return Err(e).with_context(|| {
                        format!("Failed to ingest {} (on_error = {policy})", entry.relative)
                    });
                }
                warn!(path = %entry.relative, kind = e.kind(), error = %e, "skipping document");
                report.failures.push(IngestFailure {
                    path: entry.relative.clone(),
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                });
                reporter.report(IngestProgressEvent::Building {
                    corpus: corpus.clone(),
                    n: i as u64 + 1,
                    total,
                });
                continue;
            }
        };

        let records = hierarchy.records(config.chunking.max_tokens);
        let stats = report
            .by_jurisdiction
            .entry(hierarchy.source().jurisdiction())
            .or_default();
        stats.documents += 1;

        for record in records {
            let paragraphs = record.paragraphs.len() as u64;
            stats.sections += 1;
            stats.paragraphs += paragraphs;
            report.sections += 1;
            report.paragraphs += paragraphs;
            match store.upsert(record)? {
                UpsertOutcome::Inserted => report.inserted += 1,
                UpsertOutcome::Updated => report.updated += 1,
                UpsertOutcome::Unchanged => report.unchanged += 1,
            }
        }
        report.documents_built += 1;

        reporter.report(IngestProgressEvent::Building {
            corpus: corpus.clone(),
            n: i as u64 + 1,
            total,
        });
    }

    info!(
        documents = report.documents_built,
        failed = report.documents_failed(),
        sections = report.sections,
        "ingest finished"
    );
    Ok(report)
}

/// CLI entry point for `lawctx ingest`.
///
/// The export goes to `--output`, else `[export].path`, else stdout. The
/// summary goes to stdout unless the export is using it, then to stderr.
pub fn run_ingest(config: &Config, options: &IngestOptions) -> Result<()> {
    let policy = options.on_error.unwrap_or(config.ingest.on_error);
    let format = options.format.unwrap_or(config.export.format);
    let output: Option<&Path> = options
        .output
        .as_deref()
        .or(config.export.path.as_deref());

    let store = InMemoryStore::new();
    let reporter = options.progress.reporter();
    let report = ingest_corpus(config, policy, options.limit, &store, reporter.as_ref())?;

    if options.dry_run {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "ingest {} (dry-run)", config.corpus.root.display())?;
        write_summary(&report, &mut stdout)?;
        return Ok(());
    }

    let records = store.records()?;
    write_export(&records, format, output)?;

    if output.is_some() {
        write_summary(&report, &mut std::io::stdout().lock())?;
    } else {
        write_summary(&report, &mut std::io::stderr().lock())?;
    }
    Ok(())
}
