//! Ingest summary.
//!
//! Gives a quick overview of what a run produced: document and section
//! counts, how the store changed, and a per-jurisdiction breakdown. Failed
//! documents are listed so a skipped file never goes unnoticed.

use std::io::{self, Write};

use crate::ingest::IngestReport;
use crate::progress::format_number;

/// Write the human-readable summary of `report` to `out`.
pub fn write_summary<W: Write>(report: &IngestReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "  documents found:   {}", format_number(report.documents_found))?;
    writeln!(out, "  documents built:   {}", format_number(report.documents_built))?;
    writeln!(out, "  documents failed:  {}", format_number(report.documents_failed()))?;
    writeln!(out, "  sections:          {}", format_number(report.sections))?;
    writeln!(out, "  paragraphs:        {}", format_number(report.paragraphs))?;
    writeln!(
        out,
        "  store:             {} inserted, {} updated, {} unchanged",
        report.inserted, report.updated, report.unchanged
    )?;

    if !report.by_jurisdiction.is_empty() {
        writeln!(out)?;
        writeln!(out, "  By jurisdiction:")?;
        writeln!(
            out,
            "  {:<16} {:>8} {:>10} {:>12}",
            "JURISDICTION", "DOCS", "SECTIONS", "PARAGRAPHS"
        )?;
        writeln!(out, "  {}", "-".repeat(49))?;
        for (jurisdiction, s) in &report.by_jurisdiction {
            writeln!(
                out,
                "  {:<16} {:>8} {:>10} {:>12}",
                jurisdiction, s.documents, s.sections, s.paragraphs
            )?;
        }
    }

    if !report.failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "  Skipped:")?;
        for f in &report.failures {
            writeln!(out, "  {} [{}] {}", f.path, f.kind, f.message)?;
        }
    }

    writeln!(out, "ok")?;
    Ok(())
}
