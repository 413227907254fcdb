//! Export ingested sections for an indexing backend.
//!
//! `json` writes a single document `{"generated_at", "sections"}`; `jsonl`
//! writes one [`SectionRecord`] per line, which bulk loaders prefer.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lawcode_core::SectionRecord;
use serde::Serialize;

use crate::config::ExportFormat;

#[derive(Serialize)]
struct ExportData<'a> {
    generated_at: DateTime<Utc>,
    sections: &'a [SectionRecord],
}

/// Serialize `records` in `format`.
pub fn render_export(records: &[SectionRecord], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => {
            let data = ExportData {
                generated_at: Utc::now(),
                sections: records,
            };
            Ok(serde_json::to_string_pretty(&data)?)
        }
        ExportFormat::Jsonl => {
            let mut out = String::new();
            for record in records {
                out.push_str(&serde_json::to_string(record)?);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Export records to `output`, or to stdout for piping.
pub fn write_export(
    records: &[SectionRecord],
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let body = render_export(records, format)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, &body)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            eprintln!("Exported {} sections to {}", records.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            if format == ExportFormat::Json {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}
