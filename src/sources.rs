//! Corpus health listing for `lawctx sources`.
//!
//! Counts documents per jurisdiction from their paths alone, without
//! parsing them.

use std::collections::BTreeMap;

use anyhow::Result;
use lawcode_core::SourceInfo;

use crate::config::Config;
use crate::corpus::scan_corpus;

/// Documents discovered per jurisdiction, without parsing them.
///
/// Files whose path does not decode to a jurisdiction are counted under
/// `(unrecognized)`; ingest would reject them with `invalid_format`.
pub fn count_documents(config: &Config) -> Result<BTreeMap<String, u64>> {
    let mut counts = BTreeMap::new();
    for entry in scan_corpus(&config.corpus)? {
        let key = match SourceInfo::from_path(&entry.path) {
            Ok(info) => info.jurisdiction(),
            Err(_) => "(unrecognized)".to_string(),
        };
        *counts.entry(key).or_insert(0u64) += 1;
    }
    Ok(counts)
}

pub fn list_sources(config: &Config) -> Result<()> {
    let root = &config.corpus.root;
    let label = root.display().to_string();
    println!("{:<16} {:<12} HEALTHY", "CORPUS", "STATUS");
    if !root.exists() {
        println!(
            "{:<16} {:<12} {}",
            label,
            "NOT FOUND (root does not exist)",
            false
        );
        return Ok(());
    }
    println!("{:<16} {:<12} {}", label, "OK", true);

    let counts = count_documents(config)?;
    println!();
    println!("{:<16} {:>10}", "JURISDICTION", "DOCUMENTS");
    for (jurisdiction, n) in &counts {
        println!("{:<16} {:>10}", jurisdiction, n);
    }

    Ok(())
}
