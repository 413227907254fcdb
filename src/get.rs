//! Single-document inspection: `lawctx parse` and `lawctx get`.
//!
//! Both work on one file and need no config; they are the quickest way to
//! check how a document decodes before running a full ingest.

use std::path::Path;

use anyhow::Result;
use lawcode_core::{Hierarchy, Section};
use serde::Serialize;

use crate::document::load_hierarchy;

/// One section as shown by `lawctx get --json`.
#[derive(Debug, Clone, Serialize)]
pub struct SectionResponse {
    pub id: String,
    pub locator: String,
    pub depth: usize,
    pub is_leaf: bool,
    pub name: String,
    pub number: String,
    pub version: String,
    pub hierarchical_name: String,
    pub hierarchical_number: String,
    pub hierarchical_title: String,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub content: String,
}

/// Build the response for the section at `locator` in `hierarchy`.
pub fn section_response(hierarchy: &Hierarchy, locator: &str) -> Result<SectionResponse> {
    let section = hierarchy.locate(locator)?;
    Ok(SectionResponse {
        id: section.id.to_string(),
        locator: section.locator.clone(),
        depth: section.depth,
        is_leaf: section.is_leaf(),
        name: section.name.clone(),
        number: section.number.clone(),
        version: section.version.clone(),
        hierarchical_name: section.hierarchical_name.clone(),
        hierarchical_number: section.hierarchical_number.clone(),
        hierarchical_title: section.hierarchical_title.clone(),
        parent: hierarchy.parent(section).map(|p| p.locator.clone()),
        children: hierarchy
            .children(section)
            .map(|c| c.locator.clone())
            .collect(),
        content: section.content.clone(),
    })
}

/// Print the section tree of `path`, or its leaf records as JSON.
pub fn run_parse(path: &Path, json: bool, max_tokens: usize) -> Result<()> {
    let hierarchy = load_hierarchy(path)?;

    if json {
        let records = hierarchy.records(max_tokens);
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let source = hierarchy.source();
    println!("source:       {}", source.path.display());
    println!("jurisdiction: {}", source.jurisdiction());
    println!("title:        {}", source.title);
    println!(
        "sections:     {} ({} leaves)",
        hierarchy.len(),
        hierarchy.leaf_count()
    );
    println!();
    for section in hierarchy.iter() {
        println!("{}", tree_line(section));
    }
    Ok(())
}

fn tree_line(section: &Section) -> String {
    let indent = "  ".repeat(section.depth);
    let locator = if section.is_root() {
        "/"
    } else {
        section.locator.as_str()
    };
    let marker = if section.is_leaf() { "*" } else { "+" };
    let label = if section.is_root() {
        section.hierarchical_title.as_str()
    } else {
        section.hierarchical_name.rsplit(" -> ").next().unwrap_or_default()
    };
    format!(
        "{indent}{marker} [{locator}] {} {}  {}",
        section.number, label, section.id
    )
}

/// Print the section at `locator` in `path`.
pub fn run_get(path: &Path, locator: &str, json: bool) -> Result<()> {
    let hierarchy = load_hierarchy(path)?;
    let section = section_response(&hierarchy, locator)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&section)?);
        return Ok(());
    }

    println!("--- Section ---");
    println!("id:                  {}", section.id);
    println!("locator:             {}", section.locator);
    println!("depth:               {}", section.depth);
    println!("number:              {}", section.number);
    println!("name:                {}", section.name);
    println!("version:             {}", section.version);
    println!("hierarchical_title:  {}", section.hierarchical_title);
    println!("hierarchical_name:   {}", section.hierarchical_name);
    println!("hierarchical_number: {}", section.hierarchical_number);
    if let Some(ref parent) = section.parent {
        println!("parent:              {}", display_locator(parent));
    }
    println!();

    if section.is_leaf {
        println!("--- Content ---");
        println!("{}", section.content);
    } else {
        println!("--- Children ({}) ---", section.children.len());
        for child in &section.children {
            println!("{}", child);
        }
    }

    Ok(())
}

fn display_locator(locator: &str) -> &str {
    if locator.is_empty() {
        "(root)"
    } else {
        locator
    }
}
