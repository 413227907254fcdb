use std::fs;
use std::path::{Path, PathBuf};

use lawcode_core::{HierarchyError, LawType};
use lawcode_harness::document::load_hierarchy;
use tempfile::TempDir;

const SCENARIO: &str = r#"<?xml version="1.0"?>
<code type="Root">
  <name>NY Code</name>
  <code type="Article">
    <number>1</number>
    <name>General</name>
    <code type="Section">
      <number>1.1</number>
      <name>Definitions</name>
      <codetext>"Person" means an individual.</codetext>
      <codetext>   </codetext>
      <codetext> "State" means New York.</codetext>
    </code>
  </code>
</code>
"#;

fn write_doc(tmp: &TempDir, rel: &str, body: &str) -> PathBuf {
    let path = tmp.path().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn builds_scenario_document() {
    let tmp = TempDir::new().unwrap();
    let path = write_doc(&tmp, "data/ny-laws/general_provisions/2024/general.xml", SCENARIO);

    let h = load_hierarchy(&path).unwrap();
    assert_eq!(h.state(), "ny");
    assert_eq!(h.law_type(), LawType::Laws);
    assert_eq!(h.source().title, "general provisions");

    let leaves: Vec<_> = h.sections().collect();
    assert_eq!(leaves.len(), 1);
    let leaf = leaves[0];
    assert_eq!(leaf.hierarchical_title, "1 General - 1.1 Definitions");
    assert_eq!(leaf.version, "1");
    assert_eq!(
        leaf.content,
        "\"Person\" means an individual. \"State\" means New York."
    );
    assert_eq!(h.locate("0/0").unwrap().id, leaf.id);
}

#[test]
fn ids_do_not_depend_on_location() {
    let tmp = TempDir::new().unwrap();
    let a = write_doc(&tmp, "one/ny-laws/general/general.xml", SCENARIO);
    let b = write_doc(&tmp, "two/ny-laws/general/copy.xml", SCENARIO);

    let ids = |p: &Path| -> Vec<_> { load_hierarchy(p).unwrap().iter().map(|s| s.id).collect() };
    assert_eq!(ids(&a), ids(&b));
}

#[test]
fn hyphenated_directories_above_the_corpus_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let path = write_doc(
        &tmp,
        "my-work/ci-runner/data/ny-laws/general/general.xml",
        SCENARIO,
    );
    let h = load_hierarchy(&path).unwrap();
    assert_eq!(h.source().jurisdiction(), "ny-laws");
    assert_eq!(h.leaf_count(), 1);
}

#[test]
fn missing_file_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("ny-laws/general/general.xml");
    assert!(matches!(
        load_hierarchy(&path),
        Err(HierarchyError::NotFound { .. })
    ));
}

#[test]
fn path_without_jurisdiction_is_invalid_format() {
    let tmp = TempDir::new().unwrap();
    let path = write_doc(&tmp, "laws/general/general.xml", SCENARIO);
    assert!(matches!(
        load_hierarchy(&path),
        Err(HierarchyError::InvalidFormat { .. })
    ));
}

#[test]
fn unknown_law_type_is_invalid_format() {
    let tmp = TempDir::new().unwrap();
    let path = write_doc(&tmp, "ny-statutes/general/general.xml", SCENARIO);
    let err = load_hierarchy(&path).unwrap_err();
    assert_eq!(err.kind(), "invalid_format");
    assert!(err.to_string().contains("statutes"));
}

#[test]
fn path_is_checked_before_content() {
    let tmp = TempDir::new().unwrap();
    let path = write_doc(&tmp, "general/general.xml", "<not xml");
    assert!(matches!(
        load_hierarchy(&path),
        Err(HierarchyError::InvalidFormat { .. })
    ));
}

#[test]
fn broken_xml_is_malformed() {
    let tmp = TempDir::new().unwrap();
    let path = write_doc(&tmp, "ny-laws/general/general.xml", "<code type=\"Root\"><name>x</code>");
    assert!(matches!(
        load_hierarchy(&path),
        Err(HierarchyError::MalformedDocument { .. })
    ));
}

#[test]
fn missing_root_marker_is_malformed() {
    let tmp = TempDir::new().unwrap();
    let path = write_doc(
        &tmp,
        "ny-regs/health/health.xml",
        "<code><name>Health</name><code><number>1</number><name>A</name></code></code>",
    );
    let err = load_hierarchy(&path).unwrap_err();
    assert_eq!(err.kind(), "malformed_document");
}
