//! Hierarchy builder for legal-code documents.
//!
//! A source document is a tree of `code` elements. The element carrying
//! `type="Root"` is the document root; every nested `code` element is a
//! section. Each element may carry `number`, `name`, and `version` children,
//! and leaf text lives under descendant `codetext` elements:
//!
//! ```xml
//! <code type="Root">
//!   <name>NY Code</name>
//!   <code type="Article">
//!     <number>1</number><name>General</name>
//!     <code type="Section">
//!       <number>1.1</number><name>Definitions</name>
//!       <codetext><p>A term means...</p></codetext>
//!     </code>
//!   </code>
//! </code>
//! ```
//!
//! [`Hierarchy::build`] turns that tree into an arena of [`Section`]s. Every
//! section gets its hierarchical title, name and number chains, a stable id,
//! and (for leaves) its text content. Leaves are additionally collected,
//! in depth-first pre-order, into the list handed to indexing.
//!
//! The arena stores parents as indices, so the tree has back-references
//! without reference cycles. Sections are immutable once built.

use std::path::Path;

use tracing::debug;

use crate::chunk::chunk_section;
use crate::element::DocumentNode;
use crate::error::HierarchyError;
use crate::models::{Section, SectionIndex, SectionRecord};
use crate::normalize::{
    clean_label, compose, content_hash, own_title, section_id, PATH_SEPARATOR, TITLE_SEPARATOR,
};
use crate::source_path::SourceInfo;

/// Tag of container and leaf elements.
pub const CODE_TAG: &str = "code";
/// Tag of text-bearing elements beneath a leaf.
pub const CODETEXT_TAG: &str = "codetext";
/// Attribute and value marking the document root.
pub const ROOT_ATTR: &str = "type";
pub const ROOT_MARKER: &str = "Root";
/// Version assumed when an element has no (or an empty) `version` child.
pub const DEFAULT_VERSION: &str = "1";

const ROOT: SectionIndex = SectionIndex(0);

/// A parsed legal-code document: the section arena plus its ordered leaves.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    source: SourceInfo,
    nodes: Vec<Section>,
    leaves: Vec<SectionIndex>,
}

impl Hierarchy {
    /// Decode `path` and build the hierarchy of `document`.
    ///
    /// Does not touch the filesystem; see the harness loader for the
    /// existence check and XML parsing.
    pub fn from_document<N: DocumentNode>(
        document: &N,
        path: &Path,
    ) -> Result<Self, HierarchyError> {
        let source = SourceInfo::from_path(path)?;
        Self::build(document, source)
    }

    /// Build the hierarchy rooted at the `type="Root"` element of `document`
    /// (`document` itself or any descendant).
    ///
    /// # Errors
    ///
    /// [`HierarchyError::MalformedDocument`] when there is not exactly one
    /// root marker, or a section at any depth has neither number nor name
    /// to derive a title from.
    pub fn build<N: DocumentNode>(document: &N, source: SourceInfo) -> Result<Self, HierarchyError> {
        let root_el = find_root(document).ok_or_else(|| {
            HierarchyError::malformed(
                &source.path,
                format!("no element with {ROOT_ATTR}=\"{ROOT_MARKER}\""),
            )
        })?;
        let markers = count_root_markers(document);
        if markers > 1 {
            return Err(HierarchyError::malformed(
                &source.path,
                format!("{markers} elements with {ROOT_ATTR}=\"{ROOT_MARKER}\", expected one"),
            ));
        }

        let mut builder = Builder {
            source: &source,
            nodes: Vec::new(),
            leaves: Vec::new(),
        };
        builder.build_root(root_el)?;
        let Builder { nodes, leaves, .. } = builder;

        debug!(
            path = %source.path.display(),
            sections = nodes.len(),
            leaves = leaves.len(),
            "built hierarchy"
        );

        Ok(Self {
            source,
            nodes,
            leaves,
        })
    }

    pub fn source(&self) -> &SourceInfo {
        &self.source
    }

    pub fn state(&self) -> &str {
        &self.source.state
    }

    pub fn law_type(&self) -> crate::source_path::LawType {
        self.source.law_type
    }

    pub fn root(&self) -> &Section {
        &self.nodes[ROOT.0]
    }

    /// Leaf sections in depth-first pre-order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.leaves.iter().map(move |idx| &self.nodes[idx.0])
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Every section, root first, in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> + '_ {
        self.nodes.iter()
    }

    /// Total number of sections including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a built hierarchy has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, section: &Section) -> Option<&Section> {
        section.parent.map(|idx| &self.nodes[idx.0])
    }

    pub fn children<'a>(&'a self, section: &'a Section) -> impl Iterator<Item = &'a Section> + 'a {
        section.children.iter().map(move |idx| &self.nodes[idx.0])
    }

    /// Resolve a `/`-separated child-index path such as `0/1/2`, starting
    /// at the root. An empty locator resolves to the root itself.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::InvalidLocator`] for a non-numeric segment,
    /// [`HierarchyError::IndexOutOfRange`] when a step has no such child.
    pub fn locate(&self, locator: &str) -> Result<&Section, HierarchyError> {
        let mut current = self.root();
        let trimmed = locator.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Ok(current);
        }

        for (depth, segment) in trimmed.split('/').enumerate() {
            let index: usize =
                segment
                    .trim()
                    .parse()
                    .map_err(|_| HierarchyError::InvalidLocator {
                        locator: locator.to_string(),
                        segment: segment.to_string(),
                    })?;
            let child = current
                .children
                .get(index)
                .ok_or_else(|| HierarchyError::IndexOutOfRange {
                    locator: locator.to_string(),
                    depth,
                    index,
                    len: current.children.len(),
                })?;
            current = &self.nodes[child.0];
        }
        Ok(current)
    }

    /// Flatten the leaves into indexing records, chunking each leaf's
    /// content into paragraphs of at most `max_tokens`.
    pub fn records(&self, max_tokens: usize) -> Vec<SectionRecord> {
        let source_path = self.source.path.display().to_string();
        self.sections()
            .map(|s| {
                let section_id = s.id.to_string();
                SectionRecord {
                    section_id: s.id,
                    state: self.source.state.clone(),
                    law_type: self.source.law_type,
                    title: self.source.title.clone(),
                    name: s.name.clone(),
                    number: s.number.clone(),
                    version: s.version.clone(),
                    hierarchical_name: s.hierarchical_name.clone(),
                    hierarchical_number: s.hierarchical_number.clone(),
                    hierarchical_title: s.hierarchical_title.clone(),
                    locator: s.locator.clone(),
                    source_path: source_path.clone(),
                    content: s.content.clone(),
                    content_hash: content_hash(&s.content),
                    paragraphs: chunk_section(&section_id, &s.content, max_tokens),
                }
            })
            .collect()
    }
}

/// Own labels of an element, already cleaned.
struct Labels {
    number: String,
    name: String,
    version: String,
}

impl Labels {
    fn of<N: DocumentNode>(el: &N) -> Self {
        let label = |tag: &str| clean_label(&el.child_text(tag).unwrap_or_default());
        let version = el
            .child_text("version")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        Self {
            number: label("number"),
            name: label("name"),
            version,
        }
    }
}

struct Builder<'s> {
    source: &'s SourceInfo,
    nodes: Vec<Section>,
    leaves: Vec<SectionIndex>,
}

impl Builder<'_> {
    fn build_root<N: DocumentNode>(&mut self, el: &N) -> Result<(), HierarchyError> {
        let labels = Labels::of(el);
        let title = own_title(&labels.number, &labels.name);
        if title.is_empty() {
            return Err(HierarchyError::malformed(
                &self.source.path,
                "root element has neither number nor name",
            ));
        }

        self.nodes.push(Section {
            id: section_id(&title, &labels.version),
            hierarchical_name: labels.name.clone(),
            hierarchical_number: labels.number.clone(),
            hierarchical_title: title,
            name: labels.name,
            number: labels.number,
            version: labels.version,
            content: String::new(),
            locator: String::new(),
            depth: 0,
            parent: None,
            children: Vec::new(),
        });

        for (position, child) in containers(el).enumerate() {
            self.build_node(child, ROOT, position)?;
        }
        Ok(())
    }

    fn build_node<N: DocumentNode>(
        &mut self,
        el: &N,
        parent: SectionIndex,
        position: usize,
    ) -> Result<SectionIndex, HierarchyError> {
        let labels = Labels::of(el);
        let parent_node = &self.nodes[parent.0];

        // The root names the document; it is not part of a section's address.
        let (title_prefix, name_prefix, number_prefix, locator) = if parent_node.is_root() {
            ("", "", "", position.to_string())
        } else {
            (
                parent_node.hierarchical_title.as_str(),
                parent_node.hierarchical_name.as_str(),
                parent_node.hierarchical_number.as_str(),
                format!("{}/{position}", parent_node.locator),
            )
        };

        let own = own_title(&labels.number, &labels.name);
        if own.is_empty() {
            return Err(HierarchyError::malformed(
                &self.source.path,
                format!("section at `{locator}` has neither number nor name"),
            ));
        }
        let hierarchical_title = compose(title_prefix, &own, TITLE_SEPARATOR);
        let hierarchical_name = compose(name_prefix, &labels.name, PATH_SEPARATOR);
        let hierarchical_number = compose(number_prefix, &labels.number, PATH_SEPARATOR);
        let depth = parent_node.depth + 1;

        let is_leaf = containers(el).next().is_none();
        let content = if is_leaf {
            leaf_content(el)
        } else {
            String::new()
        };

        let index = SectionIndex(self.nodes.len());
        self.nodes.push(Section {
            id: section_id(&hierarchical_title, &labels.version),
            name: labels.name,
            number: labels.number,
            version: labels.version,
            hierarchical_name,
            hierarchical_number,
            hierarchical_title,
            content,
            locator,
            depth,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(index);

        if is_leaf {
            self.leaves.push(index);
            return Ok(index);
        }

        for (position, child) in containers(el).enumerate() {
            self.build_node(child, index, position)?;
        }
        Ok(index)
    }
}

/// Direct `code` children of an element.
fn containers<N: DocumentNode>(el: &N) -> impl Iterator<Item = &N> {
    el.child_elements().filter(|child| child.tag() == CODE_TAG)
}

fn is_root_marker<N: DocumentNode>(node: &N) -> bool {
    node.attribute(ROOT_ATTR) == Some(ROOT_MARKER)
}

fn find_root<N: DocumentNode>(node: &N) -> Option<&N> {
    if is_root_marker(node) {
        return Some(node);
    }
    node.child_elements().find_map(find_root)
}

fn count_root_markers<N: DocumentNode>(node: &N) -> usize {
    let below: usize = node.child_elements().map(count_root_markers).sum();
    usize::from(is_root_marker(node)) + below
}

/// Concatenate the non-blank text fragments of every `codetext` element
/// beneath `el`, in document order.
fn leaf_content<N: DocumentNode>(el: &N) -> String {
    let mut out = String::new();
    collect_codetext(el, &mut out);
    out
}

fn collect_codetext<N: DocumentNode>(el: &N, out: &mut String) {
    for child in el.child_elements() {
        if child.tag() == CODETEXT_TAG {
            for fragment in child.itertext() {
                if !fragment.trim().is_empty() {
                    out.push_str(fragment);
                }
            }
        } else {
            collect_codetext(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn source() -> SourceInfo {
        SourceInfo::from_path(Path::new("/corpus/ny-laws/general/general.xml")).unwrap()
    }

    fn code(number: &str, name: &str) -> Element {
        Element::new(CODE_TAG)
            .with_child(Element::leaf("number", number))
            .with_child(Element::leaf("name", name))
    }

    fn text(body: &str) -> Element {
        Element::leaf(CODETEXT_TAG, body)
    }

    fn root() -> Element {
        Element::new(CODE_TAG)
            .with_attr(ROOT_ATTR, ROOT_MARKER)
            .with_child(Element::leaf("number", ""))
            .with_child(Element::leaf("name", "NY Code"))
    }

    /// root → (1 General → 1.1 Definitions, 1.2 Scope), (2 Penalties → 2.1 Fines)
    fn two_articles() -> Element {
        root()
            .with_child(
                code("1", "General")
                    .with_child(code("1.1", "Definitions").with_child(text("A term means...")))
                    .with_child(code("1.2", "Scope").with_child(text("This chapter applies."))),
            )
            .with_child(
                code("2", "Penalties")
                    .with_child(code("2.1", "Fines").with_child(text("Fines are due."))),
            )
    }

    #[test]
    fn single_leaf_scenario() {
        let doc = root().with_child(
            code("1", "General")
                .with_child(code("1.1", "Definitions").with_child(text("A term means..."))),
        );
        let h = Hierarchy::build(&doc, source()).unwrap();
        let leaves: Vec<&Section> = h.sections().collect();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].hierarchical_title, "1 General - 1.1 Definitions");
        assert_eq!(leaves[0].hierarchical_name, "General -> Definitions");
        assert_eq!(leaves[0].hierarchical_number, "1 -> 1.1");
        assert_eq!(leaves[0].content, "A term means...");
        assert_eq!(leaves[0].locator, "0/0");
    }

    #[test]
    fn ids_are_stable_across_builds() {
        let doc = two_articles();
        let a = Hierarchy::build(&doc, source()).unwrap();
        let b = Hierarchy::build(&doc, source()).unwrap();
        let ids_a: Vec<_> = a.sections().map(|s| s.id).collect();
        let ids_b: Vec<_> = b.sections().map(|s| s.id).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(
            ids_a[0],
            section_id("1 General - 1.1 Definitions", DEFAULT_VERSION)
        );
    }

    #[test]
    fn root_is_labelled_but_not_retrievable() {
        let h = Hierarchy::build(&two_articles(), source()).unwrap();
        let root = h.root();
        assert_eq!(root.hierarchical_title, "NY Code");
        assert_eq!(root.content, "");
        assert!(root.parent.is_none());
        assert_eq!(root.children.len(), 2);
        assert!(h.sections().all(|s| !s.is_root()));
    }

    #[test]
    fn leaves_are_collected_in_preorder() {
        let h = Hierarchy::build(&two_articles(), source()).unwrap();
        let titles: Vec<&str> = h.sections().map(|s| s.hierarchical_title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "1 General - 1.1 Definitions",
                "1 General - 1.2 Scope",
                "2 Penalties - 2.1 Fines",
            ]
        );
    }

    #[test]
    fn sections_partition_leaves_from_containers() {
        let h = Hierarchy::build(&two_articles(), source()).unwrap();
        let expected: Vec<_> = h
            .iter()
            .filter(|s| s.is_leaf())
            .map(|s| s.id)
            .collect();
        let actual: Vec<_> = h.sections().map(|s| s.id).collect();
        assert_eq!(actual, expected);
        assert_eq!(h.leaf_count(), 3);
        assert_eq!(h.len(), 6);
        for container in h.iter().filter(|s| !s.is_leaf()) {
            assert_eq!(container.content, "");
        }
    }

    #[test]
    fn titles_extend_their_parent() {
        let doc = root().with_child(
            code("1", "General").with_child(
                code("A", "Part A")
                    .with_child(code("1.1", "Definitions").with_child(text("x"))),
            ),
        );
        let h = Hierarchy::build(&doc, source()).unwrap();
        for section in h.iter() {
            let Some(parent) = h.parent(section) else {
                continue;
            };
            if parent.is_root() {
                continue;
            }
            let prefix = format!("{}{}", parent.hierarchical_title, TITLE_SEPARATOR);
            assert!(
                section.hierarchical_title.starts_with(&prefix),
                "{} does not extend {}",
                section.hierarchical_title,
                parent.hierarchical_title
            );
        }
        assert_eq!(
            h.sections().next().unwrap().hierarchical_title,
            "1 General - A Part A - 1.1 Definitions"
        );
    }

    #[test]
    fn labels_are_trimmed_and_collapsed() {
        let doc = root().with_child(code("  2 ", "Article  1").with_child(text("body")));
        let h = Hierarchy::build(&doc, source()).unwrap();
        let leaf = h.sections().next().unwrap();
        assert_eq!(leaf.name, "Article 1");
        assert_eq!(leaf.number, "2");
        assert_eq!(leaf.hierarchical_title, "2 Article 1");
    }

    #[test]
    fn missing_version_defaults_to_one() {
        let doc = root().with_child(code("1", "General").with_child(text("x")));
        let h = Hierarchy::build(&doc, source()).unwrap();
        assert_eq!(h.sections().next().unwrap().version, "1");
    }

    #[test]
    fn explicit_version_changes_the_id() {
        let plain = root().with_child(code("1", "General").with_child(text("x")));
        let versioned = root().with_child(
            code("1", "General")
                .with_child(Element::leaf("version", " 3 "))
                .with_child(text("x")),
        );
        let a = Hierarchy::build(&plain, source()).unwrap();
        let b = Hierarchy::build(&versioned, source()).unwrap();
        let leaf_b = b.sections().next().unwrap();
        assert_eq!(leaf_b.version, "3");
        assert_ne!(a.sections().next().unwrap().id, leaf_b.id);
    }

    #[test]
    fn content_skips_blank_fragments_and_nested_markup() {
        let body = Element::new(CODETEXT_TAG)
            .with_text("\n   ")
            .with_child(Element::leaf("p", "(a) First."))
            .with_text("\n   ")
            .with_child(Element::new("p").with_text("(b) ").with_child(Element::leaf("i", "Second.")));
        let doc = root().with_child(
            code("1", "General")
                .with_child(body)
                .with_child(Element::new("notes").with_child(text(" Note."))),
        );
        let h = Hierarchy::build(&doc, source()).unwrap();
        assert_eq!(
            h.sections().next().unwrap().content,
            "(a) First.(b) Second. Note."
        );
    }

    #[test]
    fn root_marker_may_be_nested() {
        let doc = Element::new("law").with_child(two_articles());
        let h = Hierarchy::build(&doc, source()).unwrap();
        assert_eq!(h.leaf_count(), 3);
    }

    #[test]
    fn missing_root_marker_is_malformed() {
        let doc = Element::new(CODE_TAG).with_child(code("1", "General"));
        let err = Hierarchy::build(&doc, source()).unwrap_err();
        assert!(matches!(err, HierarchyError::MalformedDocument { .. }));
    }

    #[test]
    fn untitled_section_is_malformed() {
        let doc = root().with_child(Element::new(CODE_TAG).with_child(text("orphan")));
        let err = Hierarchy::build(&doc, source()).unwrap_err();
        assert!(matches!(err, HierarchyError::MalformedDocument { .. }));
    }

    #[test]
    fn nested_untitled_section_is_malformed() {
        let doc = root().with_child(
            code("1", "General")
                .with_child(code("1.1", "Definitions").with_child(text("A term means...")))
                .with_child(Element::new(CODE_TAG).with_child(text("orphan"))),
        );
        match Hierarchy::build(&doc, source()).unwrap_err() {
            HierarchyError::MalformedDocument { reason, .. } => {
                assert!(reason.contains("`0/1`"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn number_or_name_alone_is_enough() {
        let doc = root().with_child(
            code("1", "General")
                .with_child(code("1.1", "").with_child(text("a")))
                .with_child(code("", "Scope").with_child(text("b"))),
        );
        let h = Hierarchy::build(&doc, source()).unwrap();
        let titles: Vec<&str> = h.sections().map(|s| s.hierarchical_title.as_str()).collect();
        assert_eq!(titles, vec!["1 General - 1.1", "1 General - Scope"]);
    }

    #[test]
    fn second_root_marker_is_malformed() {
        let doc = Element::new("law")
            .with_child(two_articles())
            .with_child(root().with_child(code("9", "Other").with_child(text("x"))));
        match Hierarchy::build(&doc, source()).unwrap_err() {
            HierarchyError::MalformedDocument { reason, .. } => {
                assert!(reason.contains("2 elements"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_root_has_no_sections() {
        let h = Hierarchy::build(&root(), source()).unwrap();
        assert_eq!(h.leaf_count(), 0);
        assert!(!h.root().is_leaf());
    }

    #[test]
    fn locate_walks_child_indices() {
        let h = Hierarchy::build(&two_articles(), source()).unwrap();
        assert_eq!(h.locate("").unwrap().hierarchical_title, "NY Code");
        assert_eq!(h.locate("1").unwrap().name, "Penalties");
        assert_eq!(h.locate("0/1").unwrap().name, "Scope");
        for leaf in h.sections() {
            assert_eq!(h.locate(&leaf.locator).unwrap().id, leaf.id);
        }
    }

    #[test]
    fn locate_out_of_range() {
        let h = Hierarchy::build(&two_articles(), source()).unwrap();
        match h.locate("0/5").unwrap_err() {
            HierarchyError::IndexOutOfRange {
                depth, index, len, ..
            } => {
                assert_eq!((depth, index, len), (1, 5, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            h.locate("7").unwrap_err(),
            HierarchyError::IndexOutOfRange { .. }
        ));
        // Leaves have no children to step into.
        assert!(matches!(
            h.locate("0/0/0").unwrap_err(),
            HierarchyError::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn locate_rejects_non_numeric_segments() {
        let h = Hierarchy::build(&two_articles(), source()).unwrap();
        assert!(matches!(
            h.locate("0/x").unwrap_err(),
            HierarchyError::InvalidLocator { .. }
        ));
    }

    #[test]
    fn records_carry_document_metadata() {
        let h = Hierarchy::build(&two_articles(), source()).unwrap();
        let records = h.records(512);
        assert_eq!(records.len(), 3);
        let first = &records[0];
        assert_eq!(first.state, "ny");
        assert_eq!(first.law_type, crate::source_path::LawType::Laws);
        assert_eq!(first.title, "general");
        assert_eq!(first.content_hash, content_hash("A term means..."));
        assert_eq!(first.paragraphs.len(), 1);
        assert_eq!(
            first.paragraphs[0].paragraph_id,
            format!("{}_0", first.section_id)
        );
    }
}
