//! Parsed-document abstraction consumed by the hierarchy builder.
//!
//! The builder never touches a concrete XML library. It asks a
//! [`DocumentNode`] for its tag, attributes, child elements and text, which
//! keeps the core free of parser dependencies. [`Element`] is the owned tree
//! the harness XML reader produces, and the one tests construct by hand.

/// Read-only view of one element in a parsed document.
pub trait DocumentNode {
    /// Local tag name (namespace prefix stripped).
    fn tag(&self) -> &str;

    /// Value of the attribute `name`, if present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Direct child elements, in document order.
    fn child_elements(&self) -> impl Iterator<Item = &Self>;

    /// Text placed directly inside this element (not inside its children),
    /// or `None` when the element has no text nodes at all.
    fn text(&self) -> Option<String>;

    /// Every text fragment beneath this element, descendants included, in
    /// document order.
    fn itertext(&self) -> Vec<&str>;

    /// First direct child element with the given tag.
    fn find_child(&self, tag: &str) -> Option<&Self> {
        self.child_elements().find(|child| child.tag() == tag)
    }

    /// Trimmed text of the first direct child named `tag`. Missing elements
    /// and elements without text both yield `None`.
    fn child_text(&self, tag: &str) -> Option<String> {
        self.find_child(tag)
            .and_then(|child| child.text())
            .map(|text| text.trim().to_string())
    }
}

/// A node in an owned element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// Owned XML-like element: tag, attributes, and ordered mixed content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style child element append.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder-style text append.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Shorthand for `<tag>text</tag>`.
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(tag).with_text(text)
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push(text),
                Node::Element(child) => child.collect_text(out),
            }
        }
    }
}

impl DocumentNode for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    fn text(&self) -> Option<String> {
        let mut found = false;
        let mut out = String::new();
        for node in &self.children {
            if let Node::Text(text) = node {
                found = true;
                out.push_str(text);
            }
        }
        found.then_some(out)
    }

    fn itertext(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_text(&mut out);
        out
    }
}
