//! Namespace-agnostic XML tree.
//!
//! Nextcloud answers with documents whose prefixes vary between endpoints
//! (`d:`, `D:`, `a:`, `oc:`, `nc:` or none at all), so every element is kept
//! under its local name only. Lookups are then plain name matches.
//!
//! Parsing never fails: an empty body is an empty document and a malformed
//! body keeps whatever was read before the fault.

use log::warn;
use quick_xml::events::Event;
use quick_xml::Reader;

// ─── Node ───────────────────────────────────────────────────────────────────

/// One element of a parsed document, stored without its namespace prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    /// Own text runs, each tagged with the number of child elements that
    /// precede it.
    runs: Vec<(usize, String)>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Parse a response body into a synthetic document node whose children
    /// are the top-level elements.
    pub fn parse(input: &str) -> Self {
        let mut reader = Reader::from_str(input);
        reader.config_mut().check_end_names = false;

        let mut stack: Vec<XmlNode> = vec![XmlNode::new("")];

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(XmlNode::new(local_name(e.local_name().as_ref())));
                }
                Ok(Event::Empty(ref e)) => {
                    let node = XmlNode::new(local_name(e.local_name().as_ref()));
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
                Ok(Event::End(_)) => close_top(&mut stack),
                Ok(Event::Text(ref e)) => {
                    let text = match e.unescape() {
                        Ok(t) => t.into_owned(),
                        Err(_) => String::from_utf8_lossy(e).into_owned(),
                    };
                    push_text(&mut stack, &text);
                }
                Ok(Event::CData(ref e)) => {
                    push_text(&mut stack, &String::from_utf8_lossy(e));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    warn!(
                        "malformed XML at byte {}, keeping partial document: {}",
                        reader.buffer_position(),
                        e
                    );
                    break;
                }
                _ => {}
            }
        }

        while stack.len() > 1 {
            close_top(&mut stack);
        }
        stack.pop().unwrap_or_default()
    }

    /// Parse raw bytes, replacing invalid UTF-8 sequences.
    pub fn parse_bytes(input: &[u8]) -> Self {
        Self::parse(&String::from_utf8_lossy(input))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn has_elements(&self) -> bool {
        !self.children.is_empty()
    }

    /// True when the node has neither child elements nor text.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.runs.is_empty()
    }

    /// Text content of the node and all of its descendants, in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut runs = self.runs.iter().peekable();
        for (index, child) in self.children.iter().enumerate() {
            while let Some((_, run)) = runs.next_if(|(at, _)| *at <= index) {
                out.push_str(run);
            }
            out.push_str(&child.text());
        }
        for (_, run) in runs {
            out.push_str(run);
        }
        out
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// All descendants (not including `self`) with the given local name, in
    /// document order.
    pub fn descendants(&self, name: &str) -> Vec<&XmlNode> {
        let mut out = Vec::new();
        collect_descendants(self, name, &mut out);
        out
    }

    /// Evaluate a `//a/b/c`-style path: the first step matches descendants
    /// anywhere below `self`, every later step matches direct children. A
    /// step of `*` matches any element.
    pub fn select(&self, path: &str) -> Vec<&XmlNode> {
        let mut steps = path.trim_start_matches('/').split('/').filter(|s| !s.is_empty());
        let first = match steps.next() {
            Some(step) => step,
            None => return Vec::new(),
        };

        let mut current: Vec<&XmlNode> = if first == "*" {
            let mut all = Vec::new();
            collect_all(self, &mut all);
            all
        } else {
            self.descendants(first)
        };

        for step in steps {
            current = current
                .into_iter()
                .flat_map(|n| n.children.iter().filter(move |c| step == "*" || c.name == step))
                .collect();
        }
        current
    }

    pub fn first(&self, path: &str) -> Option<&XmlNode> {
        self.select(path).into_iter().next()
    }

    pub fn exists(&self, path: &str) -> bool {
        self.first(path).is_some()
    }

    /// Concatenated text of every node matched by `path`, `None` when nothing
    /// matches.
    pub fn text_at(&self, path: &str) -> Option<String> {
        let nodes = self.select(path);
        if nodes.is_empty() {
            return None;
        }
        Some(nodes.iter().map(|n| n.text()).collect())
    }

    /// Builder used by tests and by callers assembling synthetic documents.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.runs.push((self.children.len(), text.into()));
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn close_top(stack: &mut Vec<XmlNode>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(node) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(node);
        }
    }
}

fn push_text(stack: &mut [XmlNode], text: &str) {
    // Indentation between elements.
    if text.trim().is_empty() {
        return;
    }
    if let Some(top) = stack.last_mut() {
        top.runs.push((top.children.len(), text.to_string()));
    }
}

fn collect_descendants<'a>(node: &'a XmlNode, name: &str, out: &mut Vec<&'a XmlNode>) {
    for child in &node.children {
        if child.name == name {
            out.push(child);
        }
        collect_descendants(child, name, out);
    }
}

fn collect_all<'a>(node: &'a XmlNode, out: &mut Vec<&'a XmlNode>) {
    for child in &node.children {
        out.push(child);
        collect_all(child, out);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const MULTISTATUS: &str = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns">
  <d:response>
    <d:href>/remote.php/dav/files/alice/</d:href>
    <d:propstat>
      <d:prop>
        <d:resourcetype><d:collection/></d:resourcetype>
        <oc:fileid>12</oc:fileid>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

    #[test]
    fn prefixes_are_stripped() {
        let doc = XmlNode::parse(MULTISTATUS);
        let root = &doc.children()[0];
        assert_eq!(root.name(), "multistatus");
        assert_eq!(doc.text_at("fileid").as_deref(), Some("12"));
        assert!(doc.exists("resourcetype/collection"));
    }

    #[test]
    fn different_prefixes_resolve_to_the_same_name() {
        let a = XmlNode::parse(r#"<a:prop xmlns:a="DAV:"><a:x>1</a:x></a:prop>"#);
        let b = XmlNode::parse(r#"<prop><x>1</x></prop>"#);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_body_is_empty_document() {
        let doc = XmlNode::parse("");
        assert!(doc.is_empty());
        assert!(doc.select("error").is_empty());
    }

    #[test]
    fn malformed_body_keeps_partial_tree() {
        let doc = XmlNode::parse("<ocs><meta><status>ok</status></meta><data><<<");
        assert_eq!(doc.text_at("meta/status").as_deref(), Some("ok"));
    }

    #[test]
    fn unclosed_elements_are_attached() {
        let doc = XmlNode::parse("<ocs><meta><status>failure");
        assert_eq!(doc.text_at("status").as_deref(), Some("failure"));
    }

    #[test]
    fn select_wildcard_children() {
        let doc = XmlNode::parse(
            "<ocs><meta><status>ok</status><statuscode>100</statuscode></meta></ocs>",
        );
        let names: Vec<&str> = doc.select("meta/*").iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["status", "statuscode"]);
    }

    #[test]
    fn select_child_steps_do_not_descend() {
        let doc = XmlNode::parse(
            "<ocs><data><element><x><element>nested</element></x></element></data></ocs>",
        );
        assert_eq!(doc.select("data/element").len(), 1);
        assert_eq!(doc.select("element").len(), 2);
    }

    #[test]
    fn entities_and_cdata_are_decoded() {
        let doc = XmlNode::parse("<m><a>Tom &amp; Jerry</a><b><![CDATA[<raw>]]></b></m>");
        assert_eq!(doc.text_at("a").as_deref(), Some("Tom & Jerry"));
        assert_eq!(doc.text_at("b").as_deref(), Some("<raw>"));
    }

    #[test]
    fn text_concatenates_descendants() {
        let doc = XmlNode::parse("<r><a>1<b>2</b><c>3</c></a></r>");
        assert_eq!(doc.text_at("a").as_deref(), Some("123"));
    }

    #[test]
    fn mixed_content_keeps_document_order() {
        let doc = XmlNode::parse("<r><a>x<b>y</b>z</a></r>");
        assert_eq!(doc.text_at("a").as_deref(), Some("xyz"));
        let built = XmlNode::new("a")
            .with_text("x")
            .with_child(XmlNode::new("b").with_text("y"))
            .with_text("z");
        assert_eq!(built.text(), "xyz");
    }

    #[test]
    fn text_at_missing_is_none() {
        let doc = XmlNode::parse("<r/>");
        assert_eq!(doc.text_at("nope"), None);
    }
}
