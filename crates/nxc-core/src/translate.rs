// ──────────────────────────────────────────────────────────────────────────────
// nxc-core · translate
// ──────────────────────────────────────────────────────────────────────────────
// Turns a parsed response into typed entities:
//  • locate the repeated sibling set (multistatus `response` / OCS `element`)
//  • find each sibling's property block (2xx propstat → any propstat → prop)
//  • apply the entity schema
//  • shape the result: single, flat list, members (skip the queried node)
//    or a first-as-parent tree
// ──────────────────────────────────────────────────────────────────────────────

use crate::schema::{apply_schema, Record, Schema};
use crate::xml::XmlNode;
use serde::Serialize;
use std::ops::{Deref, DerefMut};

// ── Entity ───────────────────────────────────────────────────────────────────

/// A typed remote object built from a schema record.
pub trait Entity: Sized {
    const SCHEMA: Schema;

    fn from_record(record: &Record) -> Self;
}

// ── Sibling location ─────────────────────────────────────────────────────────

/// Where the repeated nodes of a response live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Siblings {
    /// `multistatus/response` of a DAV reply.
    Multistatus,
    /// Nodes matched by an OCS path such as `data/element`; each node is its
    /// own property block.
    Elements(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Single,
    List,
    /// List without the first sibling, which is the queried collection.
    Members,
    /// First sibling is the parent, the rest are its children.
    Tree,
}

struct Sibling<'a> {
    href: Option<String>,
    block: Option<&'a XmlNode>,
}

fn locate(doc: &XmlNode, siblings: Siblings) -> Vec<Sibling<'_>> {
    match siblings {
        Siblings::Multistatus => doc
            .select("multistatus/response")
            .into_iter()
            .map(|node| Sibling {
                href: node.child("href").map(|h| h.text()),
                block: property_block(node),
            })
            .collect(),
        Siblings::Elements(path) => doc
            .select(path)
            .into_iter()
            .map(|node| Sibling {
                href: None,
                block: Some(node),
            })
            .collect(),
    }
}

/// The `prop` node of a multistatus response. Servers split properties
/// across one `propstat` per status; the 2xx one holds the values.
fn property_block(response: &XmlNode) -> Option<&XmlNode> {
    let propstats: Vec<&XmlNode> = response.children_named("propstat").collect();
    let chosen: Option<&XmlNode> = propstats
        .iter()
        .copied()
        .find(|ps| ps.child("status").map(|s| is_success_line(&s.text())).unwrap_or(false))
        .or_else(|| propstats.first().copied());

    match chosen {
        Some(ps) => ps.child("prop"),
        None => response.child("prop"),
    }
}

fn is_success_line(status: &str) -> bool {
    status
        .split_whitespace()
        .nth(1)
        .map(|code| code.starts_with('2'))
        .unwrap_or(false)
}

fn build<E: Entity>(sibling: &Sibling<'_>) -> E {
    E::from_record(&apply_schema(E::SCHEMA, sibling.href.as_deref(), sibling.block))
}

// ── Tree ─────────────────────────────────────────────────────────────────────

/// A parent entity with an ordered, lazily created list of children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tree<E> {
    #[serde(flatten)]
    root: E,
    #[serde(skip_serializing_if = "Option::is_none")]
    contents: Option<Vec<E>>,
}

impl<E> Tree<E> {
    pub fn new(root: E) -> Self {
        Self { root, contents: None }
    }

    /// Append a child, creating the list on first use.
    pub fn add(&mut self, child: E) -> &mut Vec<E> {
        let contents = self.contents.get_or_insert_with(Vec::new);
        contents.push(child);
        contents
    }

    /// Empty slice when no child was ever added.
    pub fn contents(&self) -> &[E] {
        self.contents.as_deref().unwrap_or(&[])
    }

    pub fn has_contents(&self) -> bool {
        self.contents.is_some()
    }

    pub fn root(&self) -> &E {
        &self.root
    }

    pub fn into_parts(self) -> (E, Vec<E>) {
        (self.root, self.contents.unwrap_or_default())
    }
}

impl<E: Entity> Tree<E> {
    pub fn add_record(&mut self, record: &Record) -> &mut Vec<E> {
        self.add(E::from_record(record))
    }
}

impl<E> Deref for Tree<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.root
    }
}

impl<E> DerefMut for Tree<E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.root
    }
}

// ── Translation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Translated<E> {
    Single(Option<E>),
    List(Vec<E>),
    Tree(Option<Tree<E>>),
}

/// Translate `doc` into the requested shape. The caller is expected to have
/// ruled out an `<error>` body already.
pub fn translate<E: Entity>(doc: &XmlNode, siblings: Siblings, shape: Shape) -> Translated<E> {
    match shape {
        Shape::Single => Translated::Single(translate_single(doc, siblings)),
        Shape::List => Translated::List(translate_list(doc, siblings)),
        Shape::Members => Translated::List(translate_members(doc, siblings)),
        Shape::Tree => Translated::Tree(translate_tree(doc, siblings)),
    }
}

pub fn translate_single<E: Entity>(doc: &XmlNode, siblings: Siblings) -> Option<E> {
    locate(doc, siblings).first().map(build)
}

pub fn translate_list<E: Entity>(doc: &XmlNode, siblings: Siblings) -> Vec<E> {
    locate(doc, siblings).iter().map(build).collect()
}

pub fn translate_members<E: Entity>(doc: &XmlNode, siblings: Siblings) -> Vec<E> {
    locate(doc, siblings).iter().skip(1).map(build).collect()
}

pub fn translate_tree<E: Entity>(doc: &XmlNode, siblings: Siblings) -> Option<Tree<E>> {
    let found = locate(doc, siblings);
    let mut iter = found.iter();
    let mut tree = Tree::new(build::<E>(iter.next()?));
    for sibling in iter {
        tree.add_record(&apply_schema(E::SCHEMA, sibling.href.as_deref(), sibling.block));
    }
    Some(tree)
}

/// Text of every node matched by `path`, for id listings.
pub fn texts(doc: &XmlNode, path: &str) -> Vec<String> {
    doc.select(path).into_iter().map(|n| n.text()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DecodeRule, Field, Source};

    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    struct Node {
        href: Option<String>,
        name: Option<String>,
        kind: Option<String>,
    }

    impl Entity for Node {
        const SCHEMA: Schema = &[
            Field::new("href", Source::Href, DecodeRule::Text),
            Field::text("name", "name"),
            Field::new("kind", Source::Prop("resourcetype"), DecodeRule::Kind),
        ];

        fn from_record(r: &Record) -> Self {
            Self {
                href: r.text("href"),
                name: r.text("name"),
                kind: r.text("kind"),
            }
        }
    }

    fn response(href: &str, inner: &str) -> String {
        format!(
            "<d:response><d:href>{}</d:href><d:propstat><d:prop>{}</d:prop>\
             <d:status>HTTP/1.1 200 OK</d:status></d:propstat></d:response>",
            href, inner
        )
    }

    fn multistatus(responses: &[String]) -> XmlNode {
        XmlNode::parse(&format!(
            "<?xml version=\"1.0\"?><d:multistatus xmlns:d=\"DAV:\">{}</d:multistatus>",
            responses.concat()
        ))
    }

    #[test]
    fn single_sibling_is_still_a_list() {
        let doc = multistatus(&[response("/a", "<name>a</name>")]);
        let list: Vec<Node> = translate_list(&doc, Siblings::Multistatus);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name.as_deref(), Some("a"));
    }

    #[test]
    fn empty_sibling_set_is_empty_list() {
        let doc = XmlNode::parse("<d:multistatus xmlns:d=\"DAV:\"/>");
        assert!(translate_list::<Node>(&doc, Siblings::Multistatus).is_empty());
        assert!(translate_members::<Node>(&doc, Siblings::Multistatus).is_empty());
        assert!(translate_tree::<Node>(&doc, Siblings::Multistatus).is_none());
        assert_eq!(
            translate::<Node>(&doc, Siblings::Multistatus, Shape::List),
            Translated::List(Vec::new())
        );
    }

    #[test]
    fn tree_keeps_order_and_count() {
        let doc = multistatus(&[
            response("/root/", "<name>root</name><resourcetype><collection/></resourcetype>"),
            response("/root/a", "<name>a</name><resourcetype/>"),
            response("/root/b", "<name>b</name>"),
            response("/root/c", "<name>c</name>"),
        ]);
        let tree: Tree<Node> = translate_tree(&doc, Siblings::Multistatus).unwrap();
        assert_eq!(tree.name.as_deref(), Some("root"));
        assert_eq!(tree.kind.as_deref(), Some("collection"));
        let names: Vec<_> = tree.contents().iter().map(|n| n.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(tree.contents()[0].kind.as_deref(), Some("file"));
    }

    #[test]
    fn single_sibling_tree_has_no_contents() {
        let doc = multistatus(&[response("/f", "<name>f</name>")]);
        let tree: Tree<Node> = translate_tree(&doc, Siblings::Multistatus).unwrap();
        assert!(!tree.has_contents());
        assert!(tree.contents().is_empty());
    }

    #[test]
    fn members_skip_the_collection() {
        let doc = multistatus(&[
            response("/tags/", ""),
            response("/tags/1", "<name>one</name>"),
            response("/tags/2", "<name>two</name>"),
        ]);
        let members: Vec<Node> = translate_members(&doc, Siblings::Multistatus);
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].href.as_deref(), Some("/tags/1"));
    }

    #[test]
    fn prefers_successful_propstat() {
        let body = "<d:multistatus xmlns:d=\"DAV:\"><d:response><d:href>/x</d:href>\
            <d:propstat><d:prop><name/></d:prop><d:status>HTTP/1.1 404 Not Found</d:status></d:propstat>\
            <d:propstat><d:prop><name>x</name></d:prop><d:status>HTTP/1.1 200 OK</d:status></d:propstat>\
            </d:response></d:multistatus>";
        let node: Node = translate_single(&XmlNode::parse(body), Siblings::Multistatus).unwrap();
        assert_eq!(node.name.as_deref(), Some("x"));
    }

    #[test]
    fn falls_back_to_direct_prop() {
        let body = "<multistatus><response><href>/x</href><prop><name>flat</name></prop></response></multistatus>";
        let node: Node = translate_single(&XmlNode::parse(body), Siblings::Multistatus).unwrap();
        assert_eq!(node.name.as_deref(), Some("flat"));
    }

    #[test]
    fn ocs_elements_are_their_own_block() {
        let body = "<ocs><meta/><data><element><name>a</name></element><element><name>b</name></element></data></ocs>";
        let list: Vec<Node> = translate_list(&XmlNode::parse(body), Siblings::Elements("data/element"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name.as_deref(), Some("b"));
        assert_eq!(list[1].href, None);
    }

    #[test]
    fn translating_twice_gives_independent_results() {
        let doc = multistatus(&[response("/r/", ""), response("/r/a", "<name>a</name>")]);
        let mut first: Tree<Node> = translate_tree(&doc, Siblings::Multistatus).unwrap();
        let second: Tree<Node> = translate_tree(&doc, Siblings::Multistatus).unwrap();
        assert_eq!(first, second);
        first.add(Node::default());
        assert_eq!(first.contents().len(), 2);
        assert_eq!(second.contents().len(), 1);
    }

    #[test]
    fn tree_serializes_flat_with_contents() {
        let mut tree = Tree::new(Node {
            name: Some("p".into()),
            ..Default::default()
        });
        let json = serde_json::to_value(&tree).unwrap();
        assert!(json.get("contents").is_none());
        tree.add(Node::default());
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["name"], "p");
        assert_eq!(json["contents"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn texts_collects_ids() {
        let doc = XmlNode::parse("<ocs><data><users><element>a</element><element>b</element></users></data></ocs>");
        assert_eq!(texts(&doc, "data/users/element"), vec!["a", "b"]);
    }
}
