//! Field schemas and decode rules.
//!
//! A schema is an ordered list of `(field, source, rule)` triples. Applying it
//! to one sibling of a response yields a [`Record`], which the entity structs
//! in [`crate::models`] read their fields from.

use crate::xml::XmlNode;
use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    static ref FILES_PREFIX: Regex = Regex::new(r"/remote\.php/dav/files/[^/]*/").unwrap();
    static ref FILES_ROOT: Regex = Regex::new(r"/remote\.php/dav/files/[^/]*(.*)").unwrap();
}

// ── Rules ────────────────────────────────────────────────────────────────────

/// How a boolean flag is read from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagRule {
    /// Value used when the property is missing or empty.
    pub when_absent: bool,
    /// Texts that decode to `false`; anything else is `true`.
    pub falsy: &'static [&'static str],
}

/// `has-preview`, `user-visible`, `user-assignable`, `isUnread`.
pub const PRESENCE_FLAG: FlagRule = FlagRule {
    when_absent: true,
    falsy: &["false"],
};

/// `favorite` is sent as `1`/`0` and is off when missing.
pub const FAVORITE_FLAG: FlagRule = FlagRule {
    when_absent: false,
    falsy: &["0", "false"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The `href` of a multistatus response.
    Href,
    /// A direct child of the property block, by local name.
    Prop(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeRule {
    /// Text content, `None` when missing or empty.
    Text,
    Flag(FlagRule),
    /// `"collection"` when the node has content, `"file"` otherwise.
    Kind,
    /// Href with the `/remote.php/dav/files/<user>/` prefix replaced by `/`.
    RelativePath,
    /// Last href segment, percent-decoded.
    DisplayName,
    /// Texts of the direct children, or of every descendant with the given
    /// name. A node holding bare text is a one-item list.
    Items(Option<&'static str>),
    /// Child element name → text.
    Pairs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub source: Source,
    pub rule: DecodeRule,
}

impl Field {
    pub const fn new(name: &'static str, source: Source, rule: DecodeRule) -> Self {
        Self { name, source, rule }
    }

    pub const fn text(name: &'static str, prop: &'static str) -> Self {
        Self::new(name, Source::Prop(prop), DecodeRule::Text)
    }

    pub const fn flag(name: &'static str, prop: &'static str, rule: FlagRule) -> Self {
        Self::new(name, Source::Prop(prop), DecodeRule::Flag(rule))
    }
}

pub type Schema = &'static [Field];

// ── Decoded values ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(Option<String>),
    Flag(bool),
    Items(Option<Vec<String>>),
    Pairs(Option<BTreeMap<String, String>>),
}

/// Field values in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(&'static str, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: FieldValue) {
        self.fields.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        match self.get(name) {
            Some(FieldValue::Text(v)) => v.clone(),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(FieldValue::Flag(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn items(&self, name: &str) -> Option<Vec<String>> {
        match self.get(name) {
            Some(FieldValue::Items(v)) => v.clone(),
            _ => None,
        }
    }

    pub fn pairs(&self, name: &str) -> Option<BTreeMap<String, String>> {
        match self.get(name) {
            Some(FieldValue::Pairs(v)) => v.clone(),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ── Application ──────────────────────────────────────────────────────────────

/// Decode every field of `schema` from one sibling.
pub fn apply_schema(schema: &[Field], href: Option<&str>, props: Option<&XmlNode>) -> Record {
    let mut record = Record::new();
    for field in schema {
        let value = match field.source {
            Source::Href => decode_href(field.rule, href),
            Source::Prop(name) => decode_node(field.rule, props.and_then(|p| p.child(name))),
        };
        record.push(field.name, value);
    }
    record
}

fn decode_node(rule: DecodeRule, node: Option<&XmlNode>) -> FieldValue {
    match rule {
        DecodeRule::Text => FieldValue::Text(node.and_then(non_empty_text)),
        DecodeRule::Flag(flag) => FieldValue::Flag(decode_flag(flag, node.and_then(non_empty_text))),
        DecodeRule::Kind => {
            let collection = node.map(|n| !n.is_empty()).unwrap_or(false);
            FieldValue::Text(Some(if collection { "collection" } else { "file" }.to_string()))
        }
        DecodeRule::Items(item) => FieldValue::Items(node.map(|n| match item {
            Some(name) => n.descendants(name).into_iter().map(|c| c.text()).collect(),
            None if !n.has_elements() && !n.is_empty() => vec![n.text()],
            None => n.children().iter().map(|c| c.text()).collect(),
        })),
        DecodeRule::Pairs => FieldValue::Pairs(node.map(|n| {
            n.children()
                .iter()
                .map(|c| (c.name().to_string(), c.text()))
                .collect()
        })),
        DecodeRule::RelativePath | DecodeRule::DisplayName => {
            decode_href(rule, node.map(|n| n.text()).as_deref())
        }
    }
}

fn decode_href(rule: DecodeRule, href: Option<&str>) -> FieldValue {
    match rule {
        DecodeRule::RelativePath => FieldValue::Text(href.map(relative_path)),
        DecodeRule::DisplayName => FieldValue::Text(href.and_then(display_name)),
        DecodeRule::Flag(flag) => FieldValue::Flag(decode_flag(flag, href.map(str::to_string))),
        _ => FieldValue::Text(href.filter(|h| !h.is_empty()).map(str::to_string)),
    }
}

fn non_empty_text(node: &XmlNode) -> Option<String> {
    if node.is_empty() {
        None
    } else {
        Some(node.text())
    }
}

/// Decode a flag from its (non-empty) text.
pub fn decode_flag(rule: FlagRule, text: Option<String>) -> bool {
    match text {
        None => rule.when_absent,
        Some(t) => !rule.falsy.contains(&t.as_str()),
    }
}

// ── Href helpers ─────────────────────────────────────────────────────────────

/// `/remote.php/dav/files/alice/dir/a.txt` → `/dir/a.txt`.
pub fn relative_path(href: &str) -> String {
    FILES_PREFIX.replace_all(href, "/").into_owned()
}

/// Everything after `/remote.php/dav/files/<user>`, used to turn a search hit
/// back into a user-relative path.
pub fn path_after_user(href: &str) -> Option<String> {
    FILES_ROOT
        .captures(href)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Last non-empty href segment with `+` as space and `%XX` sequences decoded.
pub fn display_name(href: &str) -> Option<String> {
    let segment = href.split('/').filter(|s| !s.is_empty()).last()?;
    let spaced = segment.replace('+', " ");
    Some(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
