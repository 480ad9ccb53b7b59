// ──────────────────────────────────────────────────────────────────────────────
// nxc-core · meta
// ──────────────────────────────────────────────────────────────────────────────
// Status signalling for both protocols:
//  • OCS `<meta>` envelope (status / statuscode / message / paging)
//  • DAV `<error>` bodies → `ErrorRecord`
//  • Write-operation outcome (`error` | `status` | implicit "ok")
//  • `WithMeta<T>` / `DavReply<T>` result wrappers
// ──────────────────────────────────────────────────────────────────────────────

use crate::xml::XmlNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

// ── Meta envelope ────────────────────────────────────────────────────────────

/// Protocol status block, kept apart from entity data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta(BTreeMap<String, String>);

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status")
    }

    pub fn statuscode(&self) -> Option<&str> {
        self.get("statuscode")
    }

    pub fn message(&self) -> Option<&str> {
        self.get("message")
    }

    /// OCS success family: `100` (v1) and `200` (v2).
    pub fn is_success(&self) -> bool {
        matches!(self.statuscode(), Some("100") | Some("200"))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Meta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Every direct child of every `<meta>` node, tag name → text.
pub fn extract_meta(doc: &XmlNode) -> Meta {
    doc.select("meta/*")
        .into_iter()
        .map(|node| (node.name().to_string(), node.text()))
        .collect()
}

/// DAV responses carry no meta block; the envelope is inferred from the first
/// `<status>` line, or `"ok"` when there is none. `<message>` is not consulted
/// since comment listings use that name for entity data.
pub fn dav_meta(doc: &XmlNode) -> Meta {
    let mut meta = Meta::new();
    let status = doc
        .first("status")
        .map(|n| n.text())
        .unwrap_or_else(|| "ok".to_string());
    meta.insert("status", status);
    meta
}

// ── WithMeta ─────────────────────────────────────────────────────────────────

/// A primary value paired with the meta envelope of the response it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithMeta<T> {
    pub value: T,
    pub meta: Meta,
}

impl<T> WithMeta<T> {
    pub fn new(value: T, meta: Meta) -> Self {
        Self { value, meta }
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WithMeta<U> {
        WithMeta {
            value: f(self.value),
            meta: self.meta,
        }
    }
}

impl<T> Deref for WithMeta<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for WithMeta<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

// ── Error record ─────────────────────────────────────────────────────────────

/// Exception name reported by the server when a DAV node does not exist.
pub const NOT_FOUND_EXCEPTION: &str = "Sabre\\DAV\\Exception\\NotFound";

/// A DAV `<error>` body. Returned as data, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub exception: String,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(exception: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            exception: exception.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(NOT_FOUND_EXCEPTION, message)
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.exception, self.message)
    }
}

/// `Some(record)` when the document contains an `<error>` node.
pub fn dav_error(doc: &XmlNode) -> Option<ErrorRecord> {
    if !doc.exists("error") {
        return None;
    }
    Some(ErrorRecord {
        exception: doc.text_at("exception").unwrap_or_default(),
        message: doc.text_at("message").unwrap_or_default(),
    })
}

// ── Outcome of write operations ─────────────────────────────────────────────

/// Result of a DAV mutation (create, delete, move, copy, favorite, tag and
/// comment writes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Failed(ErrorRecord),
    Status { status: String },
}

impl Outcome {
    pub fn ok() -> Self {
        Self::Status {
            status: "ok".to_string(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Status { status } => Some(status.as_str()),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorRecord> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Status { .. } => None,
        }
    }
}

/// `<error>` wins, then the text of every `<status>` node, then `"ok"`.
pub fn parse_outcome(doc: &XmlNode) -> Outcome {
    if let Some(err) = dav_error(doc) {
        return Outcome::Failed(err);
    }
    match doc.text_at("status") {
        Some(status) => Outcome::Status { status },
        None => Outcome::ok(),
    }
}

// ── DAV reply ────────────────────────────────────────────────────────────────

/// Either the translated value or the error record found in the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DavReply<T> {
    Success(T),
    Failure(ErrorRecord),
}

impl<T> DavReply<T> {
    /// Run `f` on the document only when it carries no `<error>`.
    pub fn from_doc(doc: &XmlNode, f: impl FnOnce(&XmlNode) -> T) -> Self {
        match dav_error(doc) {
            Some(err) => Self::Failure(err),
            None => Self::Success(f(doc)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ErrorRecord> {
        match self {
            Self::Failure(e) => Some(e),
            Self::Success(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DavReply<U> {
        match self {
            Self::Success(v) => DavReply::Success(f(v)),
            Self::Failure(e) => DavReply::Failure(e),
        }
    }

    pub fn into_result(self) -> Result<T, ErrorRecord> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(e) => Err(e),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
