// ──────────────────────────────────────────────────────────────────────────────
// nxc-core
// ──────────────────────────────────────────────────────────────────────────────
// Nextcloud response translation, independent of any HTTP stack:
//  • `xml`       — namespace-agnostic, lenient document tree
//  • `meta`      — OCS meta envelope, DAV error records, write outcomes
//  • `schema`    — per-field decode rules and href rewriting
//  • `translate` — sibling location and result shapes
//  • `models`    — typed entities
// ──────────────────────────────────────────────────────────────────────────────

pub mod meta;
pub mod models;
pub mod schema;
pub mod translate;
pub mod xml;

pub use meta::{
    dav_error, dav_meta, extract_meta, parse_outcome, DavReply, ErrorRecord, Meta, Outcome,
    WithMeta, NOT_FOUND_EXCEPTION,
};
pub use models::*;
pub use translate::{translate, Entity, Shape, Siblings, Translated, Tree};
pub use xml::XmlNode;
