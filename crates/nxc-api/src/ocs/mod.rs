//! OCS (administrative) sub-clients.
//!
//! Every call returns the `<meta>` envelope of its response, either alone or
//! wrapped around the translated value. A failure status code is data, not an
//! error.

pub mod app;
pub mod file_sharing;
pub mod group;
pub mod group_folder;
pub mod user;

use nxc_core::{extract_meta, WithMeta, XmlNode};

pub(crate) fn with_meta<T>(doc: &XmlNode, value: T) -> WithMeta<T> {
    WithMeta::new(value, extract_meta(doc))
}

/// Group folder writes answer with `1` (or `<success>1</success>`).
pub(crate) fn data_is_one(doc: &XmlNode) -> bool {
    doc.text_at("ocs/data").map(|t| t.trim() == "1").unwrap_or(false)
}
