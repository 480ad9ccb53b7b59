//! WebDAV sub-clients under `/remote.php/dav`.
//!
//! Reads return a [`DavReply`]: the translated value with its inferred meta,
//! or the server's error record. Writes return an [`Outcome`].

pub mod comments;
pub mod directory;
pub mod tag_relations;
pub mod tags;

use crate::client::Api;
use crate::error::NextcloudResult;
use crate::transport::ApiRequest;
use nxc_core::{dav_meta, parse_outcome, DavReply, Outcome, WithMeta, XmlNode};

/// Translate a successful body with `f`, attaching the DAV meta.
pub(crate) fn reply<T>(doc: &XmlNode, f: impl FnOnce(&XmlNode) -> T) -> DavReply<WithMeta<T>> {
    DavReply::from_doc(doc, |d| WithMeta::new(f(d), dav_meta(d)))
}

pub(crate) async fn outcome(api: &Api, req: ApiRequest) -> NextcloudResult<Outcome> {
    Ok(parse_outcome(&api.request(req).await?))
}
