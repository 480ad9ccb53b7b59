// ──────────────────────────────────────────────────────────────────────────────
// nxc-api · webdav · directory
// ──────────────────────────────────────────────────────────────────────────────
// Files of one user (`/files/<user>`):
//  • listings: find (tree), favorites and name search (flat lists)
//  • fileid resolution through a SEARCH request
//  • create / delete / upload / download / move / copy / (un)favorite
// ──────────────────────────────────────────────────────────────────────────────

use crate::client::{encode_path, encode_segment, Api, DAV_ROOT};
use crate::config::Credentials;
use crate::error::NextcloudResult;
use crate::properties;
use crate::transport::{ApiRequest, Verb};
use crate::webdav::{outcome, reply};
use log::debug;
use nxc_core::schema::path_after_user;
use nxc_core::translate::{translate_list, translate_tree};
use nxc_core::{dav_error, DavReply, DirectoryEntry, ErrorRecord, Outcome, Siblings, Tree, WithMeta};
use percent_encoding::percent_decode_str;

pub type Listing = DavReply<WithMeta<Vec<DirectoryEntry>>>;
pub type DirectoryTree = DavReply<WithMeta<Option<Tree<DirectoryEntry>>>>;

/// Files of the session user.
///
/// Every `path` argument is a plain, decoded path relative to the user root
/// (`"My Docs/a b.txt"`); it is percent-encoded here. Hrefs and
/// [`DirectoryEntry::path`] values are still encoded and must be decoded
/// before being passed back in.
#[derive(Debug, Clone)]
pub struct Directory {
    api: Api,
    /// `/files/<user>`, segment-encoded.
    root: String,
}

impl Directory {
    pub fn with_session(api: &Api) -> Self {
        let api = api.rebase(DAV_ROOT);
        let root = format!("/files/{}", encode_segment(api.username()));
        Self { api, root }
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_session(&Api::new(credentials, DAV_ROOT))
    }

    fn path(&self, path: &str) -> String {
        format!("{}/{}", self.root, encode_path(path))
    }

    /// Search scope href, e.g. `/files/alice/Photos`.
    fn scope(&self, scope: &str) -> String {
        format!("/files/{}/{}", self.api.username(), scope.trim_start_matches('/'))
    }

    fn request(&self, verb: Verb, path: &str) -> ApiRequest {
        self.api.build(verb, &self.path(path))
    }

    // ── Listings ─────────────────────────────────────────────────────────

    /// The node at `path` with its direct children as contents.
    pub async fn find(&self, path: &str) -> NextcloudResult<DirectoryTree> {
        let req = self.request(Verb::Propfind, path).body(properties::RESOURCE);
        let doc = self.api.request(req).await?;
        Ok(reply(&doc, |d| translate_tree(d, Siblings::Multistatus)))
    }

    /// Favorites below `path`, as a flat list.
    pub async fn favorites(&self, path: &str) -> NextcloudResult<Listing> {
        let req = self.request(Verb::Report, path).body(properties::FAVORITE);
        let doc = self.api.request(req).await?;
        Ok(reply(&doc, |d| translate_list(d, Siblings::Multistatus)))
    }

    /// Files and folders below `scope` whose name contains `name`.
    pub async fn search_by_name(&self, name: &str, scope: &str) -> NextcloudResult<Listing> {
        let body = properties::search_by_name(name, &self.scope(scope));
        let doc = self.api.request(self.api.build(Verb::Search, "").body(body)).await?;
        Ok(reply(&doc, |d| translate_list(d, Siblings::Multistatus)))
    }

    // ── Fileid lookup ────────────────────────────────────────────────────

    /// Decoded path (relative to the user root) of the file with `fileid`.
    pub async fn path_from_fileid(&self, fileid: &str, scope: &str) -> NextcloudResult<DavReply<String>> {
        let body = properties::search_by_fileid(fileid, &self.scope(scope));
        let doc = self.api.request(self.api.build(Verb::Search, "").body(body)).await?;
        if let Some(err) = dav_error(&doc) {
            return Ok(DavReply::Failure(err));
        }
        let found = doc
            .first("response/href")
            .and_then(|href| path_after_user(&href.text()))
            .map(|path| percent_decode_str(&path).decode_utf8_lossy().into_owned());
        Ok(match found {
            Some(path) => DavReply::Success(path),
            None => {
                debug!("fileid {} not found below {}", fileid, self.scope(scope));
                DavReply::Failure(ErrorRecord::not_found(format!(
                    "File with fileid {} could not be located",
                    fileid
                )))
            }
        })
    }

    /// `find` on the path resolved from `fileid`. Two exchanges.
    pub async fn find_by_fileid(&self, fileid: &str, scope: &str) -> NextcloudResult<DirectoryTree> {
        match self.path_from_fileid(fileid, scope).await? {
            DavReply::Success(path) => self.find(&path).await,
            DavReply::Failure(err) => Ok(DavReply::Failure(err)),
        }
    }

    // ── Mutations ────────────────────────────────────────────────────────

    pub async fn create(&self, path: &str) -> NextcloudResult<Outcome> {
        outcome(&self.api, self.request(Verb::Mkcol, path)).await
    }

    pub async fn destroy(&self, path: &str) -> NextcloudResult<Outcome> {
        outcome(&self.api, self.request(Verb::Delete, path)).await
    }

    pub async fn upload(&self, path: &str, contents: impl Into<Vec<u8>>) -> NextcloudResult<Outcome> {
        outcome(&self.api, self.request(Verb::Put, path).body(contents)).await
    }

    /// Raw file contents. An error body is returned as-is.
    pub async fn download(&self, path: &str) -> NextcloudResult<Vec<u8>> {
        self.api.request_raw(self.request(Verb::Get, path)).await
    }

    pub async fn move_to(&self, source: &str, destination: &str) -> NextcloudResult<Outcome> {
        let req = self
            .request(Verb::Move, source)
            .destination(self.api.url_for(&self.path(destination)));
        outcome(&self.api, req).await
    }

    pub async fn copy_to(&self, source: &str, destination: &str) -> NextcloudResult<Outcome> {
        let req = self
            .request(Verb::Copy, source)
            .destination(self.api.url_for(&self.path(destination)));
        outcome(&self.api, req).await
    }

    pub async fn favorite(&self, path: &str) -> NextcloudResult<Outcome> {
        let req = self.request(Verb::Proppatch, path).body(properties::MAKE_FAVORITE);
        outcome(&self.api, req).await
    }

    pub async fn unfavorite(&self, path: &str) -> NextcloudResult<Outcome> {
        let req = self.request(Verb::Proppatch, path).body(properties::UNFAVORITE);
        outcome(&self.api, req).await
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
