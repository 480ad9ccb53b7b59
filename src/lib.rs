//! # nextcloud
//!
//! Client for a Nextcloud instance:
//!
//! - **OCS** — users, groups, apps, shares, federated shares, group folders
//! - **WebDAV** — directory trees and file operations, system tags, comments
//!
//! Responses are translated by [`nxc_core`] into typed models. Protocol
//! failures come back as data (an OCS `Meta` with a failure status code, or a
//! DAV `ErrorRecord`); only transport faults are `Err`.
//!
//! ```no_run
//! # async fn demo() -> nextcloud::NextcloudResult<()> {
//! let creds = nextcloud::Credentials::new("https://cloud.example.com", "alice", "app-password");
//! let users = nextcloud::ocs(creds.clone()).users().all().await?;
//! let root = nextcloud::webdav(creds).directory().find("/").await?;
//! # Ok(())
//! # }
//! ```

use log::info;

pub use nxc_api::{
    Api, ApiRequest, ApiResponse, AppScope, Apps, Comments, CreateShare, Credentials, Depth, Directory,
    FederatedShares, FileSharing, GroupFolders, GroupScope, Groups, HttpTransport, NextcloudError,
    NextcloudResult, OcsApi, TagRelations, Tags, Transport, UserGroups, UserScope, Users, Verb, WebdavApi,
};
pub use nxc_core::{
    App, Comment, DavReply, DirectoryEntry, ErrorRecord, FederatedShare, GroupFolder, Meta, Outcome, Share,
    SharePermissions, ShareType, Tag, Tree, User, WithMeta,
};

/// OCS entry point over the default HTTP transport.
pub fn ocs(credentials: Credentials) -> OcsApi {
    OcsApi::new(credentials)
}

/// WebDAV entry point over the default HTTP transport.
pub fn webdav(credentials: Credentials) -> WebdavApi {
    WebdavApi::new(credentials)
}

/// Both entry points, logged in with `NEXTCLOUD_URL`, `NEXTCLOUD_USERNAME`
/// and `NEXTCLOUD_PASSWORD`.
pub fn from_env() -> NextcloudResult<(OcsApi, WebdavApi)> {
    let credentials = Credentials::from_env()?;
    info!("nextcloud session for {} at {}", credentials.username, credentials.base_url());
    let ocs = OcsApi::new(credentials);
    let webdav = ocs.webdav();
    Ok((ocs, webdav))
}
