//! # nxc-api – Nextcloud OCS and WebDAV clients
//!
//! Thin request builders over a pluggable transport; every response is handed
//! to `nxc-core` for translation into typed models.
//!
//! - **Users / Groups** — provisioning API: create, update, enable, memberships, subadmins
//! - **Apps** — list, inspect, enable and disable apps
//! - **File sharing** — OCS Share API v1 plus federated (remote) shares
//! - **Group folders** — folders, group access, permissions, quota
//! - **Directory** — PROPFIND trees, SEARCH by name or fileid, favorites, file mutations
//! - **Tags / Comments** — system tags, tag relations and object comments

pub mod client;
pub mod config;
pub mod error;
pub mod ocs;
pub mod properties;
pub mod transport;
pub mod webdav;

pub use client::{Api, OcsApi, WebdavApi};
pub use config::Credentials;
pub use error::{NextcloudError, NextcloudResult};
pub use ocs::{
    app::{AppScope, Apps},
    file_sharing::{CreateShare, FederatedShares, FileSharing},
    group::{GroupScope, Groups},
    group_folder::GroupFolders,
    user::{UserGroups, UserScope, Users},
};
pub use transport::{ApiRequest, ApiResponse, Depth, HttpTransport, Transport, Verb};
pub use webdav::{comments::Comments, directory::Directory, tag_relations::TagRelations, tags::Tags};
