// ──────────────────────────────────────────────────────────────────────────────
// nxc-api · client
// ──────────────────────────────────────────────────────────────────────────────
// Session core shared by every sub-client:
//  • `Api` — credentials, endpoint base and transport
//  • `OcsApi` — provisioning, apps, sharing and group folder clients
//  • `WebdavApi` — files, tags, tag relations and comments clients
//  • Path segment encoding for urls built from user input
// ──────────────────────────────────────────────────────────────────────────────

use crate::config::Credentials;
use crate::error::NextcloudResult;
use crate::ocs::{
    app::{AppScope, Apps},
    file_sharing::FileSharing,
    group::{GroupScope, Groups},
    group_folder::GroupFolders,
    user::{UserScope, Users},
};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport, Verb};
use crate::webdav::{comments::Comments, directory::Directory, tag_relations::TagRelations, tags::Tags};
use nxc_core::XmlNode;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::sync::Arc;

pub const OCS_CLOUD: &str = "/ocs/v2.php/cloud";
pub const OCS_FILES_SHARING: &str = "/ocs/v2.php/apps/files_sharing/api/v1";
pub const GROUP_FOLDERS: &str = "/apps/groupfolders";
pub const DAV_ROOT: &str = "/remote.php/dav";

// Everything outside unreserved and sub-delims, plus `/` so that a single
// segment cannot escape its position.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode one url path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Percent-encode every segment of a relative path, keeping the separators.
/// Leading slashes are dropped, a trailing one is kept.
pub fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

// ── Api ──────────────────────────────────────────────────────────────────────

/// An authenticated session bound to one endpoint of the instance.
///
/// Cloning is cheap; clones share the transport.
#[derive(Debug, Clone)]
pub struct Api {
    credentials: Credentials,
    endpoint: String,
    transport: Arc<dyn Transport>,
}

impl Api {
    pub fn new(credentials: Credentials, endpoint: &str) -> Self {
        Self::with_transport(credentials, endpoint, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(credentials: Credentials, endpoint: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Same login and transport against another endpoint.
    pub fn rebase(&self, endpoint: &str) -> Self {
        Self::with_transport(self.credentials.clone(), endpoint, Arc::clone(&self.transport))
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Absolute base url, e.g. `https://cloud.example.com/remote.php/dav`.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.credentials.base_url(), self.endpoint)
    }

    /// `path` must start with `/` (or be empty).
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub fn build(&self, verb: Verb, path: &str) -> ApiRequest {
        ApiRequest::new(verb, self.url_for(path))
    }

    pub async fn send(&self, request: ApiRequest) -> NextcloudResult<ApiResponse> {
        self.transport.exchange(&self.credentials, request).await
    }

    /// Exchange and parse the body, whatever the status code.
    pub async fn request(&self, request: ApiRequest) -> NextcloudResult<XmlNode> {
        let response = self.send(request).await?;
        Ok(XmlNode::parse_bytes(&response.body))
    }

    /// Exchange and hand back the raw body.
    pub async fn request_raw(&self, request: ApiRequest) -> NextcloudResult<Vec<u8>> {
        Ok(self.send(request).await?.body)
    }
}

// ── OCS entry point ──────────────────────────────────────────────────────────

/// Entry point for the OCS (administrative) APIs.
#[derive(Debug, Clone)]
pub struct OcsApi {
    api: Api,
}

impl OcsApi {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            api: Api::new(credentials, OCS_CLOUD),
        }
    }

    pub fn with_transport(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            api: Api::with_transport(credentials, OCS_CLOUD, transport),
        }
    }

    pub fn session(&self) -> &Api {
        &self.api
    }

    pub fn users(&self) -> Users {
        Users::with_session(&self.api)
    }

    pub fn user(&self, userid: &str) -> UserScope {
        self.users().user(userid)
    }

    pub fn groups(&self) -> Groups {
        Groups::with_session(&self.api)
    }

    pub fn group(&self, groupid: &str) -> GroupScope {
        self.groups().group(groupid)
    }

    pub fn apps(&self) -> Apps {
        Apps::with_session(&self.api)
    }

    pub fn app(&self, appid: &str) -> AppScope {
        self.apps().app(appid)
    }

    pub fn file_sharing(&self) -> FileSharing {
        FileSharing::with_session(&self.api)
    }

    pub fn group_folders(&self) -> GroupFolders {
        GroupFolders::with_session(&self.api)
    }

    /// WebDAV entry point with the same login and transport.
    pub fn webdav(&self) -> WebdavApi {
        WebdavApi::with_session(&self.api)
    }
}

// ── WebDAV entry point ───────────────────────────────────────────────────────

/// Entry point for the WebDAV APIs under `/remote.php/dav`.
#[derive(Debug, Clone)]
pub struct WebdavApi {
    api: Api,
}

impl WebdavApi {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            api: Api::new(credentials, DAV_ROOT),
        }
    }

    pub fn with_transport(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            api: Api::with_transport(credentials, DAV_ROOT, transport),
        }
    }

    pub fn with_session(api: &Api) -> Self {
        Self {
            api: api.rebase(DAV_ROOT),
        }
    }

    pub fn session(&self) -> &Api {
        &self.api
    }

    pub fn directory(&self) -> Directory {
        Directory::with_session(&self.api)
    }

    pub fn tags(&self) -> Tags {
        Tags::with_session(&self.api)
    }

    pub fn tag_relations(&self, scope: &str, id: &str) -> TagRelations {
        TagRelations::with_session(&self.api, scope, id)
    }

    pub fn comments(&self, scope: &str, id: &str) -> Comments {
        Comments::with_session(&self.api, scope, id)
    }

    pub fn ocs(&self) -> OcsApi {
        OcsApi {
            api: self.api.rebase(OCS_CLOUD),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
