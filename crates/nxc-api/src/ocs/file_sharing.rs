// ──────────────────────────────────────────────────────────────────────────────
// nxc-api · ocs · file_sharing
// ──────────────────────────────────────────────────────────────────────────────
// files_sharing OCS API:
//  • shares: find, list, per-path listing, create, delete, update
//  • federated cloud shares: accepted / pending listings, accept, decline
// ──────────────────────────────────────────────────────────────────────────────

use crate::client::{encode_segment, Api, OCS_FILES_SHARING};
use crate::config::Credentials;
use crate::error::NextcloudResult;
use crate::ocs::with_meta;
use crate::transport::{ApiRequest, Verb};
use nxc_core::translate::{translate_list, translate_single};
use nxc_core::{extract_meta, FederatedShare, Meta, Share, ShareType, Siblings, WithMeta};
use serde::{Deserialize, Serialize};

const SHARE_ELEMENTS: Siblings = Siblings::Elements("data/element");

// ── Create arguments ─────────────────────────────────────────────────────────

/// Arguments for a new share. Unset options are left out of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShare {
    pub path: String,
    pub share_type: ShareType,
    /// User or group id; unused for public links.
    pub share_with: Option<String>,
    pub public_upload: Option<bool>,
    pub password: Option<String>,
    /// See [`SharePermissions`](nxc_core::SharePermissions).
    pub permissions: Option<u32>,
}

impl CreateShare {
    pub fn new(path: &str, share_type: ShareType) -> Self {
        Self {
            path: path.to_string(),
            share_type,
            share_with: None,
            public_upload: None,
            password: None,
            permissions: None,
        }
    }

    pub fn with(mut self, share_with: &str) -> Self {
        self.share_with = Some(share_with.to_string());
        self
    }

    fn apply(&self, mut req: ApiRequest) -> ApiRequest {
        req = req
            .form("path", &self.path)
            .form("shareType", self.share_type.as_i32());
        if let Some(ref with) = self.share_with {
            req = req.form("shareWith", with);
        }
        if let Some(upload) = self.public_upload {
            req = req.form("publicUpload", upload);
        }
        if let Some(ref password) = self.password {
            req = req.form("password", password);
        }
        if let Some(permissions) = self.permissions {
            req = req.form("permissions", permissions);
        }
        req
    }
}

// ── Shares ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FileSharing {
    api: Api,
}

impl FileSharing {
    pub fn with_session(api: &Api) -> Self {
        Self {
            api: api.rebase(OCS_FILES_SHARING),
        }
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            api: Api::new(credentials, OCS_FILES_SHARING),
        }
    }

    pub fn federated(&self) -> FederatedShares {
        FederatedShares { api: self.api.clone() }
    }

    pub async fn find(&self, shareid: &str) -> NextcloudResult<WithMeta<Option<Share>>> {
        let path = format!("/shares/{}", encode_segment(shareid));
        let doc = self.api.request(self.api.build(Verb::Get, &path)).await?;
        Ok(with_meta(&doc, translate_single(&doc, SHARE_ELEMENTS)))
    }

    /// Every share of the logged-in user.
    pub async fn all(&self) -> NextcloudResult<WithMeta<Vec<Share>>> {
        self.list(self.api.build(Verb::Get, "/shares")).await
    }

    /// Shares of one file or folder, optionally with reshares or with the
    /// shares of every direct child.
    pub async fn specific(
        &self,
        path: &str,
        reshares: Option<bool>,
        subfiles: Option<bool>,
    ) -> NextcloudResult<WithMeta<Vec<Share>>> {
        let mut req = self.api.build(Verb::Get, "/shares").query("path", path);
        if let Some(reshares) = reshares {
            req = req.query("reshares", reshares);
        }
        if let Some(subfiles) = subfiles {
            req = req.query("subfiles", subfiles);
        }
        self.list(req).await
    }

    pub async fn create(&self, share: &CreateShare) -> NextcloudResult<Meta> {
        let req = share.apply(self.api.build(Verb::Post, "/shares"));
        Ok(extract_meta(&self.api.request(req).await?))
    }

    pub async fn destroy(&self, shareid: &str) -> NextcloudResult<Meta> {
        let path = format!("/shares/{}", encode_segment(shareid));
        Ok(extract_meta(&self.api.request(self.api.build(Verb::Delete, &path)).await?))
    }

    pub async fn update_permissions(&self, shareid: &str, permissions: u32) -> NextcloudResult<Meta> {
        self.update(shareid, "permissions", &permissions.to_string()).await
    }

    pub async fn update_password(&self, shareid: &str, password: &str) -> NextcloudResult<Meta> {
        self.update(shareid, "password", password).await
    }

    pub async fn update_public_upload(&self, shareid: &str, public_upload: bool) -> NextcloudResult<Meta> {
        self.update(shareid, "publicUpload", &public_upload.to_string()).await
    }

    /// `expire_date` as `YYYY-MM-DD`.
    pub async fn update_expire_date(&self, shareid: &str, expire_date: &str) -> NextcloudResult<Meta> {
        self.update(shareid, "expireDate", expire_date).await
    }

    async fn update(&self, shareid: &str, key: &str, value: &str) -> NextcloudResult<Meta> {
        let path = format!("/shares/{}", encode_segment(shareid));
        let req = self.api.build(Verb::Put, &path).form(key, value);
        Ok(extract_meta(&self.api.request(req).await?))
    }

    async fn list(&self, req: ApiRequest) -> NextcloudResult<WithMeta<Vec<Share>>> {
        let doc = self.api.request(req).await?;
        Ok(with_meta(&doc, translate_list(&doc, SHARE_ELEMENTS)))
    }
}

// ── Federated cloud shares ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FederatedShares {
    api: Api,
}

impl FederatedShares {
    pub fn with_session(api: &Api) -> Self {
        Self {
            api: api.rebase(OCS_FILES_SHARING),
        }
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            api: Api::new(credentials, OCS_FILES_SHARING),
        }
    }

    pub async fn accepted(&self) -> NextcloudResult<WithMeta<Vec<FederatedShare>>> {
        self.list("/remote_shares").await
    }

    pub async fn pending(&self) -> NextcloudResult<WithMeta<Vec<FederatedShare>>> {
        self.list("/remote_shares/pending").await
    }

    pub async fn find(&self, shareid: &str) -> NextcloudResult<WithMeta<FederatedShare>> {
        let path = format!("/remote_shares/{}", encode_segment(shareid));
        let doc = self.api.request(self.api.build(Verb::Get, &path)).await?;
        let share = translate_single(&doc, Siblings::Elements("ocs/data")).unwrap_or_default();
        Ok(with_meta(&doc, share))
    }

    pub async fn accept(&self, shareid: &str) -> NextcloudResult<Meta> {
        self.send(Verb::Post, &format!("/remote_shares/pending/{}", encode_segment(shareid)))
            .await
    }

    pub async fn decline(&self, shareid: &str) -> NextcloudResult<Meta> {
        self.send(Verb::Delete, &format!("/remote_shares/pending/{}", encode_segment(shareid)))
            .await
    }

    /// Remove an accepted share.
    pub async fn destroy(&self, shareid: &str) -> NextcloudResult<Meta> {
        self.send(Verb::Delete, &format!("/remote_shares/{}", encode_segment(shareid)))
            .await
    }

    async fn list(&self, path: &str) -> NextcloudResult<WithMeta<Vec<FederatedShare>>> {
        let doc = self.api.request(self.api.build(Verb::Get, path)).await?;
        Ok(with_meta(&doc, translate_list(&doc, SHARE_ELEMENTS)))
    }

    async fn send(&self, verb: Verb, path: &str) -> NextcloudResult<Meta> {
        Ok(extract_meta(&self.api.request(self.api.build(verb, path)).await?))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::OCS_CLOUD;
    use crate::transport::recording::RecordingTransport;
    use std::sync::Arc;

    const OK: &str = "<ocs><meta><status>ok</status><statuscode>200</statuscode></meta><data/></ocs>";

    fn sharing(bodies: &[&str]) -> (FileSharing, Arc<RecordingTransport>) {
        let transport = RecordingTransport::with_bodies(bodies);
        let api = Api::with_transport(
            Credentials::new("https://cloud.example.com", "alice", "pw"),
            OCS_CLOUD,
            transport.clone(),
        );
        (FileSharing::with_session(&api), transport)
    }

    fn shares(n: usize) -> String {
        let elements: String = (1..=n)
            .map(|i| format!("<element><id>{}</id><share_type>0</share_type><path>/f{}</path></element>", i, i))
            .collect();
        format!(
            "<ocs><meta><status>ok</status><statuscode>200</statuscode></meta><data>{}</data></ocs>",
            elements
        )
    }

    #[tokio::test]
    async fn rebased_on_sharing_endpoint() {
        let body = shares(2);
        let (sharing, transport) = sharing(&[&body]);
        let all = sharing.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].path.as_deref(), Some("/f2"));
        assert_eq!(
            transport.last().url,
            "https://cloud.example.com/ocs/v2.php/apps/files_sharing/api/v1/shares"
        );
    }

    #[tokio::test]
    async fn one_share_is_still_a_list() {
        let body = shares(1);
        let (sharing, _) = sharing(&[&body]);
        let list = sharing.specific("/f1", Some(true), None).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].kind(), Some(ShareType::User));
    }

    #[tokio::test]
    async fn specific_omits_unset_flags() {
        let body = shares(0);
        let (sharing, transport) = sharing(&[&body]);
        let list = sharing.specific("/Photos", Some(true), None).await.unwrap();
        assert!(list.is_empty());
        assert_eq!(
            transport.last().query,
            vec![
                ("path".to_string(), "/Photos".to_string()),
                ("reshares".to_string(), "true".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn find_share() {
        let body = shares(1);
        let (sharing, transport) = sharing(&[&body]);
        let found = sharing.find("1").await.unwrap();
        assert_eq!(found.as_ref().and_then(|s| s.id.as_deref()), Some("1"));
        assert!(transport.last().url.ends_with("/shares/1"));
    }

    #[tokio::test]
    async fn create_sends_only_set_fields() {
        let (sharing, transport) = sharing(&[OK]);
        let share = CreateShare {
            permissions: Some(1),
            ..CreateShare::new("/Photos", ShareType::Group).with("staff")
        };
        let meta = sharing.create(&share).await.unwrap();
        assert!(meta.is_success());
        assert_eq!(
            transport.last().body_text(),
            "path=%2FPhotos&shareType=1&shareWith=staff&permissions=1"
        );
    }

    #[tokio::test]
    async fn updates_put_one_key() {
        let (sharing, transport) = sharing(&[OK, OK, OK, OK, OK]);
        sharing.update_permissions("9", 31).await.unwrap();
        sharing.update_password("9", "pw").await.unwrap();
        sharing.update_public_upload("9", false).await.unwrap();
        sharing.update_expire_date("9", "2026-12-31").await.unwrap();
        sharing.destroy("9").await.unwrap();
        let bodies: Vec<String> = transport.requests().iter().map(|r| r.body_text()).collect();
        assert_eq!(
            bodies,
            vec![
                "permissions=31",
                "password=pw",
                "publicUpload=false",
                "expireDate=2026-12-31",
                "",
            ]
        );
        assert_eq!(transport.requests()[0].verb, Verb::Put);
        assert_eq!(transport.last().verb, Verb::Delete);
    }

    #[test]
    fn federated_from_credentials_targets_sharing_endpoint() {
        let fed = FederatedShares::with_credentials(Credentials::new("https://cloud.example.com/", "alice", "pw"));
        assert_eq!(
            fed.api.url_for("/remote_shares"),
            "https://cloud.example.com/ocs/v2.php/apps/files_sharing/api/v1/remote_shares"
        );
        assert_eq!(fed.api.username(), "alice");
    }

    #[tokio::test]
    async fn federated_shares() {
        let listing = "<ocs><meta><statuscode>200</statuscode></meta><data><element>\
                       <id>4</id><remote>https://other.example</remote><name>/doc.txt</name>\
                       </element></data></ocs>";
        let single = "<ocs><meta><statuscode>200</statuscode></meta><data><id>4</id>\
                      <mountpoint>/doc.txt</mountpoint></data></ocs>";
        let (sharing, transport) = sharing(&[listing, listing, single, OK, OK, OK]);
        let fed = sharing.federated();

        assert_eq!(fed.accepted().await.unwrap()[0].remote.as_deref(), Some("https://other.example"));
        assert_eq!(fed.pending().await.unwrap().len(), 1);
        assert_eq!(fed.find("4").await.unwrap().mountpoint.as_deref(), Some("/doc.txt"));
        fed.accept("5").await.unwrap();
        fed.decline("6").await.unwrap();
        fed.destroy("4").await.unwrap();

        let reqs = transport.requests();
        assert!(reqs[1].url.ends_with("/remote_shares/pending"));
        assert_eq!((reqs[3].verb, reqs[3].url.ends_with("/remote_shares/pending/5")), (Verb::Post, true));
        assert_eq!((reqs[4].verb, reqs[4].url.ends_with("/remote_shares/pending/6")), (Verb::Delete, true));
        assert!(reqs[5].url.ends_with("/remote_shares/4"));
    }
}
