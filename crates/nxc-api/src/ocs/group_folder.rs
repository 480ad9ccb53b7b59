use crate::client::{encode_segment, Api, GROUP_FOLDERS};
use crate::config::Credentials;
use crate::error::NextcloudResult;
use crate::ocs::{data_is_one, with_meta};
use crate::transport::{ApiRequest, Verb};
use nxc_core::translate::{translate_list, translate_single};
use nxc_core::{GroupFolder, Siblings, WithMeta};

/// The groupfolders app API (`/apps/groupfolders`).
///
/// Write calls report success as a plain `1` in the data block, surfaced here
/// as `WithMeta<bool>`.
#[derive(Debug, Clone)]
pub struct GroupFolders {
    api: Api,
}

impl GroupFolders {
    pub fn with_session(api: &Api) -> Self {
        Self {
            api: api.rebase(GROUP_FOLDERS),
        }
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            api: Api::new(credentials, GROUP_FOLDERS),
        }
    }

    pub async fn folders(&self) -> NextcloudResult<WithMeta<Vec<GroupFolder>>> {
        let doc = self.api.request(self.api.build(Verb::Get, "/folders")).await?;
        Ok(with_meta(&doc, translate_list(&doc, Siblings::Elements("data/element"))))
    }

    /// Id of the folder mounted at `mount_point`, if any.
    pub async fn folder_id(&self, mount_point: &str) -> NextcloudResult<Option<String>> {
        let folders = self.folders().await?.into_inner();
        Ok(folders
            .into_iter()
            .find(|f| f.mount_point.as_deref() == Some(mount_point))
            .and_then(|f| f.id))
    }

    pub async fn find(&self, folderid: &str) -> NextcloudResult<WithMeta<GroupFolder>> {
        let doc = self.api.request(self.api.build(Verb::Get, &folder_path(folderid, ""))).await?;
        let folder = translate_single(&doc, Siblings::Elements("ocs/data")).unwrap_or_default();
        Ok(with_meta(&doc, folder))
    }

    pub async fn create(&self, mountpoint: &str) -> NextcloudResult<WithMeta<GroupFolder>> {
        let req = self.api.build(Verb::Post, "/folders").form("mountpoint", mountpoint);
        let doc = self.api.request(req).await?;
        let folder = translate_single(&doc, Siblings::Elements("ocs/data")).unwrap_or_default();
        Ok(with_meta(&doc, folder))
    }

    pub async fn destroy(&self, folderid: &str) -> NextcloudResult<WithMeta<bool>> {
        self.confirm(self.api.build(Verb::Delete, &folder_path(folderid, ""))).await
    }

    pub async fn give_access(&self, folderid: &str, group: &str) -> NextcloudResult<WithMeta<bool>> {
        let req = self
            .api
            .build(Verb::Post, &folder_path(folderid, "/groups"))
            .form("group", group);
        self.confirm(req).await
    }

    pub async fn remove_access(&self, folderid: &str, group: &str) -> NextcloudResult<WithMeta<bool>> {
        let path = folder_path(folderid, &format!("/groups/{}", encode_segment(group)));
        self.confirm(self.api.build(Verb::Delete, &path)).await
    }

    /// `permissions` is a [`SharePermissions`](nxc_core::SharePermissions) mask.
    pub async fn set_permissions(
        &self,
        folderid: &str,
        group: &str,
        permissions: u32,
    ) -> NextcloudResult<WithMeta<bool>> {
        let path = folder_path(folderid, &format!("/groups/{}", encode_segment(group)));
        let req = self.api.build(Verb::Post, &path).form("permissions", permissions);
        self.confirm(req).await
    }

    /// Quota in bytes, `-3` for unlimited.
    pub async fn set_quota(&self, folderid: &str, quota: i64) -> NextcloudResult<WithMeta<bool>> {
        let req = self
            .api
            .build(Verb::Post, &folder_path(folderid, "/quota"))
            .form("quota", quota);
        self.confirm(req).await
    }

    pub async fn rename(&self, folderid: &str, mountpoint: &str) -> NextcloudResult<WithMeta<bool>> {
        let req = self
            .api
            .build(Verb::Post, &folder_path(folderid, "/mountpoint"))
            .form("mountpoint", mountpoint);
        self.confirm(req).await
    }

    async fn confirm(&self, req: ApiRequest) -> NextcloudResult<WithMeta<bool>> {
        let doc = self.api.request(req).await?;
        Ok(with_meta(&doc, data_is_one(&doc)))
    }
}

fn folder_path(folderid: &str, suffix: &str) -> String {
    format!("/folders/{}{}", encode_segment(folderid), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::OCS_CLOUD;
    use crate::transport::recording::RecordingTransport;
    use std::sync::Arc;

    const DONE: &str = "<ocs><meta><status>ok</status><statuscode>100</statuscode></meta><data>1</data></ocs>";
    const SUCCESS: &str = "<ocs><meta><statuscode>100</statuscode></meta><data><success>1</success></data></ocs>";
    const REFUSED: &str = "<ocs><meta><statuscode>100</statuscode></meta><data/></ocs>";

    const FOLDERS: &str = "<ocs><meta><statuscode>100</statuscode></meta><data>\
        <element><id>1</id><mount_point>Team</mount_point><groups><staff>31</staff></groups></element>\
        <element><id>2</id><mount_point>Archive</mount_point><groups/></element>\
        </data></ocs>";

    fn folders(bodies: &[&str]) -> (GroupFolders, Arc<RecordingTransport>) {
        let transport = RecordingTransport::with_bodies(bodies);
        let api = Api::with_transport(
            Credentials::new("https://cloud.example.com", "admin", "pw"),
            OCS_CLOUD,
            transport.clone(),
        );
        (GroupFolders::with_session(&api), transport)
    }

    #[tokio::test]
    async fn lists_and_resolves_ids() {
        let (gf, transport) = folders(&[FOLDERS, FOLDERS, FOLDERS]);
        assert_eq!(gf.folders().await.unwrap().len(), 2);
        assert_eq!(transport.last().url, "https://cloud.example.com/apps/groupfolders/folders");
        assert_eq!(gf.folder_id("Archive").await.unwrap().as_deref(), Some("2"));
        assert_eq!(gf.folder_id("Missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_returns_folder() {
        let body = "<ocs><meta><statuscode>100</statuscode></meta><data><id>7</id></data></ocs>";
        let (gf, transport) = folders(&[body]);
        let created = gf.create("Projects").await.unwrap();
        assert_eq!(created.id.as_deref(), Some("7"));
        assert_eq!(transport.last().body_text(), "mountpoint=Projects");
    }

    #[tokio::test]
    async fn writes_report_data_one() {
        let (gf, transport) = folders(&[DONE, SUCCESS, REFUSED, DONE, DONE, DONE]);
        assert!(*gf.give_access("1", "staff").await.unwrap());
        assert!(*gf.set_permissions("1", "staff", 31).await.unwrap());
        assert!(!*gf.remove_access("1", "staff").await.unwrap());
        assert!(*gf.set_quota("1", -3).await.unwrap());
        assert!(*gf.rename("1", "Team B").await.unwrap());
        assert!(*gf.destroy("1").await.unwrap());

        let reqs = transport.requests();
        assert!(reqs[0].url.ends_with("/folders/1/groups"));
        assert_eq!(reqs[0].body_text(), "group=staff");
        assert!(reqs[1].url.ends_with("/folders/1/groups/staff"));
        assert_eq!(reqs[1].body_text(), "permissions=31");
        assert_eq!(reqs[2].verb, Verb::Delete);
        assert_eq!(reqs[3].body_text(), "quota=-3");
        assert_eq!(reqs[4].body_text(), "mountpoint=Team+B");
        assert!(reqs[5].url.ends_with("/folders/1"));
    }
}
