use crate::client::{encode_segment, Api, OCS_CLOUD};
use crate::config::Credentials;
use crate::error::NextcloudResult;
use crate::ocs::with_meta;
use crate::transport::Verb;
use nxc_core::translate::texts;
use nxc_core::{extract_meta, Meta, WithMeta};

/// Group provisioning (`cloud/groups`).
#[derive(Debug, Clone)]
pub struct Groups {
    api: Api,
}

impl Groups {
    pub fn with_session(api: &Api) -> Self {
        Self {
            api: api.rebase(OCS_CLOUD),
        }
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            api: Api::new(credentials, OCS_CLOUD),
        }
    }

    pub fn group(&self, groupid: &str) -> GroupScope {
        GroupScope {
            api: self.api.clone(),
            groupid: groupid.to_string(),
        }
    }

    /// Group ids matching `query`.
    pub async fn search(&self, query: &str) -> NextcloudResult<WithMeta<Vec<String>>> {
        let doc = self
            .api
            .request(self.api.build(Verb::Get, "/groups").query("search", query))
            .await?;
        Ok(with_meta(&doc, texts(&doc, "data/groups/element")))
    }

    pub async fn all(&self) -> NextcloudResult<WithMeta<Vec<String>>> {
        self.search("").await
    }

    pub async fn create(&self, groupid: &str) -> NextcloudResult<Meta> {
        let req = self.api.build(Verb::Post, "/groups").form("groupid", groupid);
        Ok(extract_meta(&self.api.request(req).await?))
    }

    pub async fn destroy(&self, groupid: &str) -> NextcloudResult<Meta> {
        let req = self.api.build(Verb::Delete, &format!("/groups/{}", encode_segment(groupid)));
        Ok(extract_meta(&self.api.request(req).await?))
    }
}

/// Members and sub-admins of one group.
#[derive(Debug, Clone)]
pub struct GroupScope {
    api: Api,
    groupid: String,
}

impl GroupScope {
    pub fn groupid(&self) -> &str {
        &self.groupid
    }

    pub async fn members(&self) -> NextcloudResult<WithMeta<Vec<String>>> {
        let path = format!("/groups/{}", encode_segment(&self.groupid));
        let doc = self.api.request(self.api.build(Verb::Get, &path)).await?;
        Ok(with_meta(&doc, texts(&doc, "data/users/element")))
    }

    pub async fn subadmins(&self) -> NextcloudResult<WithMeta<Vec<String>>> {
        let path = format!("/groups/{}/subadmins", encode_segment(&self.groupid));
        let doc = self.api.request(self.api.build(Verb::Get, &path)).await?;
        Ok(with_meta(&doc, texts(&doc, "data/element")))
    }
}
