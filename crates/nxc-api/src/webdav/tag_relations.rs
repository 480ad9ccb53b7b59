//! Tags assigned to one object (`/systemtags-relations/{scope}/{id}`).

use crate::client::{encode_segment, Api, DAV_ROOT};
use crate::config::Credentials;
use crate::error::NextcloudResult;
use crate::properties;
use crate::transport::Verb;
use crate::webdav::{outcome, reply};
use nxc_core::translate::translate_members;
use nxc_core::{DavReply, Outcome, Siblings, Tag, WithMeta};

#[derive(Debug, Clone)]
pub struct TagRelations {
    api: Api,
    path: String,
}

impl TagRelations {
    pub fn with_session(api: &Api, scope: &str, id: &str) -> Self {
        Self {
            api: api.rebase(DAV_ROOT),
            path: format!("/systemtags-relations/{}/{}", encode_segment(scope), encode_segment(id)),
        }
    }

    pub fn with_credentials(credentials: Credentials, scope: &str, id: &str) -> Self {
        Self::with_session(&Api::new(credentials, DAV_ROOT), scope, id)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn tag_path(&self, tag_id: &str) -> String {
        format!("{}/{}", self.path, encode_segment(tag_id))
    }

    /// Tags on the object, without the relation collection itself.
    pub async fn list(&self) -> NextcloudResult<DavReply<WithMeta<Vec<Tag>>>> {
        let req = self.api.build(Verb::Propfind, &self.path).body(properties::TAG);
        let doc = self.api.request(req).await?;
        Ok(reply(&doc, |d| translate_members(d, Siblings::Multistatus)))
    }

    pub async fn add(&self, tag_id: &str) -> NextcloudResult<Outcome> {
        let req = self.api.build(Verb::Put, &self.tag_path(tag_id)).body("{}");
        outcome(&self.api, req).await
    }

    pub async fn remove(&self, tag_id: &str) -> NextcloudResult<Outcome> {
        outcome(&self.api, self.api.build(Verb::Delete, &self.tag_path(tag_id))).await
    }
}
