// ──────────────────────────────────────────────────────────────────────────────
// nxc-api · webdav · tags
// ──────────────────────────────────────────────────────────────────────────────
// System tags (`/systemtags`): listing, creation, deletion, plus the entry
// point to the tags assigned to one file.
// ──────────────────────────────────────────────────────────────────────────────

use crate::client::{encode_segment, Api, DAV_ROOT};
use crate::config::Credentials;
use crate::error::NextcloudResult;
use crate::properties;
use crate::transport::Verb;
use crate::webdav::tag_relations::TagRelations;
use crate::webdav::{outcome, reply};
use nxc_core::translate::{translate_members, translate_tree};
use nxc_core::{DavReply, Outcome, Siblings, Tag, Tree, WithMeta};
use serde::Serialize;

const SYSTEMTAGS: &str = "/systemtags";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewTag<'a> {
    name: &'a str,
    user_visible: bool,
    user_assignable: bool,
}

#[derive(Debug, Clone)]
pub struct Tags {
    api: Api,
}

impl Tags {
    pub fn with_session(api: &Api) -> Self {
        Self {
            api: api.rebase(DAV_ROOT),
        }
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            api: Api::new(credentials, DAV_ROOT),
        }
    }

    /// Every tag; the collection node itself is left out.
    pub async fn list(&self) -> NextcloudResult<DavReply<WithMeta<Vec<Tag>>>> {
        let req = self.api.build(Verb::Propfind, SYSTEMTAGS).body(properties::TAG);
        let doc = self.api.request(req).await?;
        Ok(reply(&doc, |d| translate_members(d, Siblings::Multistatus)))
    }

    /// The collection node with every tag as its contents.
    pub async fn tree(&self) -> NextcloudResult<DavReply<WithMeta<Option<Tree<Tag>>>>> {
        let req = self.api.build(Verb::Propfind, SYSTEMTAGS).body(properties::TAG);
        let doc = self.api.request(req).await?;
        Ok(reply(&doc, |d| translate_tree(d, Siblings::Multistatus)))
    }

    pub async fn create(&self, name: &str, user_visible: bool, user_assignable: bool) -> NextcloudResult<Outcome> {
        let req = self.api.build(Verb::Post, SYSTEMTAGS).json(&NewTag {
            name,
            user_visible,
            user_assignable,
        })?;
        outcome(&self.api, req).await
    }

    pub async fn destroy(&self, tag_id: &str) -> NextcloudResult<Outcome> {
        let path = format!("{}/{}", SYSTEMTAGS, encode_segment(tag_id));
        outcome(&self.api, self.api.build(Verb::Delete, &path)).await
    }

    /// Tags assigned to the file with `fileid`.
    pub fn file(&self, fileid: &str) -> TagRelations {
        TagRelations::with_session(&self.api, "files", fileid)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::recording::RecordingTransport;
    use crate::transport::JSON_CONTENT_TYPE;
    use std::sync::Arc;

    const TAGS: &str = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns">
 <d:response><d:href>/remote.php/dav/systemtags/</d:href>
  <d:propstat><d:prop/><d:status>HTTP/1.1 200 OK</d:status></d:propstat>
  <d:propstat><d:prop><oc:display-name/><oc:id/></d:prop><d:status>HTTP/1.1 404 Not Found</d:status></d:propstat>
 </d:response>
 <d:response><d:href>/remote.php/dav/systemtags/1</d:href>
  <d:propstat><d:prop>
   <oc:display-name>blue</oc:display-name><oc:user-visible>true</oc:user-visible>
   <oc:user-assignable>false</oc:user-assignable><oc:id>1</oc:id>
  </d:prop><d:status>HTTP/1.1 200 OK</d:status></d:propstat>
 </d:response>
 <d:response><d:href>/remote.php/dav/systemtags/2</d:href>
  <d:propstat><d:prop>
   <oc:display-name>red</oc:display-name><oc:id>2</oc:id>
  </d:prop><d:status>HTTP/1.1 200 OK</d:status></d:propstat>
 </d:response>
</d:multistatus>"#;

    fn tags(bodies: &[&str]) -> (Tags, Arc<RecordingTransport>) {
        let transport = RecordingTransport::with_bodies(bodies);
        let api = Api::with_transport(
            Credentials::new("https://cloud.example.com", "alice", "pw"),
            DAV_ROOT,
            transport.clone(),
        );
        (Tags::with_session(&api), transport)
    }

    #[tokio::test]
    async fn list_skips_collection() {
        let (tags, transport) = tags(&[TAGS]);
        let list = tags.list().await.unwrap().success().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].display_name.as_deref(), Some("blue"));
        assert_eq!(list[0].user_assignable, Some(false));
        assert_eq!(list[1].user_visible, Some(true));
        assert_eq!(list[1].user_assignable, Some(true));

        let req = transport.last();
        assert_eq!(req.verb, Verb::Propfind);
        assert_eq!(req.url, "https://cloud.example.com/remote.php/dav/systemtags");
    }

    #[tokio::test]
    async fn tree_nests_tags_under_collection() {
        let (tags, _) = tags(&[TAGS]);
        let tree = tags.tree().await.unwrap().success().unwrap().into_inner().unwrap();
        assert_eq!(tree.href.as_deref(), Some("/remote.php/dav/systemtags/"));
        assert_eq!(tree.display_name, None);
        let names: Vec<_> = tree.contents().iter().filter_map(|t| t.id.clone()).collect();
        assert_eq!(names, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn create_posts_camel_case_json() {
        let (tags, transport) = tags(&[""]);
        assert_eq!(tags.create("green", true, false).await.unwrap(), Outcome::ok());
        let req = transport.last();
        assert_eq!(req.verb, Verb::Post);
        assert_eq!(req.effective_content_type(), JSON_CONTENT_TYPE);
        let body: serde_json::Value = serde_json::from_str(&req.body_text()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "name": "green", "userVisible": true, "userAssignable": false })
        );
    }

    #[tokio::test]
    async fn destroy_and_file_relations() {
        let (tags, transport) = tags(&[""]);
        tags.destroy("7").await.unwrap();
        assert_eq!(transport.last().url, "https://cloud.example.com/remote.php/dav/systemtags/7");
        assert_eq!(
            tags.file("12").path(),
            "/systemtags-relations/files/12"
        );
    }
}
