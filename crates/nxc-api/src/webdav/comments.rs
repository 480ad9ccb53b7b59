// ──────────────────────────────────────────────────────────────────────────────
// nxc-api · webdav · comments
// ──────────────────────────────────────────────────────────────────────────────
// Comments on one object (`/comments/{scope}/{id}`), posted as the session
// user. Listing returns the first page of 20.
// ──────────────────────────────────────────────────────────────────────────────

use crate::client::{encode_segment, Api, DAV_ROOT};
use crate::config::Credentials;
use crate::error::NextcloudResult;
use crate::properties;
use crate::transport::Verb;
use crate::webdav::{outcome, reply};
use nxc_core::translate::translate_list;
use nxc_core::{Comment, DavReply, Outcome, Siblings, WithMeta};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewComment<'a> {
    actor_id: &'a str,
    actor_type: &'a str,
    message: &'a str,
    object_type: &'a str,
    verb: &'a str,
}

#[derive(Debug, Clone)]
pub struct Comments {
    api: Api,
    scope: String,
    path: String,
}

impl Comments {
    pub fn with_session(api: &Api, scope: &str, id: &str) -> Self {
        Self {
            api: api.rebase(DAV_ROOT),
            scope: scope.to_string(),
            path: format!("/comments/{}/{}", encode_segment(scope), encode_segment(id)),
        }
    }

    pub fn with_credentials(credentials: Credentials, scope: &str, id: &str) -> Self {
        Self::with_session(&Api::new(credentials, DAV_ROOT), scope, id)
    }

    fn comment_path(&self, comment_id: &str) -> String {
        format!("{}/{}", self.path, encode_segment(comment_id))
    }

    pub async fn list(&self) -> NextcloudResult<DavReply<WithMeta<Vec<Comment>>>> {
        let req = self.api.build(Verb::Report, &self.path).body(properties::COMMENT);
        let doc = self.api.request(req).await?;
        Ok(reply(&doc, |d| translate_list(d, Siblings::Multistatus)))
    }

    pub async fn add(&self, message: &str) -> NextcloudResult<Outcome> {
        let req = self.api.build(Verb::Post, &self.path).json(&NewComment {
            actor_id: self.api.username(),
            actor_type: "users",
            message,
            object_type: &self.scope,
            verb: "comment",
        })?;
        outcome(&self.api, req).await
    }

    pub async fn modify(&self, comment_id: &str, message: &str) -> NextcloudResult<Outcome> {
        let req = self
            .api
            .build(Verb::Proppatch, &self.comment_path(comment_id))
            .body(properties::modify_comment(message));
        outcome(&self.api, req).await
    }

    pub async fn remove(&self, comment_id: &str) -> NextcloudResult<Outcome> {
        outcome(&self.api, self.api.build(Verb::Delete, &self.comment_path(comment_id))).await
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::recording::RecordingTransport;
    use std::sync::Arc;

    const THREAD: &str = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns">
 <d:response><d:href>/remote.php/dav/comments/files/12/5</d:href>
  <d:propstat><d:prop>
   <oc:id>5</oc:id><oc:actorId>alice</oc:actorId><oc:message>first</oc:message>
   <oc:isUnread>false</oc:isUnread>
  </d:prop><d:status>HTTP/1.1 200 OK</d:status></d:propstat></d:response>
 <d:response><d:href>/remote.php/dav/comments/files/12/6</d:href>
  <d:propstat><d:prop>
   <oc:id>6</oc:id><oc:actorId>bob</oc:actorId><oc:message>second</oc:message>
  </d:prop><d:status>HTTP/1.1 200 OK</d:status></d:propstat></d:response>
</d:multistatus>"#;

    fn comments(bodies: &[&str]) -> (Comments, Arc<RecordingTransport>) {
        let transport = RecordingTransport::with_bodies(bodies);
        let api = Api::with_transport(
            Credentials::new("https://cloud.example.com", "alice", "pw"),
            DAV_ROOT,
            transport.clone(),
        );
        (Comments::with_session(&api, "files", "12"), transport)
    }

    #[tokio::test]
    async fn list_keeps_every_comment() {
        let (comments, transport) = comments(&[THREAD]);
        let list = comments.list().await.unwrap().success().unwrap();
        assert_eq!(list.meta.status(), Some("HTTP/1.1 200 OK"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].message.as_deref(), Some("first"));
        assert_eq!(list[0].is_unread, Some(false));
        assert_eq!(list[1].is_unread, Some(true));

        let req = transport.last();
        assert_eq!(req.verb, Verb::Report);
        assert_eq!(req.url, "https://cloud.example.com/remote.php/dav/comments/files/12");
        assert_eq!(req.body_text(), properties::COMMENT);
    }

    #[tokio::test]
    async fn add_posts_as_session_user() {
        let (comments, transport) = comments(&[]);
        comments.add("hello").await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&transport.last().body_text()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "actorId": "alice",
                "actorType": "users",
                "message": "hello",
                "objectType": "files",
                "verb": "comment",
            })
        );
    }

    #[tokio::test]
    async fn modify_and_remove_target_one_comment() {
        let (comments, transport) = comments(&[]);
        comments.modify("5", "a < b").await.unwrap();
        comments.remove("5").await.unwrap();
        let reqs = transport.requests();
        assert_eq!(reqs[0].verb, Verb::Proppatch);
        assert_eq!(reqs[0].url, "https://cloud.example.com/remote.php/dav/comments/files/12/5");
        assert!(reqs[0].body_text().contains("<oc:message>a &lt; b</oc:message>"));
        assert_eq!(reqs[1].verb, Verb::Delete);
    }
}
