use crate::schema::{DecodeRule, Field, Record, Schema, Source, FAVORITE_FLAG, PRESENCE_FLAG};
use crate::translate::Entity;
use serde::{Deserialize, Serialize};

/// A file or directory under `/files/<user>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub href: Option<String>,
    pub id: Option<String>,
    pub fileid: Option<String>,
    pub contenttype: Option<String>,
    pub contentlength: Option<String>,
    /// Last href segment, decoded.
    pub display_name: Option<String>,
    pub has_preview: Option<bool>,
    pub lastmodified: Option<String>,
    pub owner_display_name: Option<String>,
    pub owner_id: Option<String>,
    /// Path relative to the user's root, always starting with `/`. Segments
    /// stay percent-encoded as in the href.
    pub path: Option<String>,
    pub permissions: Option<String>,
    /// `"collection"` or `"file"`.
    pub resourcetype: Option<String>,
    pub share_types: Option<Vec<String>>,
    pub size: Option<String>,
    /// ETag.
    pub tag: Option<String>,
    pub favorite: Option<bool>,
    pub comments_href: Option<String>,
    pub comments_count: Option<String>,
    pub comments_unread: Option<String>,
}

impl DirectoryEntry {
    pub fn is_collection(&self) -> bool {
        self.resourcetype.as_deref() == Some("collection")
    }
}

impl Entity for DirectoryEntry {
    const SCHEMA: Schema = &[
        Field::new("href", Source::Href, DecodeRule::Text),
        Field::text("id", "id"),
        Field::text("fileid", "fileid"),
        Field::text("contenttype", "getcontenttype"),
        Field::text("contentlength", "getcontentlength"),
        Field::new("display_name", Source::Href, DecodeRule::DisplayName),
        Field::flag("has_preview", "has-preview", PRESENCE_FLAG),
        Field::text("lastmodified", "getlastmodified"),
        Field::text("owner_display_name", "owner-display-name"),
        Field::text("owner_id", "owner-id"),
        Field::new("path", Source::Href, DecodeRule::RelativePath),
        Field::text("permissions", "permissions"),
        Field::new("resourcetype", Source::Prop("resourcetype"), DecodeRule::Kind),
        Field::new("share_types", Source::Prop("share-types"), DecodeRule::Items(None)),
        Field::text("size", "size"),
        Field::text("tag", "getetag"),
        Field::flag("favorite", "favorite", FAVORITE_FLAG),
        Field::text("comments_href", "comments-href"),
        Field::text("comments_count", "comments-count"),
        Field::text("comments_unread", "comments-unread"),
    ];

    fn from_record(r: &Record) -> Self {
        Self {
            href: r.text("href"),
            id: r.text("id"),
            fileid: r.text("fileid"),
            contenttype: r.text("contenttype"),
            contentlength: r.text("contentlength"),
            display_name: r.text("display_name"),
            has_preview: r.flag("has_preview"),
            lastmodified: r.text("lastmodified"),
            owner_display_name: r.text("owner_display_name"),
            owner_id: r.text("owner_id"),
            path: r.text("path"),
            permissions: r.text("permissions"),
            resourcetype: r.text("resourcetype"),
            share_types: r.items("share_types"),
            size: r.text("size"),
            tag: r.text("tag"),
            favorite: r.flag("favorite"),
            comments_href: r.text("comments_href"),
            comments_count: r.text("comments_count"),
            comments_unread: r.text("comments_unread"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::{translate_list, translate_tree, Siblings};
    use crate::xml::XmlNode;

    const LISTING: &str = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:" xmlns:s="http://sabredav.org/ns" xmlns:oc="http://owncloud.org/ns" xmlns:nc="http://nextcloud.org/ns">
  <d:response>
    <d:href>/remote.php/dav/files/testuser/dir1/</d:href>
    <d:propstat>
      <d:prop>
        <d:getlastmodified>Tue, 20 Feb 2018 10:00:00 GMT</d:getlastmodified>
        <d:getetag>"5a8bf0e0"</d:getetag>
        <d:resourcetype><d:collection/></d:resourcetype>
        <oc:id>00000012ocabc</oc:id>
        <oc:fileid>12</oc:fileid>
        <oc:permissions>RGDNVCK</oc:permissions>
        <oc:size>163</oc:size>
        <nc:has-preview>false</nc:has-preview>
        <oc:favorite>1</oc:favorite>
        <oc:owner-id>testuser</oc:owner-id>
        <oc:owner-display-name>Test User</oc:owner-display-name>
        <oc:share-types><oc:share-type>0</oc:share-type><oc:share-type>3</oc:share-type></oc:share-types>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
    <d:propstat>
      <d:prop><d:getcontenttype/><d:getcontentlength/></d:prop>
      <d:status>HTTP/1.1 404 Not Found</d:status>
    </d:propstat>
  </d:response>
  <d:response>
    <d:href>/remote.php/dav/files/testuser/dir1/my%20file.txt</d:href>
    <d:propstat>
      <d:prop>
        <d:getcontenttype>text/plain</d:getcontenttype>
        <d:getcontentlength>163</d:getcontentlength>
        <d:resourcetype/>
        <oc:fileid>13</oc:fileid>
        <oc:favorite>0</oc:favorite>
        <oc:share-types/>
      </d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

    #[test]
    fn directory_tree_from_listing() {
        let tree = translate_tree::<DirectoryEntry>(&XmlNode::parse(LISTING), Siblings::Multistatus).unwrap();

        assert_eq!(tree.path.as_deref(), Some("/dir1/"));
        assert_eq!(tree.display_name.as_deref(), Some("dir1"));
        assert!(tree.is_collection());
        assert_eq!(tree.has_preview, Some(false));
        assert_eq!(tree.favorite, Some(true));
        assert_eq!(tree.tag.as_deref(), Some("\"5a8bf0e0\""));
        assert_eq!(tree.owner_display_name.as_deref(), Some("Test User"));
        assert_eq!(tree.share_types, Some(vec!["0".to_string(), "3".to_string()]));
        assert_eq!(tree.contenttype, None);

        assert_eq!(tree.contents().len(), 1);
        let file = &tree.contents()[0];
        assert_eq!(file.path.as_deref(), Some("/dir1/my%20file.txt"));
        assert_eq!(file.display_name.as_deref(), Some("my file.txt"));
        assert_eq!(file.resourcetype.as_deref(), Some("file"));
        assert_eq!(file.has_preview, Some(true));
        assert_eq!(file.favorite, Some(false));
        assert_eq!(file.share_types, Some(Vec::new()));
        assert_eq!(file.id, None);
    }

    #[test]
    fn flat_listing_has_every_sibling() {
        let list = translate_list::<DirectoryEntry>(&XmlNode::parse(LISTING), Siblings::Multistatus);
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].fileid.as_deref(), Some("13"));
    }

    #[test]
    fn hand_built_entry_keeps_unset_fields_absent() {
        let entry = DirectoryEntry {
            path: Some("/x".into()),
            ..Default::default()
        };
        assert_eq!(entry.favorite, None);
        assert!(!entry.is_collection());
    }
}
