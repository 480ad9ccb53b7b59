//! Fixed WebDAV request bodies.

use quick_xml::escape::escape;

/// PROPFIND body for file and directory listings.
pub const RESOURCE: &str = r#"<?xml version="1.0"?>
<d:propfind xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns" xmlns:nc="http://nextcloud.org/ns">
  <d:prop>
    <d:getlastmodified/>
    <d:getetag/>
    <d:resourcetype/>
    <d:getcontenttype/>
    <d:getcontentlength/>
    <oc:id/>
    <oc:fileid/>
    <oc:permissions/>
    <oc:size/>
    <nc:has-preview/>
    <oc:favorite/>
    <oc:comments-href/>
    <oc:comments-count/>
    <oc:comments-unread/>
    <oc:owner-id/>
    <oc:owner-display-name/>
    <oc:share-types/>
  </d:prop>
</d:propfind>"#;

pub const MAKE_FAVORITE: &str = r#"<?xml version="1.0"?>
<d:propertyupdate xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns">
  <d:set>
    <d:prop>
      <oc:favorite>1</oc:favorite>
    </d:prop>
  </d:set>
</d:propertyupdate>"#;

pub const UNFAVORITE: &str = r#"<?xml version="1.0"?>
<d:propertyupdate xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns">
  <d:set>
    <d:prop>
      <oc:favorite>0</oc:favorite>
    </d:prop>
  </d:set>
</d:propertyupdate>"#;

/// REPORT body listing favorites below a path.
pub const FAVORITE: &str = r#"<?xml version="1.0"?>
<oc:filter-files xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns" xmlns:nc="http://nextcloud.org/ns">
  <oc:filter-rules>
    <oc:favorite>1</oc:favorite>
  </oc:filter-rules>
  <d:prop>
    <d:getlastmodified/>
    <d:getetag/>
    <d:getcontenttype/>
    <d:resourcetype/>
    <oc:fileid/>
    <oc:permissions/>
    <oc:size/>
    <d:getcontentlength/>
    <nc:has-preview/>
    <oc:favorite/>
    <oc:comments-unread/>
    <oc:owner-display-name/>
    <oc:share-types/>
  </d:prop>
</oc:filter-files>"#;

pub const TAG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<a:propfind xmlns:a="DAV:" xmlns:oc="http://owncloud.org/ns">
  <a:prop>
    <oc:display-name/>
    <oc:user-visible/>
    <oc:user-assignable/>
    <oc:id/>
  </a:prop>
</a:propfind>"#;

/// REPORT body for comment listings, first 20 comments.
pub const COMMENT: &str = r#"<?xml version="1.0"?>
<oc:filter-comments xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns" xmlns:nc="http://nextcloud.org/ns" xmlns:ocs="http://open-collaboration-services.org/ns">
  <oc:limit>20</oc:limit>
  <oc:offset>0</oc:offset>
</oc:filter-comments>"#;

const SEARCH_SELECT: &str = r#"
    <d:select>
      <d:prop>
        <d:getlastmodified/>
        <d:getetag/>
        <d:resourcetype/>
        <d:getcontenttype/>
        <d:getcontentlength/>
        <oc:id/>
        <oc:fileid/>
        <oc:permissions/>
        <oc:size/>
        <nc:has-preview/>
        <oc:favorite/>
        <oc:comments-href/>
        <oc:comments-count/>
        <oc:comments-unread/>
        <oc:owner-id/>
        <oc:owner-display-name/>
        <oc:share-types/>
      </d:prop>
    </d:select>"#;

fn search_request(scope: &str, condition: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<d:searchrequest xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns" xmlns:nc="http://nextcloud.org/ns">
  <d:basicsearch>{select}
    <d:from>
      <d:scope>
        <d:href>{scope}</d:href>
        <d:depth>infinity</d:depth>
      </d:scope>
    </d:from>
    <d:where>
      {condition}
    </d:where>
    <d:orderby/>
  </d:basicsearch>
</d:searchrequest>"#,
        select = SEARCH_SELECT,
        scope = escape(scope),
        condition = condition,
    )
}

/// SEARCH body matching one fileid below `scope` (a `/files/<user>/…` href).
pub fn search_by_fileid(id: &str, scope: &str) -> String {
    search_request(
        scope,
        &format!(
            "<d:eq><d:prop><oc:fileid/></d:prop><d:literal>{}</d:literal></d:eq>",
            escape(id)
        ),
    )
}

/// SEARCH body matching display names containing `name`.
pub fn search_by_name(name: &str, scope: &str) -> String {
    search_request(
        scope,
        &format!(
            "<d:like><d:prop><d:displayname/></d:prop><d:literal>%{}%</d:literal></d:like>",
            escape(name)
        ),
    )
}

/// PROPPATCH body replacing a comment's message.
pub fn modify_comment(message: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<d:propertyupdate xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns">
  <d:set>
    <d:prop>
      <oc:message>{}</oc:message>
    </d:prop>
  </d:set>
</d:propertyupdate>"#,
        escape(message)
    )
}
