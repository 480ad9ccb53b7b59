use crate::schema::{DecodeRule, Field, Record, Schema, Source};
use crate::translate::Entity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user account from the provisioning API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub enabled: Option<String>,
    pub id: Option<String>,
    /// `free`, `used`, `total`, `relative`, `quota`.
    pub quota: Option<BTreeMap<String, String>>,
    pub email: Option<String>,
    pub displayname: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub groups: Option<Vec<String>>,
    pub language: Option<String>,
}

impl User {
    /// A user known only by id, as returned by the user listing.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.enabled.as_deref(), Some("1") | Some("true"))
    }
}

impl Entity for User {
    const SCHEMA: Schema = &[
        Field::text("enabled", "enabled"),
        Field::text("id", "id"),
        Field::new("quota", Source::Prop("quota"), DecodeRule::Pairs),
        Field::text("email", "email"),
        Field::text("displayname", "displayname"),
        Field::text("phone", "phone"),
        Field::text("address", "address"),
        Field::text("website", "website"),
        Field::text("twitter", "twitter"),
        Field::new("groups", Source::Prop("groups"), DecodeRule::Items(None)),
        Field::text("language", "language"),
    ];

    fn from_record(r: &Record) -> Self {
        Self {
            enabled: r.text("enabled"),
            id: r.text("id"),
            quota: r.pairs("quota"),
            email: r.text("email"),
            displayname: r.text("displayname"),
            phone: r.text("phone"),
            address: r.text("address"),
            website: r.text("website"),
            twitter: r.text("twitter"),
            groups: r.items("groups"),
            language: r.text("language"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::{translate_single, Siblings};
    use crate::xml::XmlNode;

    #[test]
    fn user_from_ocs_data() {
        let body = r#"<?xml version="1.0"?>
<ocs>
 <meta><status>ok</status><statuscode>200</statuscode><message>OK</message></meta>
 <data>
  <enabled>1</enabled>
  <id>bob</id>
  <quota><free>1024</free><used>20</used><total>1044</total><relative>1.92</relative><quota>-3</quota></quota>
  <email>bob@example.com</email>
  <displayname>Bob</displayname>
  <phone></phone>
  <groups><element>admin</element><element>staff</element></groups>
  <language>en</language>
 </data>
</ocs>"#;
        let user: User = translate_single(&XmlNode::parse(body), Siblings::Elements("ocs/data")).unwrap();
        assert_eq!(user.id.as_deref(), Some("bob"));
        assert!(user.is_enabled());
        assert_eq!(user.quota.as_ref().and_then(|q| q.get("used")).map(String::as_str), Some("20"));
        assert_eq!(user.quota.as_ref().map(|q| q.len()), Some(5));
        assert_eq!(user.groups, Some(vec!["admin".to_string(), "staff".to_string()]));
        assert_eq!(user.phone, None);
        assert_eq!(user.twitter, None);
    }
}
