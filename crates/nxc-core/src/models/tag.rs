use crate::schema::{DecodeRule, Field, Record, Schema, Source, PRESENCE_FLAG};
use crate::translate::Entity;
use serde::{Deserialize, Serialize};

/// A system tag from `/systemtags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub href: Option<String>,
    pub display_name: Option<String>,
    pub user_visible: Option<bool>,
    pub user_assignable: Option<bool>,
    pub id: Option<String>,
}

impl Entity for Tag {
    const SCHEMA: Schema = &[
        Field::new("href", Source::Href, DecodeRule::Text),
        Field::text("display_name", "display-name"),
        Field::flag("user_visible", "user-visible", PRESENCE_FLAG),
        Field::flag("user_assignable", "user-assignable", PRESENCE_FLAG),
        Field::text("id", "id"),
    ];

    fn from_record(r: &Record) -> Self {
        Self {
            href: r.text("href"),
            display_name: r.text("display_name"),
            user_visible: r.flag("user_visible"),
            user_assignable: r.flag("user_assignable"),
            id: r.text("id"),
        }
    }
}
