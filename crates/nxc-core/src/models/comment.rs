use crate::schema::{DecodeRule, Field, Record, Schema, Source, PRESENCE_FLAG};
use crate::translate::Entity;
use serde::{Deserialize, Serialize};

/// A comment attached to an object (usually a file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub href: Option<String>,
    pub id: Option<String>,
    pub parent_id: Option<String>,
    pub topmost_parent_id: Option<String>,
    pub children_count: Option<String>,
    /// Always `"comment"` for user comments.
    pub verb: Option<String>,
    pub actor_type: Option<String>,
    pub actor_id: Option<String>,
    pub creation_datetime: Option<String>,
    pub latest_child_datetime: Option<String>,
    pub object_type: Option<String>,
    pub object_id: Option<String>,
    pub message: Option<String>,
    pub actor_display_name: Option<String>,
    pub is_unread: Option<bool>,
    /// Ids of the mentioned actors.
    pub mentions: Option<Vec<String>>,
}

impl Entity for Comment {
    const SCHEMA: Schema = &[
        Field::new("href", Source::Href, DecodeRule::Text),
        Field::text("id", "id"),
        Field::text("parent_id", "parentId"),
        Field::text("topmost_parent_id", "topmostParentId"),
        Field::text("children_count", "childrenCount"),
        Field::text("verb", "verb"),
        Field::text("actor_type", "actorType"),
        Field::text("actor_id", "actorId"),
        Field::text("creation_datetime", "creationDateTime"),
        Field::text("latest_child_datetime", "latestChildDateTime"),
        Field::text("object_type", "objectType"),
        Field::text("object_id", "objectId"),
        Field::text("message", "message"),
        Field::text("actor_display_name", "actorDisplayName"),
        Field::flag("is_unread", "isUnread", PRESENCE_FLAG),
        Field::new("mentions", Source::Prop("mentions"), DecodeRule::Items(Some("mentionId"))),
    ];

    fn from_record(r: &Record) -> Self {
        Self {
            href: r.text("href"),
            id: r.text("id"),
            parent_id: r.text("parent_id"),
            topmost_parent_id: r.text("topmost_parent_id"),
            children_count: r.text("children_count"),
            verb: r.text("verb"),
            actor_type: r.text("actor_type"),
            actor_id: r.text("actor_id"),
            creation_datetime: r.text("creation_datetime"),
            latest_child_datetime: r.text("latest_child_datetime"),
            object_type: r.text("object_type"),
            object_id: r.text("object_id"),
            message: r.text("message"),
            actor_display_name: r.text("actor_display_name"),
            is_unread: r.flag("is_unread"),
            mentions: r.items("mentions"),
        }
    }
}
