use crate::schema::{DecodeRule, Field, Record, Schema, Source};
use crate::translate::Entity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A folder of the groupfolders app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFolder {
    pub id: Option<String>,
    pub mount_point: Option<String>,
    /// Group id → permission bitmask.
    pub groups: Option<BTreeMap<String, String>>,
    pub quota: Option<String>,
    pub size: Option<String>,
    pub acl: Option<String>,
}

impl Entity for GroupFolder {
    const SCHEMA: Schema = &[
        Field::text("id", "id"),
        Field::text("mount_point", "mount_point"),
        Field::new("groups", Source::Prop("groups"), DecodeRule::Pairs),
        Field::text("quota", "quota"),
        Field::text("size", "size"),
        Field::text("acl", "acl"),
    ];

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            mount_point: r.text("mount_point"),
            groups: r.pairs("groups"),
            quota: r.text("quota"),
            size: r.text("size"),
            acl: r.text("acl"),
        }
    }
}
