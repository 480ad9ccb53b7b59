use crate::schema::{Field, Record, Schema};
use crate::translate::Entity;
use serde::{Deserialize, Serialize};

// ── Share kinds ──────────────────────────────────────────────────────────────

/// Nextcloud share types (OCS `share_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShareType {
    User = 0,
    Group = 1,
    PublicLink = 3,
    Email = 4,
    FederatedCloudShare = 6,
    Circle = 7,
    TalkConversation = 10,
    Deck = 12,
}

impl ShareType {
    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::User),
            1 => Some(Self::Group),
            3 => Some(Self::PublicLink),
            4 => Some(Self::Email),
            6 => Some(Self::FederatedCloudShare),
            7 => Some(Self::Circle),
            10 => Some(Self::TalkConversation),
            12 => Some(Self::Deck),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

/// Permission bitmask shared by shares and group folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePermissions(pub u32);

impl SharePermissions {
    pub const READ: u32 = 1;
    pub const UPDATE: u32 = 2;
    pub const CREATE: u32 = 4;
    pub const DELETE: u32 = 8;
    pub const SHARE: u32 = 16;
    pub const ALL: u32 = 31;

    pub fn can_read(&self) -> bool {
        self.0 & Self::READ != 0
    }
    pub fn can_update(&self) -> bool {
        self.0 & Self::UPDATE != 0
    }
    pub fn can_create(&self) -> bool {
        self.0 & Self::CREATE != 0
    }
    pub fn can_delete(&self) -> bool {
        self.0 & Self::DELETE != 0
    }
    pub fn can_share(&self) -> bool {
        self.0 & Self::SHARE != 0
    }
}

// ── Share ────────────────────────────────────────────────────────────────────

/// One element of the files_sharing `shares` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub id: Option<String>,
    pub share_type: Option<String>,
    pub uid_owner: Option<String>,
    pub displayname_owner: Option<String>,
    pub permissions: Option<String>,
    pub stime: Option<String>,
    pub parent: Option<String>,
    pub expiration: Option<String>,
    pub token: Option<String>,
    pub uid_file_owner: Option<String>,
    pub displayname_file_owner: Option<String>,
    pub path: Option<String>,
    pub item_type: Option<String>,
    pub mimetype: Option<String>,
    pub storage_id: Option<String>,
    pub storage: Option<String>,
    pub item_source: Option<String>,
    pub file_source: Option<String>,
    pub file_parent: Option<String>,
    pub file_target: Option<String>,
    pub share_with: Option<String>,
    pub share_with_displayname: Option<String>,
    pub mail_send: Option<String>,
    pub url: Option<String>,
    pub note: Option<String>,
    pub label: Option<String>,
}

impl Share {
    pub fn kind(&self) -> Option<ShareType> {
        self.share_type
            .as_deref()
            .and_then(|s| s.parse().ok())
            .and_then(ShareType::from_i32)
    }

    pub fn permission_set(&self) -> Option<SharePermissions> {
        self.permissions
            .as_deref()
            .and_then(|p| p.parse().ok())
            .map(SharePermissions)
    }
}

// Every share field is named as on the wire.
macro_rules! wire_fields {
    ($($name:literal),* $(,)?) => {
        &[$(Field::text($name, $name)),*]
    };
}

impl Entity for Share {
    const SCHEMA: Schema = wire_fields![
        "id", "share_type", "uid_owner", "displayname_owner", "permissions", "stime",
        "parent", "expiration", "token", "uid_file_owner", "displayname_file_owner",
        "path", "item_type", "mimetype", "storage_id", "storage", "item_source",
        "file_source", "file_parent", "file_target", "share_with",
        "share_with_displayname", "mail_send", "url", "note", "label",
    ];

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            share_type: r.text("share_type"),
            uid_owner: r.text("uid_owner"),
            displayname_owner: r.text("displayname_owner"),
            permissions: r.text("permissions"),
            stime: r.text("stime"),
            parent: r.text("parent"),
            expiration: r.text("expiration"),
            token: r.text("token"),
            uid_file_owner: r.text("uid_file_owner"),
            displayname_file_owner: r.text("displayname_file_owner"),
            path: r.text("path"),
            item_type: r.text("item_type"),
            mimetype: r.text("mimetype"),
            storage_id: r.text("storage_id"),
            storage: r.text("storage"),
            item_source: r.text("item_source"),
            file_source: r.text("file_source"),
            file_parent: r.text("file_parent"),
            file_target: r.text("file_target"),
            share_with: r.text("share_with"),
            share_with_displayname: r.text("share_with_displayname"),
            mail_send: r.text("mail_send"),
            url: r.text("url"),
            note: r.text("note"),
            label: r.text("label"),
        }
    }
}

// ── Federated share ──────────────────────────────────────────────────────────

/// A remote (federated cloud) share, accepted or pending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederatedShare {
    pub id: Option<String>,
    pub remote: Option<String>,
    pub remote_id: Option<String>,
    pub share_token: Option<String>,
    pub name: Option<String>,
    pub owner: Option<String>,
    pub user: Option<String>,
    pub mountpoint: Option<String>,
    pub accepted: Option<String>,
    pub mimetype: Option<String>,
    pub mtime: Option<String>,
    pub permissions: Option<String>,
    /// `type` on the wire (`file` or `dir`).
    pub share_type: Option<String>,
    pub file_id: Option<String>,
}

impl Entity for FederatedShare {
    const SCHEMA: Schema = &[
        Field::text("id", "id"),
        Field::text("remote", "remote"),
        Field::text("remote_id", "remote_id"),
        Field::text("share_token", "share_token"),
        Field::text("name", "name"),
        Field::text("owner", "owner"),
        Field::text("user", "user"),
        Field::text("mountpoint", "mountpoint"),
        Field::text("accepted", "accepted"),
        Field::text("mimetype", "mimetype"),
        Field::text("mtime", "mtime"),
        Field::text("permissions", "permissions"),
        Field::text("share_type", "type"),
        Field::text("file_id", "file_id"),
    ];

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            remote: r.text("remote"),
            remote_id: r.text("remote_id"),
            share_token: r.text("share_token"),
            name: r.text("name"),
            owner: r.text("owner"),
            user: r.text("user"),
            mountpoint: r.text("mountpoint"),
            accepted: r.text("accepted"),
            mimetype: r.text("mimetype"),
            mtime: r.text("mtime"),
            permissions: r.text("permissions"),
            share_type: r.text("share_type"),
            file_id: r.text("file_id"),
        }
    }
}
