//! Typed entities, one struct per remote object kind.
//!
//! Every field is optional: a field missing from the response stays `None`,
//! and a hand-built entity only carries what the caller set. Each struct
//! declares its [`Schema`](crate::schema::Schema) next to its fields.

mod app;
mod comment;
mod directory;
mod group_folder;
mod share;
mod tag;
mod user;

pub use app::App;
pub use comment::Comment;
pub use directory::DirectoryEntry;
pub use group_folder::GroupFolder;
pub use share::{FederatedShare, Share, SharePermissions, ShareType};
pub use tag::Tag;
pub use user::User;
