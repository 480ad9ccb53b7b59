use crate::schema::{DecodeRule, Field, Record, Schema, Source};
use crate::translate::Entity;
use serde::{Deserialize, Serialize};

/// App metadata from `apps/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub id: Option<String>,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub licence: Option<String>,
    pub author: Option<String>,
    pub namespace: Option<String>,
    pub category: Option<Vec<String>>,
    pub website: Option<String>,
    pub bugs: Option<String>,
    pub repository: Option<String>,
    pub level: Option<String>,
    pub types: Option<Vec<String>>,
}

impl Entity for App {
    const SCHEMA: Schema = &[
        Field::text("id", "id"),
        Field::text("name", "name"),
        Field::text("summary", "summary"),
        Field::text("description", "description"),
        Field::text("version", "version"),
        Field::text("licence", "licence"),
        Field::text("author", "author"),
        Field::text("namespace", "namespace"),
        Field::new("category", Source::Prop("category"), DecodeRule::Items(None)),
        Field::text("website", "website"),
        Field::text("bugs", "bugs"),
        Field::text("repository", "repository"),
        Field::text("level", "level"),
        Field::new("types", Source::Prop("types"), DecodeRule::Items(None)),
    ];

    fn from_record(r: &Record) -> Self {
        Self {
            id: r.text("id"),
            name: r.text("name"),
            summary: r.text("summary"),
            description: r.text("description"),
            version: r.text("version"),
            licence: r.text("licence"),
            author: r.text("author"),
            namespace: r.text("namespace"),
            category: r.items("category"),
            website: r.text("website"),
            bugs: r.text("bugs"),
            repository: r.text("repository"),
            level: r.text("level"),
            types: r.items("types"),
        }
    }
}
