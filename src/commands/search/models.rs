use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub username: String,
}

/// A code post, as returned by `/search.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CodePost {
    pub title: String,
    pub user: User,
    pub code: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub created_at: DateTime<FixedOffset>,
    pub last_revision_created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiCategory {
    pub title: String,
}

/// A wiki article, as returned by `/wiki/search/<query>.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct WikiArticle {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category: WikiCategory,
    pub updated_at: DateTime<FixedOffset>,
}
