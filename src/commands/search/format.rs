use std::borrow::Cow;

use chrono::{DateTime, TimeZone};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::{CodePost, WikiArticle};

pub const CODES_LIMIT: usize = 3;
pub const WIKI_LIMIT: usize = 1;
pub const DESCRIPTION_LIMIT: usize = 1000;

pub const CODES_EMPTY: &str = "I didn't find anything on Workshop.codes.";
pub const WIKI_EMPTY: &str = "I didn't find anything like that on the Workshop.codes wiki.";

const FOOTER_TEXT: &str = "workshop.codes | Powered by Elo Hell Esports";
const FOOTER_ICON_URL: &str = "https://ehe.gg/media/img/logos/Elo-Hell-Logo_I-C-Dark.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
    pub inline: bool,
}

impl Field {
    fn inline(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            inline: true,
        }
    }
}

/// One search result, ready to be turned into an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub title: String,
    pub url: String,
    pub description: String,
    pub fields: Vec<Field>,
    pub footer_text: String,
    pub footer_icon_url: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatted {
    /// The search succeeded but matched nothing.
    NoResults(&'static str),
    Found(Vec<DisplayRecord>),
}

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
#[error("expected {expected} from Workshop.codes, got {found} instead")]
#[event(level = ERROR)]
pub struct ShapeError {
    expected: &'static str,
    found: String,
}

impl ShapeError {
    fn not_array(value: &Value) -> Self {
        let found = match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };

        Self {
            expected: "array",
            found: found.to_owned(),
        }
    }

    fn item(expected: &'static str, source: serde_json::Error) -> Self {
        Self {
            expected,
            found: format!("something else ({source})"),
        }
    }

    pub const fn tag(&self) -> &'static str {
        "Wombat"
    }
}

/// Discord renders `<t:...>` markup in the reader's own timezone.
#[derive(Debug, Clone, Copy)]
enum TimestampStyle {
    LongDate,
    Relative,
}

impl TimestampStyle {
    fn markup<Tz: TimeZone>(self, time: &DateTime<Tz>) -> String {
        let style = match self {
            Self::LongDate => 'D',
            Self::Relative => 'R',
        };

        format!("<t:{}:{style}>", time.timestamp())
    }
}

fn truncate(text: &str, limit: usize) -> Cow<'_, str> {
    match text.char_indices().nth(limit) {
        Some((end, _)) => Cow::Owned(format!("{}...", &text[..end])),
        None => Cow::Borrowed(text),
    }
}

fn leading_items<T: DeserializeOwned>(
    payload: Value,
    limit: usize,
    expected: &'static str,
) -> Result<Vec<T>, ShapeError> {
    let items = match payload {
        Value::Array(items) => items,
        other => return Err(ShapeError::not_array(&other)),
    };

    items
        .into_iter()
        .take(limit)
        .map(|item| serde_json::from_value(item).map_err(|err| ShapeError::item(expected, err)))
        .collect()
}

impl From<CodePost> for DisplayRecord {
    fn from(post: CodePost) -> Self {
        let categories = if post.categories.is_empty() {
            "-".to_owned()
        } else {
            post.categories.join(" | ")
        };

        let category_label = if post.categories.len() == 1 {
            "Category"
        } else {
            "Categories"
        };

        Self {
            title: format!("{} by {}", post.title, post.user.username),
            url: format!("{}/{}", super::api::Workshop::HOST, post.code),
            description: format!("Code: **{}**", post.code),
            fields: vec![
                Field::inline(category_label, categories),
                Field::inline("Created", TimestampStyle::LongDate.markup(&post.created_at)),
                Field::inline(
                    "Last updated",
                    TimestampStyle::Relative.markup(&post.last_revision_created_at),
                ),
            ],
            footer_text: FOOTER_TEXT.to_owned(),
            footer_icon_url: FOOTER_ICON_URL.to_owned(),
            thumbnail: post.thumbnail.filter(|url| !url.is_empty()),
        }
    }
}

impl From<WikiArticle> for DisplayRecord {
    fn from(article: WikiArticle) -> Self {
        Self {
            description: truncate(&article.content, DESCRIPTION_LIMIT).into_owned(),
            title: article.title,
            url: format!("{}/wiki/articles/{}", super::api::Workshop::HOST, article.slug),
            fields: vec![
                Field::inline("Category", article.category.title),
                Field::inline(
                    "Last updated",
                    TimestampStyle::Relative.markup(&article.updated_at),
                ),
            ],
            footer_text: FOOTER_TEXT.to_owned(),
            footer_icon_url: FOOTER_ICON_URL.to_owned(),
            thumbnail: None,
        }
    }
}

fn format_with<T>(
    payload: Value,
    limit: usize,
    expected: &'static str,
    empty: &'static str,
) -> Result<Formatted, ShapeError>
where
    T: DeserializeOwned + Into<DisplayRecord>,
{
    let items: Vec<T> = leading_items(payload, limit, expected)?;

    if items.is_empty() {
        return Ok(Formatted::NoResults(empty));
    }

    Ok(Formatted::Found(items.into_iter().map(Into::into).collect()))
}

/// Formats the first few results of a code search.
pub fn format_codes(payload: Value) -> Result<Formatted, ShapeError> {
    format_with::<CodePost>(payload, CODES_LIMIT, "code post", CODES_EMPTY)
}

/// Formats the best match of a wiki search.
pub fn format_wiki(payload: Value) -> Result<Formatted, ShapeError> {
    format_with::<WikiArticle>(payload, WIKI_LIMIT, "wiki article", WIKI_EMPTY)
}
