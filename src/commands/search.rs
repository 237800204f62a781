use poise::{serenity_prelude as serenity, CreateReply};
use tracing::{info, instrument, warn};

use crate::{
    commands::LogCommands,
    utils::{
        poise::{CommandResult, ContextExt},
        Context,
    },
};

pub mod api;
use api::SearchQuery;

mod error;
pub use error::Error;

pub mod format;
use format::{DisplayRecord, Formatted, ShapeError};

mod models;

const EMBED_COLOR: serenity::Colour = serenity::Colour::new(0x3f_bf_74);
const USAGE: &str = "usage: `search codes \"<query>\" [overwatch 2 only]` or `search wiki <query>`";

/// search workshop.codes for codes or wiki articles
#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    subcommands("codes", "wiki"),
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL | EMBED_LINKS"
)]
pub async fn search(ctx: Context<'_>, #[rest] input: Option<String>) -> CommandResult {
    ctx.log_command().await;

    // `codes` and `wiki` are dispatched by poise, so anything landing here is unrecognized
    let subcommand = input
        .as_deref()
        .and_then(|input| input.split_whitespace().next())
        .unwrap_or_default();
    warn!(subcommand, "rejected search");

    ctx.say_ext(USAGE).await?;

    Ok(())
}

/// search the workshop.codes repository of codes
#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL | EMBED_LINKS"
)]
pub async fn codes(
    ctx: Context<'_>,
    #[description = "what to search for"] query: String,
    #[description = "only show codes made for overwatch 2"] overwatch_2_only: Option<bool>,
) -> CommandResult {
    ctx.log_command().await;

    run(
        ctx,
        Search::Codes {
            query,
            overwatch_2_only,
        },
    )
    .await
}

/// search the workshop.codes wiki
#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL | EMBED_LINKS"
)]
pub async fn wiki(
    ctx: Context<'_>,
    #[description = "what to search for"]
    #[rest]
    query: String,
) -> CommandResult {
    ctx.log_command().await;

    run(ctx, Search::Wiki { query }).await
}

#[instrument(skip(ctx), fields(subcommand = search.name()))]
async fn run(ctx: Context<'_>, search: Search) -> CommandResult {
    ctx.defer().await?;

    let payload = ctx
        .data()
        .workshop()
        .fetch(&search.query())
        .await
        .map_err(Error::from)?;

    match search.format(payload).map_err(Error::from)? {
        Formatted::NoResults(message) => {
            info!("no results");
            ctx.say_ext(message).await?;
        }
        Formatted::Found(records) => {
            info!(count = records.len(), "found results");

            let reply = records
                .iter()
                .map(embed)
                .fold(
                    CreateReply::default().content(search.found_message()),
                    CreateReply::embed,
                );

            ctx.send_ext(reply).await?;
        }
    }

    Ok(())
}

fn embed(record: &DisplayRecord) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::new()
        .title(&record.title)
        .url(&record.url)
        .color(EMBED_COLOR)
        .description(&record.description)
        .fields(
            record
                .fields
                .iter()
                .map(|field| (&field.label, &field.value, field.inline)),
        )
        .footer(
            serenity::CreateEmbedFooter::new(&record.footer_text).icon_url(&record.footer_icon_url),
        );

    match record.thumbnail {
        Some(ref thumbnail) => embed.thumbnail(thumbnail),
        None => embed,
    }
}

/// One search, with the options its subcommand was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    Codes {
        query: String,
        overwatch_2_only: Option<bool>,
    },
    Wiki {
        query: String,
    },
}

impl Search {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Codes { .. } => "codes",
            Self::Wiki { .. } => "wiki",
        }
    }

    /// Sent above the result embeds.
    pub fn found_message(&self) -> &'static str {
        match self {
            Self::Codes { .. } => "Here's what I found!",
            Self::Wiki { .. } => "The best wiki article I could find was...",
        }
    }

    pub fn query(&self) -> SearchQuery {
        match self {
            Self::Codes {
                query,
                overwatch_2_only,
            } => SearchQuery::new("/search.json")
                .param("search", Some(query.as_str()))
                .param("overwatch_2", *overwatch_2_only),
            Self::Wiki { query } => SearchQuery::new(format!(
                "/wiki/search/{}.json",
                // only the first `.`, which would otherwise be read as a format extension
                urlencoding::encode(query).replacen('.', " ", 1)
            )),
        }
    }

    pub fn format(&self, payload: serde_json::Value) -> Result<Formatted, ShapeError> {
        match self {
            Self::Codes { .. } => format::format_codes(payload),
            Self::Wiki { .. } => format::format_wiki(payload),
        }
    }
}
