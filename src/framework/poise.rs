use poise::{
    serenity_prelude::{self as serenity, GuildId},
    PrefixFrameworkOptions,
};
use tracing::{info, trace};

use crate::{
    commands,
    errors::{self, CommandError},
    utils::poise::Command,
};

use super::{data::PoiseData, Config};

pub fn build(config: Config) -> poise::Framework<PoiseData, CommandError> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::list(),
            prefix_options: PrefixFrameworkOptions {
                prefix: Some(config.bot.prefix().to_string()),
                ..Default::default()
            },
            on_error: errors::handle_framework_error,
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                let http = ctx.http.clone();

                let commands: &[Command] = &framework.options().commands;
                register(&http, commands, config.bot.testing_server()).await?;

                ctx.set_activity(config.bot.activity());

                trace!("finished setup, accepting commands");

                if let Some(status_channel) = config.bot.status_channel() {
                    status_channel
                        .say(&*http, "ready!")
                        .await
                        .map_err(crate::errors::SendMessageError::from)?;
                }

                Ok(PoiseData::new(&config.workshop)?)
            })
        })
        .build()
}

/// Registers `commands` globally, and right away in `testing_server` if there is one.
#[tracing::instrument(skip_all)]
pub async fn register(
    http: &serenity::Http,
    commands: &[Command],
    testing_server: Option<GuildId>,
) -> Result<(), serenity::Error> {
    if let Some(guild_id) = testing_server {
        poise::builtins::register_in_guild(http, commands, guild_id).await?;
        info!(%guild_id, "registered commands in testing server");
    }

    poise::builtins::register_globally(http, commands).await?;
    info!(count = commands.len(), "registered commands globally");

    Ok(())
}
