use poise::serenity_prelude::{ActivityData, ChannelId, GuildId};
use rand::seq::IteratorRandom;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

pub const PATH_VAR: &str = "OLLIEBOT_TOML";
const DEFAULT_PATH: &str = "./olliebot.toml";

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
pub enum Error {
    #[error("couldn't load config file: {0}")]
    #[event(level = ERROR)]
    Load(#[from] ::config::ConfigError),
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub workshop: WorkshopConfig,
}

impl Config {
    #[tracing::instrument(skip_all, name = "config")]
    pub fn load() -> Result<Self, Error> {
        let path = if let Ok(path) = std::env::var(PATH_VAR) {
            info!(path, "looking for config file with {PATH_VAR}...");
            path
        } else {
            warn!(path = DEFAULT_PATH, "{PATH_VAR} env unset, using default path");
            DEFAULT_PATH.to_owned()
        };

        Self::from_file(&path)
    }

    pub fn from_file(path: &str) -> Result<Self, Error> {
        Self::from_source(::config::File::new(path, ::config::FileFormat::Toml))
    }

    fn from_source<S>(source: S) -> Result<Self, Error>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        let config = ::config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        info!("config loaded");

        Ok(config)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct BotConfig {
    testing_server: Option<GuildId>,
    activity: Option<String>,
    prefix: String,
    status_channel: Option<ChannelId>,
}

impl BotConfig {
    /// Guild that commands are registered in right away, for development.
    pub fn testing_server(&self) -> Option<GuildId> {
        if self.testing_server.is_none() {
            debug!("no testing server set in config, registering commands globally only");
        }

        self.testing_server
    }

    pub fn activity(&self) -> Option<ActivityData> {
        let Some(activity) = &self.activity else {
            warn!("no bot.activity provided in config, defaulting to none");
            return None;
        };

        if activity.is_empty() {
            warn!("bot.activity provided in config as empty string, defaulting to none");
            return None;
        }

        let parsed_activity = if let Some(name) = activity.strip_prefix("playing ") {
            ActivityData::playing(name)
        } else if let Some(name) = activity.strip_prefix("listening to ") {
            ActivityData::listening(name)
        } else if let Some(name) = activity.strip_prefix("watching ") {
            ActivityData::watching(name)
        } else if let Some(name) = activity.strip_prefix("competing in ") {
            ActivityData::competing(name)
        } else {
            error!("bot.activity in config could not be parsed - must start with `playing`, `listening to`, `watching` or `competing in`");
            warn!("disabling bot activity");
            return None;
        };

        debug!(
            "bot.activity parsed as {:?}: {}",
            parsed_activity.kind, parsed_activity.name
        );
        info!("successfully parsed bot activity from config");

        Some(parsed_activity)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn status_channel(&self) -> Option<ChannelId> {
        self.status_channel
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LogsConfig {
    #[serde(default)]
    flavor_texts: Vec<String>,
}

impl LogsConfig {
    pub fn flavor_text(&self) -> Option<&str> {
        let flavor_text = self
            .flavor_texts
            .iter()
            .choose(&mut rand::thread_rng())
            .map(|s| s.as_str());

        if flavor_text.is_none() {
            warn!("no flavor texts provided in config :(");
        }

        flavor_text
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct WorkshopConfig {
    user_agent: Option<String>,
}

impl WorkshopConfig {
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_str_eq;
    use poise::serenity_prelude::ActivityType;

    fn parse(toml: &str) -> Config {
        Config::from_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .expect("config should parse")
    }

    #[test]
    fn minimal() {
        let config = parse(
            r#"
            [bot]
            prefix = "o!"
            "#,
        );

        assert_str_eq!(config.bot.prefix(), "o!");
        assert_eq!(config.bot.testing_server(), None);
        assert!(config.bot.activity().is_none());
        assert!(config.logs.flavor_text().is_none());
        assert_str_eq!(
            config.workshop.user_agent(),
            format!("olliebot/{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn full() {
        let config = parse(
            r#"
            [bot]
            prefix = "o!"
            testing_server = 123456789012345678
            activity = "watching workshop.codes"
            status_channel = 876543210987654321

            [logs]
            flavor_texts = ["hello"]

            [workshop]
            user_agent = "custom"
            "#,
        );

        assert_eq!(
            config.bot.testing_server(),
            Some(GuildId::new(123456789012345678))
        );
        assert_eq!(
            config.bot.status_channel(),
            Some(ChannelId::new(876543210987654321))
        );

        let activity = config.bot.activity().expect("activity should parse");
        assert_eq!(activity.kind, ActivityType::Watching);
        assert_str_eq!(activity.name, "workshop.codes");

        assert_eq!(config.logs.flavor_text(), Some("hello"));
        assert_str_eq!(config.workshop.user_agent(), "custom");
    }

    #[test]
    fn bad_activity_is_ignored() {
        let config = parse(
            r#"
            [bot]
            prefix = "o!"
            activity = "sleeping"
            "#,
        );

        assert!(config.bot.activity().is_none());
    }

    #[test]
    fn missing_bot_section() {
        let result = Config::from_source(::config::File::from_str(
            "[logs]\nflavor_texts = []",
            ::config::FileFormat::Toml,
        ));

        assert!(result.is_err());
    }
}
