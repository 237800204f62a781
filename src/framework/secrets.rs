use std::fmt::Display;

#[derive(Clone)]
pub struct Secrets {
    bot_token: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("bot_token", &"[redacted]")
            .finish()
    }
}

impl Secrets {
    #[tracing::instrument(skip_all, name = "secrets")]
    pub fn from_env() -> Result<Self, MissingSecretError> {
        let bot_token = SecretKey::BotToken.read()?;

        tracing::debug!("loaded secrets from environment");

        Ok(Self { bot_token })
    }

    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SecretKey {
    BotToken,
}

impl SecretKey {
    pub const fn var(self) -> &'static str {
        match self {
            Self::BotToken => "OLLIEBOT_TOKEN",
        }
    }

    fn read(self) -> Result<String, MissingSecretError> {
        std::env::var(self.var())
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(MissingSecretError { secret: self })
    }
}

impl Display for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::BotToken => "bot_token",
        })
    }
}

#[derive(Debug, thiserror::Error, thisslime::TracingError)]
#[error("missing secret {secret} (set {})", self.secret.var())]
#[event(level = ERROR)]
pub struct MissingSecretError {
    #[field(print = Display)]
    secret: SecretKey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_str_eq;

    #[test]
    fn missing_secret_message() {
        let err = MissingSecretError {
            secret: SecretKey::BotToken,
        };

        assert_str_eq!(
            err.to_string(),
            "missing secret bot_token (set OLLIEBOT_TOKEN)"
        );
    }

    #[test]
    fn token_is_redacted() {
        let secrets = Secrets {
            bot_token: "hunter2".to_owned(),
        };

        assert!(!format!("{secrets:?}").contains("hunter2"));
    }
}
