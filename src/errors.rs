use poise::{
    serenity_prelude::{self as serenity, Permissions},
    BoxFuture, FrameworkError,
};

use thiserror::Error as ThisError;
use thisslime::TracingError;
use tracing::{error, error_span, Instrument};

use crate::{
    framework::data::PoiseData,
    utils::{poise::ContextExt, Context},
};

pub fn handle_framework_error(
    err: FrameworkError<'_, PoiseData, CommandError>,
) -> BoxFuture<'_, ()> {
    Box::pin(async move {
        match err {
            FrameworkError::Command { error, ctx, .. } => {
                let command = ctx.invoked_command_name();
                let span = error_span!("command", command);

                handle_error(error, ctx).instrument(span).await;
            }
            FrameworkError::Setup { error, .. } => {
                error.trace();
                error!("framework setup failed");
            }
            FrameworkError::MissingBotPermissions {
                missing_permissions,
                ctx,
                ..
            } => {
                let command = ctx.invoked_command_name();
                let _enter = error_span!("command", command).entered();

                error!(%missing_permissions, "bot is missing permissions");
            }
            other => {
                if let Err(err) = poise::builtins::on_error(other).await {
                    error!(%err, "failed to handle framework error");
                }
            }
        };
    })
}

async fn handle_error(err: CommandError, ctx: Context<'_>) {
    err.trace();

    if let Err(err) = ctx.say_ext(err.user_message()).await {
        error!(%err, "failed to send error message");
    }
}

#[derive(Debug, ThisError, TracingError)]
#[span(level = WARN)]
pub enum CommandError {
    #[error("input error: {0}")]
    SendMessage(#[from] SendMessageError),

    #[error("other serenity error: {0}")]
    #[event(level = ERROR)]
    Serenity(#[from] serenity::Error),

    #[error("other reqwest error: {0}")]
    #[event(level = ERROR)]
    Reqwest(#[from] reqwest::Error),

    #[error("error from workshop.codes search: {0}")]
    Search(#[from] crate::commands::search::Error),
}

impl CommandError {
    /// What the user sees when their command fails.
    pub fn user_message(&self) -> String {
        match self {
            Self::Search(err) => format!(
                "Something went wrong while searching Workshop.codes. (error code: **{}**)",
                err.tag()
            ),
            Self::SendMessage(SendMessageError::Permissions(err)) => format!("I'm {err}!"),
            _ => "Something went wrong!".to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error, TracingError)]
#[span(level = ERROR)]
pub enum SendMessageError {
    #[error(transparent)]
    Permissions(#[from] MissingPermissionsError),

    #[error(transparent)]
    MessageTooLong(#[from] MessageTooLongError),

    #[error("couldn't send message: {0}")]
    #[event(level = ERROR)]
    Other(serenity::Error),
}

impl From<serenity::Error> for SendMessageError {
    fn from(value: serenity::Error) -> Self {
        match value {
            serenity::Error::Model(ref model) => match model {
                serenity::ModelError::InvalidPermissions { required, present } => {
                    Self::Permissions(MissingPermissionsError {
                        required: *required,
                        present: *present,
                    })
                }
                serenity::ModelError::MessageTooLong(len) => {
                    Self::MessageTooLong(MessageTooLongError { length: *len })
                }
                _ => Self::Other(value),
            },
            _ => Self::Other(value),
        }
    }
}

#[derive(Debug, ThisError, TracingError)]
#[error("missing permissions: {}", self.missing())]
#[event(level = ERROR)]
pub struct MissingPermissionsError {
    #[field(print = Display)]
    required: Permissions,

    #[field(print = Display)]
    present: Permissions,
}

impl MissingPermissionsError {
    fn missing(&self) -> Permissions {
        self.required.difference(self.present)
    }
}

#[derive(Debug, ThisError, TracingError)]
#[event(level = ERROR)]
#[error("message is too long")]
pub struct MessageTooLongError {
    pub length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::search::{format, Error as SearchError};
    use pretty_assertions::assert_str_eq;
    use serde_json::json;

    #[test]
    fn shape_error_message_has_tag() {
        let shape = format::format_wiki(json!({})).expect_err("object is not an array");
        let err = CommandError::from(SearchError::from(shape));

        assert_str_eq!(
            err.user_message(),
            "Something went wrong while searching Workshop.codes. (error code: **Wombat**)"
        );
    }

    #[test]
    fn missing_permissions() {
        let err = SendMessageError::from(serenity::Error::Model(
            serenity::ModelError::InvalidPermissions {
                required: Permissions::SEND_MESSAGES | Permissions::EMBED_LINKS,
                present: Permissions::SEND_MESSAGES,
            },
        ));

        assert!(matches!(err, SendMessageError::Permissions(_)));
        assert!(CommandError::from(err).user_message().contains("missing permissions"));
    }

    #[test]
    fn message_too_long() {
        let err = SendMessageError::from(serenity::Error::Model(
            serenity::ModelError::MessageTooLong(2001),
        ));

        assert!(matches!(
            err,
            SendMessageError::MessageTooLong(MessageTooLongError { length: 2001 })
        ));
    }
}
