use crate::{
    errors::{CommandError, SendMessageError},
    framework::data::PoiseData,
};

use poise::{CreateReply, ReplyHandle};

pub type Context<'a> = poise::Context<'a, PoiseData, CommandError>;

pub type Error = CommandError;
pub type Command = poise::Command<PoiseData, Error>;
pub type CommandResult = Result<(), Error>;

pub trait ContextExt<'a> {
    async fn say_ext(
        self,
        text: impl Into<String>,
    ) -> Result<ReplyHandle<'a>, SendMessageError>;

    async fn send_ext(self, reply: CreateReply) -> Result<ReplyHandle<'a>, SendMessageError>;
}

impl<'a> ContextExt<'a> for Context<'a> {
    async fn say_ext(
        self,
        text: impl Into<String>,
    ) -> Result<ReplyHandle<'a>, SendMessageError> {
        self.say(text).await.map_err(SendMessageError::from)
    }

    async fn send_ext(self, reply: CreateReply) -> Result<ReplyHandle<'a>, SendMessageError> {
        self.send(reply).await.map_err(SendMessageError::from)
    }
}
