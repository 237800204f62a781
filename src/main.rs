#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

mod commands;
mod errors;
mod framework;
mod utils;

use poise::serenity_prelude::{self as serenity, GatewayIntents};
use thisslime::TracingError as _;
use tracing::info;
use tracing_unwrap::ResultExt;

use framework::{Config, Secrets};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    framework::logging::init_tracing();

    info!(
        "{} release {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::load()
        .inspect_err(|err| err.trace())
        .expect_or_log("config could not be loaded");

    if let Some(flavor_text) = config.logs.flavor_text() {
        info!("{flavor_text}")
    }

    let secrets = Secrets::from_env()
        .inspect_err(|err| err.trace())
        .expect_or_log("secrets could not be loaded");

    let framework = framework::poise::build(config);

    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::Client::builder(secrets.bot_token(), intents)
        .framework(framework)
        .await
        .expect_or_log("client should be valid");

    client
        .start()
        .await
        .expect_or_log("client should not return error");
}
