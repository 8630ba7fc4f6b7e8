mod command;
mod config;
mod context;
mod event;
mod handler;
mod helper;
mod logging;
mod plugin;
mod responder;
mod schedule;
mod summary;
mod volatile_state;

use serenity::{all::GatewayIntents, Client};
use std::sync::Arc;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A `.env` file is optional; the token may come from the real environment or the config file
    dotenvy::dotenv().ok();

    let cfg = crate::config::Config::load().await?;
    let token = cfg.general.discord_token.clone();
    let vstate = Arc::new(RwLock::new(crate::volatile_state::VolatileState::new()));
    let handler = handler::Handler::new(cfg, Arc::clone(&vstate));

    // Things we want discord to tell us about.
    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log_internal!("Shutting down");
            vstate.write().await.shutdown();
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await.map_err(Into::into)
}
