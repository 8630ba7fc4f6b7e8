use crate::{config::Config, context::Context, event::Event, volatile_state::VolatileState};
use serenity::all::{GuildId, Message, Ready};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Discord event handler
pub struct Handler {
    cfg: RwLock<Config>,
    vstate: Arc<RwLock<VolatileState>>,
}

impl<'a> Handler {
    pub fn new(cfg: Config, vstate: Arc<RwLock<VolatileState>>) -> Self {
        Self {
            cfg: RwLock::new(cfg),
            vstate,
        }
    }

    fn ctx(&'a self, discord_ctx: &'a serenity::all::Context) -> Context<'a> {
        Context {
            cfg: &self.cfg,
            vstate: &self.vstate,
            cache: &discord_ctx.cache,
            http: &discord_ctx.http,
            cache_http: discord_ctx,
        }
    }
}

#[serenity::async_trait]
impl serenity::all::EventHandler for Handler {
    async fn ready(&self, discord_ctx: serenity::all::Context, ready: Ready) {
        Event::Ready(ready).handle(self.ctx(&discord_ctx)).await;
    }

    async fn cache_ready(&self, discord_ctx: serenity::all::Context, guilds: Vec<GuildId>) {
        Event::CacheReady(guilds)
            .handle(self.ctx(&discord_ctx))
            .await;
    }

    async fn message(&self, discord_ctx: serenity::all::Context, msg: Message) {
        Event::Message(msg).handle(self.ctx(&discord_ctx)).await;
    }
}
