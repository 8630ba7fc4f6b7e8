//! The Serenity crate we're using for the Discord API is designed around callbacks to handle
//! events.  However, this does not mesh well with our plugin framework here.  To resolve this,
//! the handler translates the callbacks into a distinct Event enum.

use crate::{context::Context, log_error};
use serenity::all::{GuildId, Message, Ready};

/// A Discord event
pub enum Event {
    Ready(Ready),
    /// Every guild from the initial connection is now in the cache
    CacheReady(Vec<GuildId>),
    Message(Message),
}

impl Event {
    // When an event occurs, iterate over all the plugins to see if any can/should handle it.
    pub async fn handle(self, ctx: Context<'_>) {
        for plugin in crate::plugin::plugins() {
            match plugin.handle(&ctx, &self).await {
                Ok(EventHandled::Yes) => return,
                Ok(EventHandled::No) => continue,
                Err(err) => {
                    // A half-handled event must not fall through to later plugins
                    log_error!("Error in plugin {}: {}", plugin.name(), err);
                    return;
                }
            }
        }
    }
}

pub enum EventHandled {
    Yes,
    No,
}
