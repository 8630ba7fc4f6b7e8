use crate::{event::*, helper::*, log_internal, logging::*, plugin::*};
use anyhow::Result;

/// Initializes state when the connection to Discord is ready.
pub struct Ready;

#[serenity::async_trait]
impl Plugin for Ready {
    fn name(&self) -> &'static str {
        "ready"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        match event {
            Event::Ready(_) => {
                log_internal!("{} is now running!", ctx.cache.current_user().color());
            }
            Event::CacheReady(guilds) => {
                // A `!setchannel` from before a reconnect wins over the default
                let mut vstate = ctx.vstate.write().await;
                if vstate.target_channel.is_some() {
                    return Ok(EventHandled::No);
                }

                let default_channel = guilds.iter().find_map(|guild_id| {
                    ctx.cache
                        .guild(*guild_id)
                        .and_then(|guild| guild.first_postable_text_channel(ctx))
                });

                match default_channel {
                    Some(channel) => {
                        log_internal!(
                            "Default channel set to: {} (ID: {})",
                            channel.color(),
                            channel.id
                        );
                        vstate.target_channel = Some(channel.id);
                    }
                    None => log_internal!(
                        "No channel to post in yet; waiting for `!setchannel <channel_id>`"
                    ),
                }
            }
            Event::Message(_) => {}
        }

        // Other plugins also initialize on these events
        Ok(EventHandled::No)
    }
}
