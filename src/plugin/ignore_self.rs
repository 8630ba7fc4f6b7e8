use crate::{event::*, helper::*, plugin::*};
use anyhow::Result;

/// Stops the bot from reacting to its own messages, including the summaries it posts.
pub struct IgnoreSelf;

#[serenity::async_trait]
impl Plugin for IgnoreSelf {
    fn name(&self) -> &'static str {
        "ignore_self"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        if msg.is_from_me(ctx) {
            Ok(EventHandled::Yes)
        } else {
            Ok(EventHandled::No)
        }
    }
}
