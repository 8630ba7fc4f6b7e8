use crate::{event::*, log_internal, plugin::*};
use anyhow::Result;

/// Discord sends empty content when the bot lacks the message content intent.  There is nothing
/// to reply to.
pub struct WithheldContent;

#[serenity::async_trait]
impl Plugin for WithheldContent {
    fn name(&self) -> &'static str {
        "withheld_content"
    }

    async fn handle(&self, _ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        if !msg.content.is_empty() {
            return Ok(EventHandled::No);
        }

        log_internal!("(Message was empty because intents were not enabled properly)");
        Ok(EventHandled::Yes)
    }
}
