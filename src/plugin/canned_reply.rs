use crate::{
    command::{split_private_marker, ReplyTarget},
    event::*,
    log_error,
    plugin::*,
    responder::get_response,
};
use anyhow::Result;
use serenity::all::CreateMessage;

/// Answers anything no other plugin wanted with a canned reply.
pub struct CannedReply;

#[serenity::async_trait]
impl Plugin for CannedReply {
    fn name(&self) -> &'static str {
        "canned_reply"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        let (target, text) = split_private_marker(&msg.content);
        let response = get_response(text);

        let delivery = match target {
            ReplyTarget::Direct => msg
                .author
                .direct_message(ctx.cache_http, CreateMessage::new().content(response))
                .await
                .map(|_| ()),
            ReplyTarget::Channel => msg.channel_id.say(ctx.http, response).await.map(|_| ()),
        };

        // Failing to deliver chit-chat is not worth surfacing to anyone
        if let Err(e) = delivery {
            log_error!("Could not deliver reply to {}: {}", msg.author.name, e);
        }

        Ok(EventHandled::Yes)
    }
}
