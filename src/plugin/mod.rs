use crate::{context::Context, event::*};
use anyhow::Result;

mod canned_reply;
mod daily_flush;
mod debug;
mod ignore_self;
mod ready;
mod set_channel;
mod tally;
mod withheld_content;

#[serenity::async_trait]
pub trait Plugin: Sync + Send {
    /// Plugin name.  Used for debug
    fn name(&self) -> &'static str;
    /// Potentially handle event.  Returns:
    /// - Ok(EventHandled::Yes) if the event has been handled and no other plugin should attempt to
    /// handle it
    /// - Ok(EventHandled::No) if another plugin should attempt to handle the event
    /// - Err if an error occurred
    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled>;
}

/// Ordered list of available plugins
pub fn plugins() -> Vec<Box<dyn Plugin>> {
    use crate::plugin::*;

    vec![
        // Core bot operations
        Box::new(debug::Debug),
        Box::new(ignore_self::IgnoreSelf),
        Box::new(ready::Ready),
        Box::new(daily_flush::DailyFlush),
        // Numbers posted in the target channel.  Must come before anything that replies to text.
        Box::new(tally::Tally),
        Box::new(withheld_content::WithheldContent),
        Box::new(set_channel::SetChannel),
        // Canned replies, used if no other plugin handles the event.
        // Keep last.
        Box::new(canned_reply::CannedReply),
    ]
}
