use crate::{
    command::{parse_set_channel, split_private_marker, SetChannel as SetChannelArg},
    event::*,
    log_internal,
    logging::*,
    plugin::*,
    volatile_state::VolatileState,
};
use anyhow::Result;

const USAGE_ERROR: &str = "Invalid channel id use `!setchannel <channel_id>`.";

/// `!setchannel <channel_id>` picks the channel for tallies and summaries.
pub struct SetChannel;

#[serenity::async_trait]
impl Plugin for SetChannel {
    fn name(&self) -> &'static str {
        "set_channel"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        let Some(arg) = set_channel_command(&msg.content) else {
            return Ok(EventHandled::No);
        };

        let reply = apply_set_channel(&mut *ctx.vstate.write().await, &arg);
        if let SetChannelArg::Valid(channel_id) = arg {
            log_internal!(
                "{} changed the channel to {} (ID: {})",
                msg.author.color(),
                channel_id.color(ctx.http).await,
                channel_id
            );
        }

        // Always answered in the channel, even with the private marker
        msg.channel_id.say(ctx.http, reply).await?;
        Ok(EventHandled::Yes)
    }
}

/// The command in a message, with or without the private marker
fn set_channel_command(content: &str) -> Option<SetChannelArg> {
    let (_, text) = split_private_marker(content);
    parse_set_channel(text)
}

/// Update the target channel and produce the reply.  An invalid argument changes nothing.
fn apply_set_channel(vstate: &mut VolatileState, arg: &SetChannelArg) -> String {
    match arg {
        SetChannelArg::Valid(channel_id) => {
            vstate.target_channel = Some(*channel_id);
            format!("Channel changed to <#{}>", channel_id)
        }
        SetChannelArg::Invalid => USAGE_ERROR.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::ChannelId;

    fn state_with_channel(id: u64) -> VolatileState {
        VolatileState {
            target_channel: Some(ChannelId::new(id)),
            ..VolatileState::new()
        }
    }

    #[test]
    fn invalid_id_keeps_channel_and_explains_usage() {
        let mut vstate = state_with_channel(42);
        let arg = set_channel_command("!setchannel abc").unwrap();

        assert_eq!(apply_set_channel(&mut vstate, &arg), USAGE_ERROR);
        assert_eq!(vstate.target_channel, Some(ChannelId::new(42)));
    }

    #[test]
    fn missing_id_keeps_channel() {
        let mut vstate = VolatileState::new();
        let arg = set_channel_command("!setchannel").unwrap();

        assert_eq!(apply_set_channel(&mut vstate, &arg), USAGE_ERROR);
        assert_eq!(vstate.target_channel, None);
    }

    #[test]
    fn valid_id_sets_channel_and_mentions_it() {
        let mut vstate = state_with_channel(42);
        let arg = set_channel_command("!setchannel 123").unwrap();

        let reply = apply_set_channel(&mut vstate, &arg);
        assert!(reply.contains("<#123>"), "{reply}");
        assert_eq!(vstate.target_channel, Some(ChannelId::new(123)));
    }

    #[test]
    fn private_marker_still_runs_the_command() {
        let mut vstate = VolatileState::new();
        let arg = set_channel_command("?!setchannel 5").unwrap();

        apply_set_channel(&mut vstate, &arg);
        assert_eq!(vstate.target_channel, Some(ChannelId::new(5)));
    }

    #[test]
    fn other_text_is_not_the_command() {
        assert_eq!(set_channel_command("?hello"), None);
        assert_eq!(set_channel_command("5"), None);
    }
}
