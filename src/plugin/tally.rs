use crate::{
    command::parse_tally_submission,
    event::*,
    log_internal,
    logging::*,
    plugin::*,
    summary::{Board, ChannelBoard},
    volatile_state::VolatileState,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use serenity::all::{ChannelId, UserId};

/// Adds numbers posted in the target channel to the author's daily sum and refreshes the summary.
pub struct Tally;

#[serenity::async_trait]
impl Plugin for Tally {
    fn name(&self) -> &'static str {
        "tally"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        // Numbers elsewhere must not queue behind a summary edit in progress
        if submission(&*ctx.vstate.read().await, msg.channel_id, &msg.content).is_none() {
            return Ok(EventHandled::No);
        }

        // Held until the summary edit lands, so edits apply in submission order
        let mut vstate = ctx.vstate.write().await;
        // The channel may have changed while waiting for the lock
        let Some(value) = submission(&vstate, msg.channel_id, &msg.content) else {
            return Ok(EventHandled::No);
        };

        let board = ChannelBoard::resolve(ctx.http, msg.channel_id).await;
        let total = record(
            &mut vstate,
            board.as_ref().map(|b| b as &dyn Board),
            msg.author.id,
            value,
            Local::now().date_naive(),
        )
        .await?;
        drop(vstate);
        log_internal!("{} added {}, total {}", msg.author.color(), value, total);

        msg.delete(ctx.cache_http).await?;
        Ok(EventHandled::Yes)
    }
}

/// The submitted number, if `content` is one and was posted in the target channel
fn submission(vstate: &VolatileState, channel_id: ChannelId, content: &str) -> Option<i64> {
    if vstate.target_channel != Some(channel_id) {
        return None;
    }
    parse_tally_submission(content)
}

/// Add to the user's sum and refresh the summary if its channel could be resolved.  Returns the
/// new sum.
async fn record(
    vstate: &mut VolatileState,
    board: Option<&dyn Board>,
    user_id: UserId,
    value: i64,
    today: NaiveDate,
) -> Result<i64> {
    let total = vstate.summary.tally.add(user_id, value);
    if let Some(board) = board {
        vstate.summary.refresh(board, today).await?;
    }
    Ok(total)
}
