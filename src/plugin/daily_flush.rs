use crate::{
    event::*,
    log_error, log_internal,
    plugin::*,
    schedule::{DailySchedule, SystemClock},
    summary::{Board, ChannelBoard},
    volatile_state::VolatileState,
};
use anyhow::Result;
use chrono::NaiveDate;
use serenity::all::Http;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Starts the background task which rolls the daily summary over to a new day.
pub struct DailyFlush;

#[serenity::async_trait]
impl Plugin for DailyFlush {
    fn name(&self) -> &'static str {
        "daily_flush"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Ready(_) = event else {
            return Ok(EventHandled::No);
        };

        // Ready fires again on every reconnect; only ever run one task
        let mut vstate = ctx.vstate.write().await;
        if vstate.daily_flush.is_some() {
            return Ok(EventHandled::No);
        }

        let flush_time = ctx.cfg.read().await.daily_summary.flush_time()?;
        let cancel = CancellationToken::new();
        vstate.daily_flush = Some(cancel.clone());
        drop(vstate);

        let vstate = Arc::clone(ctx.vstate);
        let http = Arc::clone(ctx.http);
        tokio::spawn(async move {
            DailySchedule::new(flush_time)
                .run(&SystemClock, cancel, |run_at| {
                    let vstate = Arc::clone(&vstate);
                    let http = Arc::clone(&http);
                    async move {
                        if let Err(e) = flush(&vstate, &http, run_at.date()).await {
                            log_error!("Daily flush failed: {}", e);
                        }
                    }
                })
                .await;
            log_internal!("Daily flush task stopped");
        });

        log_internal!("Daily flush scheduled for {} every day", flush_time);
        Ok(EventHandled::No)
    }
}

/// Post a fresh dated header in the target channel and reset the tally.
async fn flush(vstate: &RwLock<VolatileState>, http: &Arc<Http>, date: NaiveDate) -> Result<()> {
    let mut vstate = vstate.write().await;
    let board = match vstate.target_channel {
        Some(channel_id) => ChannelBoard::resolve(http, channel_id).await,
        None => None,
    };
    roll_over(&mut vstate, board.as_ref().map(|b| b as &dyn Board), date).await
}

/// Start the summary for `date` on `board`.  Without a target channel nothing happens, and
/// without a board the tally is kept for the next attempt.
async fn roll_over(
    vstate: &mut VolatileState,
    board: Option<&dyn Board>,
    date: NaiveDate,
) -> Result<()> {
    if vstate.target_channel.is_none() {
        return Ok(());
    }
    let Some(board) = board else {
        log_internal!("Skipping daily flush for {}", date);
        return Ok(());
    };

    let users = vstate.summary.tally.len();
    vstate.summary.roll_over(board, date).await?;
    log_internal!("Started summary for {}, cleared {} user(s)", date, users);
    Ok(())
}
