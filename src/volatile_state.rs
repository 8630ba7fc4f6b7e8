use crate::summary::DailySummary;
use serenity::all::ChannelId;
use tokio_util::sync::CancellationToken;

/// State which is lost across sessions
#[derive(Default)]
pub struct VolatileState {
    /// Channel where tallies are accepted and summaries are posted
    pub target_channel: Option<ChannelId>,
    pub summary: DailySummary,
    /// Set once the daily flush task is running
    pub daily_flush: Option<CancellationToken>,
}

impl VolatileState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop background work.
    pub fn shutdown(&mut self) {
        if let Some(cancel) = self.daily_flush.take() {
            cancel.cancel();
        }
    }
}
