//! The daily tally and the summary message that displays it

use crate::log_error;
use anyhow::Result;
use chrono::NaiveDate;
use serenity::all::{Channel, ChannelId, CreateMessage, EditMessage, Http, MessageId, UserId};
use std::sync::Arc;

const PLACEHOLDER: &str = "Good morning! Here's your daily message.";

/// Running per-user sums, in order of each user's first submission of the day.
#[derive(Default)]
pub struct Tally(Vec<(UserId, i64)>);

impl Tally {
    /// Add `value` to the user's sum and return the new sum.
    pub fn add(&mut self, user_id: UserId, value: i64) -> i64 {
        match self.0.iter_mut().find(|(id, _)| *id == user_id) {
            Some((_, sum)) => {
                *sum = sum.saturating_add(value);
                *sum
            }
            None => {
                self.0.push((user_id, value));
                value
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(UserId, i64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }
}

/// Where summary messages get posted.  Implemented over a Discord channel, and by a fake in
/// tests.
#[serenity::async_trait]
pub trait Board: Send + Sync {
    async fn post(&self, content: &str) -> Result<MessageId>;
    async fn edit(&self, message_id: MessageId, content: &str) -> Result<()>;
}

/// A guild text channel which has been confirmed to exist
pub struct ChannelBoard {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelBoard {
    /// Look the channel up.  Failure is logged and yields `None`; callers skip their update.
    pub async fn resolve(http: &Arc<Http>, channel_id: ChannelId) -> Option<Self> {
        match channel_id.to_channel(http).await {
            Ok(Channel::Guild(_)) => Some(Self {
                http: Arc::clone(http),
                channel_id,
            }),
            Ok(_) => {
                log_error!("Channel {} is not a guild channel", channel_id);
                None
            }
            Err(e) => {
                log_error!("Channel {} was not found: {}", channel_id, e);
                None
            }
        }
    }
}

#[serenity::async_trait]
impl Board for ChannelBoard {
    async fn post(&self, content: &str) -> Result<MessageId> {
        let msg = self
            .channel_id
            .send_message(&self.http, CreateMessage::new().content(content))
            .await?;
        Ok(msg.id)
    }

    async fn edit(&self, message_id: MessageId, content: &str) -> Result<()> {
        self.channel_id
            .edit_message(&self.http, message_id, EditMessage::new().content(content))
            .await?;
        Ok(())
    }
}

/// The current day's tally and the message showing it
#[derive(Default)]
pub struct DailySummary {
    pub tally: Tally,
    pub message_id: Option<MessageId>,
}

impl DailySummary {
    /// Bring the summary message up to date with the tally, posting it first if today has none.
    pub async fn refresh<B: Board + ?Sized>(&mut self, board: &B, today: NaiveDate) -> Result<()> {
        let message_id = match self.message_id {
            Some(id) => id,
            None => {
                let id = board.post(PLACEHOLDER).await?;
                self.message_id = Some(id);
                id
            }
        };

        board.edit(message_id, &summary_body(&self.tally, today)).await
    }

    /// Start a new day: post a fresh header, make it the active message, forget the tally.
    pub async fn roll_over<B: Board + ?Sized>(&mut self, board: &B, date: NaiveDate) -> Result<()> {
        let id = board.post(&rollover_header(date)).await?;
        self.message_id = Some(id);
        self.tally.clear();
        Ok(())
    }
}

/// Full summary: dated header then one `<@user>: sum` line per user.
pub fn summary_body(tally: &Tally, date: NaiveDate) -> String {
    let mut body = format!(
        "------------------ {} --------------------\n",
        date.format("%m/%d/%Y")
    );
    for (user_id, sum) in tally.iter() {
        body.push_str(&format!("<@{}>: {}\n", user_id, sum));
    }
    body
}

pub fn rollover_header(date: NaiveDate) -> String {
    format!("------ {} ------", date.format("%m/%d/%Y"))
}
