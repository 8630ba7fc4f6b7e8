//! Parsing of the plain-text conventions users type into chat

use serenity::all::ChannelId;

const SET_CHANNEL_CMD: &str = "!setchannel";

/// Where a reply to a chat message should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTarget {
    /// The channel the message came from
    Channel,
    /// A direct message to the author
    Direct,
}

/// A leading `?` asks for a private reply.  The marker is removed from the returned text.
pub fn split_private_marker(content: &str) -> (ReplyTarget, &str) {
    match content.strip_prefix('?') {
        Some(rest) => (ReplyTarget::Direct, rest),
        None => (ReplyTarget::Channel, content),
    }
}

/// A message counts towards the tally if it is an integer with at most one leading `-`.
pub fn parse_tally_submission(content: &str) -> Option<i64> {
    let digits = content.strip_prefix('-').unwrap_or(content);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Too many digits for an i64 is not a submission
    content.parse().ok()
}

/// `!setchannel` with the outcome of parsing its argument
#[derive(Debug, PartialEq, Eq)]
pub enum SetChannel {
    Valid(ChannelId),
    Invalid,
}

/// Recognizes `!setchannel <channel_id>`, case-insensitively.  Returns `None` if the text is
/// not that command at all.
pub fn parse_set_channel(text: &str) -> Option<SetChannel> {
    let head = text.get(..SET_CHANNEL_CMD.len())?;
    if !head.eq_ignore_ascii_case(SET_CHANNEL_CMD) {
        return None;
    }

    let channel_id = text
        .split_whitespace()
        .nth(1)
        .and_then(|token| token.parse::<u64>().ok())
        .filter(|id| *id != 0)
        .map(ChannelId::new);

    Some(match channel_id {
        Some(channel_id) => SetChannel::Valid(channel_id),
        None => SetChannel::Invalid,
    })
}
