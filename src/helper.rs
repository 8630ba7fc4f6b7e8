//! Miscellaneous convenience methods

use crate::context::Context;
use serenity::all::{ChannelType, Guild, GuildChannel, Permissions};

pub trait MessageHelper {
    fn is_from_me(&self, ctx: &Context) -> bool;
}

impl MessageHelper for serenity::all::Message {
    fn is_from_me(&self, ctx: &Context) -> bool {
        self.author.id == ctx.cache.current_user().id
    }
}

pub trait GuildHelper {
    /// First text channel, in the order Discord displays them, where the bot may post
    fn first_postable_text_channel(&self, ctx: &Context) -> Option<GuildChannel>;
}

impl GuildHelper for Guild {
    fn first_postable_text_channel(&self, ctx: &Context) -> Option<GuildChannel> {
        let my_id = ctx.cache.current_user().id;
        let me = self.members.get(&my_id)?;

        let mut text_channels: Vec<&GuildChannel> = self
            .channels
            .values()
            .filter(|channel| channel.kind == ChannelType::Text)
            .collect();
        text_channels.sort_by_key(|channel| (channel.position, channel.id));

        text_channels
            .into_iter()
            .find(|channel| {
                self.user_permissions_in(channel, me)
                    .contains(Permissions::SEND_MESSAGES)
            })
            .cloned()
    }
}
