pub mod balance;
pub mod join;
pub mod leave;
pub mod send;
pub mod transactions;

use serenity::model::channel::Message;
use serenity::prelude::Context;
use tracing::error;

pub async fn handle_message(ctx: &Context, msg: &Message) {
    if msg.author.bot {
        return;
    }

    // Only commands from the configured channels are processed
    let permitted = {
        let data = ctx.data.read().await;
        match data.get::<crate::BotSettings>() {
            Some(settings) => settings.is_permitted(&msg.channel_id.to_string()),
            None => false,
        }
    };
    if !permitted {
        return;
    }

    let parts: Vec<&str> = msg.content.split_whitespace().collect();
    if parts.is_empty() {
        return;
    }

    let command = parts[0];
    let args = &parts[1..];

    let result = match command {
        "!join" => join::execute(ctx, msg, args).await,
        "!balance" => balance::execute(ctx, msg, args).await,
        "!transactions" => transactions::execute(ctx, msg, args).await,
        "!send" => send::execute(ctx, msg, args).await,
        "!leave" => leave::execute(ctx, msg, args).await,
        _ => return,
    };

    // API rejections are already answered inside the command; whatever
    // bubbles up here gets logged without a chat reply.
    if let Err(e) = result {
        error!("Error executing command {}: {}", command, e);
    }
}

/// The guild's custom emoji with the configured name, rendered in message
/// form, or the plain `B` the currency is named after.
pub fn currency_emoji(ctx: &Context, msg: &Message, emoji_name: &str) -> String {
    let Some(guild_id) = msg.guild_id else {
        return "B".to_string();
    };

    guild_id
        .to_guild_cached(&ctx.cache)
        .and_then(|guild| {
            guild
                .emojis
                .values()
                .find(|emoji| emoji.name == emoji_name)
                .map(|emoji| emoji.to_string())
        })
        .unwrap_or_else(|| "B".to_string())
}
