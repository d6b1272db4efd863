use rust_decimal::Decimal;
use serenity::model::channel::Message;
use serenity::model::mention::Mentionable;
use serenity::prelude::Context;

/// Sends bcoin from the author to the mentioned member.
pub async fn execute(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), String> {
    let recipient = msg.mentions.first();
    let amount = args.get(1).and_then(|raw| raw.parse::<Decimal>().ok());

    let (recipient, amount) = match (recipient, amount) {
        (Some(recipient), Some(amount)) => (recipient, amount),
        _ => {
            msg.channel_id
                .say(ctx, "Usage: `!send @member <amount>`")
                .await
                .map_err(|e| e.to_string())?;
            return Ok(());
        }
    };

    let member = msg.author.tag();
    let other_member = recipient.tag();

    // Get the ledger client and settings from context
    let (client, emoji_name) = {
        let data = ctx.data.read().await;
        let client = data
            .get::<crate::LedgerState>()
            .ok_or("Ledger client not initialized".to_string())?
            .clone();
        let emoji_name = data
            .get::<crate::BotSettings>()
            .ok_or("Bot settings not initialized".to_string())?
            .currency_emoji
            .clone();
        (client, emoji_name)
    };

    let currency_emoji = super::currency_emoji(ctx, msg, &emoji_name);

    // Make the transfer and see what the ledger says
    match client.send_bcoin(&member, &other_member, amount).await {
        Ok(()) => {
            msg.channel_id
                .say(
                    ctx,
                    format!(
                        "Ayo {}, {} sent you {}{}",
                        recipient.mention(),
                        msg.author.mention(),
                        currency_emoji,
                        amount
                    ),
                )
                .await
                .map_err(|e| e.to_string())?;
        }
        Err(e) => {
            msg.channel_id
                .say(ctx, format!("{} {}", msg.author.mention(), e))
                .await
                .map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}
