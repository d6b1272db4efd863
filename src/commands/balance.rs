use serenity::model::channel::Message;
use serenity::model::mention::Mentionable;
use serenity::prelude::Context;
use tracing::info;

/// Checks the current balance in the author's wallet.
pub async fn execute(ctx: &Context, msg: &Message, _args: &[&str]) -> Result<(), String> {
    let member = msg.author.tag();
    info!("{} wants to check their wallet balance", member);

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

    let wallet = client.get_wallet(&member).await.map_err(|e| e.to_string())?;
    let currency_emoji = super::currency_emoji(ctx, msg, &emoji_name);

    match wallet {
        Some(wallet) => {
            info!("{} has {} in their wallet", member, wallet.current_value);
            msg.channel_id
                .say(
                    ctx,
                    format!(
                        "{}, you got {}{} in your wallet",
                        msg.author.mention(),
                        currency_emoji,
                        wallet.current_value
                    ),
                )
                .await
                .map_err(|e| e.to_string())?;
        }
        None => {
            info!("{} doesn't have a wallet yet", member);
            msg.channel_id
                .say(
                    ctx,
                    format!(
                        "{}, you ain't even signed up yet homie chill",
                        msg.author.mention()
                    ),
                )
                .await
                .map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}
