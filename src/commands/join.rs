use serenity::model::channel::Message;
use serenity::model::mention::Mentionable;
use serenity::prelude::Context;
use tracing::info;

/// Registers the author with a new wallet if they don't have one yet.
pub async fn execute(ctx: &Context, msg: &Message, _args: &[&str]) -> Result<(), String> {
    let member = msg.author.tag();
    info!("{} wants to join the crypto economy", member);

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
            info!("{} is already signed up", member);
            msg.channel_id
                .say(
                    ctx,
                    format!(
                        "{}: Bruh you already signed up, you got {}{} rn",
                        msg.author.mention(),
                        currency_emoji,
                        wallet.current_value
                    ),
                )
                .await
                .map_err(|e| e.to_string())?;
        }
        None => {
            info!("Making a wallet for {}", member);
            let wallet = client
                .make_wallet(&member)
                .await
                .map_err(|e| e.to_string())?;
            msg.channel_id
                .say(
                    ctx,
                    format!(
                        "Aight welcome to the party, {}. Here's {}{} to get you started",
                        msg.author.mention(),
                        currency_emoji,
                        wallet.current_value
                    ),
                )
                .await
                .map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}
