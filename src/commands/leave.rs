use serenity::model::channel::Message;
use serenity::model::mention::Mentionable;
use serenity::prelude::Context;
use tracing::info;

/// Deletes the author's wallet, balance and all.
pub async fn execute(ctx: &Context, msg: &Message, _args: &[&str]) -> Result<(), String> {
    let member = msg.author.tag();
    info!("{} wants out of the crypto economy", member);

    // Get the ledger client from context
    let client = {
        let data = ctx.data.read().await;
        data.get::<crate::LedgerState>()
            .ok_or("Ledger client not initialized".to_string())?
            .clone()
    };

    match client.delete_wallet(&member).await {
        Ok(()) => {
            msg.channel_id
                .say(
                    ctx,
                    format!(
                        "Aight {}, your wallet is gone for good",
                        msg.author.mention()
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
