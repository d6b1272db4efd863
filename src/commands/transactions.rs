use serenity::model::channel::Message;
use serenity::model::mention::Mentionable;
use serenity::prelude::Context;
use tracing::info;

use crate::api::ledger::pretty_print_transaction_history;

/// Posts the author's transaction history.
pub async fn execute(ctx: &Context, msg: &Message, _args: &[&str]) -> Result<(), String> {
    let member = msg.author.tag();
    info!("{} is checkin their receipts", member);

    // Get the ledger client from context
    let client = {
        let data = ctx.data.read().await;
        data.get::<crate::LedgerState>()
            .ok_or("Ledger client not initialized".to_string())?
            .clone()
    };

    let wallet = client.get_wallet(&member).await.map_err(|e| e.to_string())?;

    match wallet {
        Some(wallet) => {
            let message = pretty_print_transaction_history(&wallet).map_err(|e| e.to_string())?;
            msg.channel_id
                .say(ctx, message)
                .await
                .map_err(|e| e.to_string())?;
        }
        None => {
            let reply = format!(
                "{}, you not even signed up yet ya big dummy",
                msg.author.mention()
            );
            info!("{}", reply);
            msg.channel_id
                .say(ctx, reply)
                .await
                .map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}
