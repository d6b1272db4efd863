use super::models::{ApiError, Transaction, Wallet};

/// Render a wallet's transaction history as a Discord code block.
///
/// Entries are kept in the order the ledger returned them. Each line is
/// phrased from the wallet owner's point of view: transfers they received,
/// transfers they sent, and mints with no source wallet at all.
pub fn pretty_print_transaction_history(wallet: &Wallet) -> Result<String, ApiError> {
    let mut output = format!("{}'s Transaction History\n\n", wallet.discord_id);

    for entry in &wallet.transaction_history {
        let transaction: Transaction = serde_json::from_value(entry.clone()).map_err(|e| {
            ApiError::Deserialization(format!("Failed to parse transaction entry: {}", e))
        })?;

        let destination = &transaction.destination_transfer;
        let (day, time) = destination.date_components();
        let line = match &transaction.source_transfer {
            None => format!(
                "{} {} - You summoned B{} from the void\n",
                day, time, destination.amount
            ),
            Some(source) if source.wallet.discord_id != wallet.discord_id => format!(
                "{} {} - {} sent you B{}\n",
                day, time, source.wallet.discord_id, destination.amount
            ),
            Some(_) => format!(
                "{} {} - You sent {} B{}\n",
                day, time, destination.wallet.discord_id, destination.amount
            ),
        };
        output.push_str(&line);
    }

    Ok(format!("```{}```", output))
}
