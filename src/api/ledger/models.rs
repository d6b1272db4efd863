use chrono::{DateTime, FixedOffset};
use chrono_tz::US;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};

/// A member's wallet as returned by the ledger service.
///
/// `transaction_history` is kept as raw entries in server order; the history
/// renderer parses them into [`Transaction`]s when a report is requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(deserialize_with = "integer_like")]
    pub id: i64,
    pub discord_id: String,
    pub current_value: Decimal,
    #[serde(default)]
    pub transaction_history: Vec<serde_json::Value>,
}

/// The `{id, discord_id}` projection of a wallet embedded in a transfer leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletRef {
    #[serde(deserialize_with = "integer_like")]
    pub id: i64,
    pub discord_id: String,
}

/// One leg of a transaction: the wallet it touched, the amount moved, and
/// when it happened. Immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinTransfer {
    pub wallet: WalletRef,
    #[serde(deserialize_with = "integer_like")]
    pub transaction_id: i64,
    pub amount: Decimal,
    #[serde(deserialize_with = "offset_datetime")]
    pub date: DateTime<FixedOffset>,
}

impl CoinTransfer {
    /// Day and time strings localized to US Eastern, the bot's fixed display
    /// timezone, as `MM/DD/YYYY` and 24-hour `HH:MM:SS`.
    pub fn date_components(&self) -> (String, String) {
        let eastern = self.date.with_timezone(&US::Eastern);
        (
            eastern.format("%m/%d/%Y").to_string(),
            eastern.format("%H:%M:%S").to_string(),
        )
    }
}

/// A two-legged ledger transaction. A missing or null source leg means the
/// funds were minted rather than sent from another wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "integer_like")]
    pub transaction_id: i64,
    pub source_transfer: Option<CoinTransfer>,
    pub destination_transfer: CoinTransfer,
}

/// Errors surfaced by the ledger service or the transport underneath it.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Transfer rejected with 404: one or both parties have no wallet.
    MissingWallet,
    /// Transfer rejected with 409: the source wallet can't cover the amount.
    InsufficientFunds,
    /// Any other rejection; carries the server's `detail` when it sent one.
    Rejected(String),
    /// Transport-level failure reaching the service.
    Request(String),
    /// Response body did not match the expected shape.
    Deserialization(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingWallet => {
                write!(f, "Bruh you can't send bcoin unless both of you got wallets")
            }
            ApiError::InsufficientFunds => write!(f, "You don't got the funds homie"),
            ApiError::Rejected(msg) => write!(f, "{}", msg),
            ApiError::Request(msg) => write!(f, "Request Error: {}", msg),
            ApiError::Deserialization(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

/// Identifiers arrive as JSON numbers or numeric strings depending on the
/// endpoint; accept both.
fn integer_like<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntegerLike {
        Number(i64),
        Text(String),
    }

    match IntegerLike::deserialize(deserializer)? {
        IntegerLike::Number(n) => Ok(n),
        IntegerLike::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer-like id, got {:?}", s))),
    }
}

/// Timestamps keep their original offset; the service emits ISO-8601 but
/// RFC-2822 is accepted as well.
fn offset_datetime<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .or_else(|_| DateTime::parse_from_rfc2822(&raw))
        .map_err(|e| de::Error::custom(format!("unparseable date {:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wallet_json() -> serde_json::Value {
        json!({
            "id": 7,
            "discord_id": "alice#0001",
            "current_value": "120.00",
            "transaction_history": []
        })
    }

    fn transfer_json(date: &str) -> serde_json::Value {
        json!({
            "wallet": {"id": 1, "discord_id": "alice#0001"},
            "transaction_id": 3,
            "amount": "12.50",
            "date": date
        })
    }

    #[test]
    fn test_wallet_roundtrip_preserves_fields() {
        let wallet: Wallet = serde_json::from_value(wallet_json()).unwrap();
        assert_eq!(wallet.id, 7);
        assert_eq!(wallet.discord_id, "alice#0001");
        assert_eq!(wallet.current_value, "120.00".parse().unwrap());

        let reserialized = serde_json::to_value(&wallet).unwrap();
        assert_eq!(reserialized["id"], json!(7));
        assert_eq!(reserialized["discord_id"], json!("alice#0001"));
        assert_eq!(reserialized["current_value"], json!("120.00"));
    }

    #[test]
    fn test_wallet_id_accepts_numeric_string() {
        let mut raw = wallet_json();
        raw["id"] = json!("7");
        let wallet: Wallet = serde_json::from_value(raw).unwrap();
        assert_eq!(wallet.id, 7);
    }

    #[test]
    fn test_wallet_id_rejects_non_numeric() {
        let mut raw = wallet_json();
        raw["id"] = json!("seven");
        assert!(serde_json::from_value::<Wallet>(raw).is_err());
    }

    #[test]
    fn test_wallet_requires_discord_id() {
        let raw = json!({"id": 7, "current_value": "0.00"});
        assert!(serde_json::from_value::<Wallet>(raw).is_err());
    }

    #[test]
    fn test_wallet_history_defaults_to_empty() {
        let raw = json!({"id": 7, "discord_id": "alice#0001", "current_value": "0.00"});
        let wallet: Wallet = serde_json::from_value(raw).unwrap();
        assert!(wallet.transaction_history.is_empty());
    }

    #[test]
    fn test_transfer_keeps_source_offset() {
        let transfer: CoinTransfer =
            serde_json::from_value(transfer_json("2021-07-04T12:30:00-04:00")).unwrap();
        assert_eq!(transfer.date.offset().local_minus_utc(), -4 * 3600);
        assert_eq!(transfer.amount, "12.50".parse().unwrap());
    }

    #[test]
    fn test_transfer_accepts_rfc2822_date() {
        let transfer: CoinTransfer =
            serde_json::from_value(transfer_json("Sun, 04 Jul 2021 12:30:00 -0400")).unwrap();
        assert_eq!(transfer.wallet.discord_id, "alice#0001");
    }

    #[test]
    fn test_transfer_rejects_unparseable_date() {
        assert!(serde_json::from_value::<CoinTransfer>(transfer_json("yesterday-ish")).is_err());
    }

    #[test]
    fn test_date_components_localize_to_eastern() {
        // 16:30 UTC in July is 12:30 EDT
        let transfer: CoinTransfer =
            serde_json::from_value(transfer_json("2021-07-04T16:30:00+00:00")).unwrap();
        let (day, time) = transfer.date_components();
        assert_eq!(day, "07/04/2021");
        assert_eq!(time, "12:30:00");
    }

    #[test]
    fn test_date_components_follow_winter_offset() {
        // 16:30 UTC in January is 11:30 EST
        let transfer: CoinTransfer =
            serde_json::from_value(transfer_json("2021-01-15T16:30:00+00:00")).unwrap();
        let (day, time) = transfer.date_components();
        assert_eq!(day, "01/15/2021");
        assert_eq!(time, "11:30:00");
    }

    #[test]
    fn test_transaction_null_source_is_a_mint() {
        let raw = json!({
            "transaction_id": 3,
            "source_transfer": null,
            "destination_transfer": transfer_json("2021-07-04T12:30:00-04:00"),
        });
        let transaction: Transaction = serde_json::from_value(raw).unwrap();
        assert!(transaction.source_transfer.is_none());
        assert_eq!(transaction.destination_transfer.transaction_id, 3);
    }

    #[test]
    fn test_transaction_requires_destination_transfer() {
        let missing = json!({"transaction_id": 3, "source_transfer": null});
        assert!(serde_json::from_value::<Transaction>(missing).is_err());

        let null_destination = json!({
            "transaction_id": 3,
            "source_transfer": null,
            "destination_transfer": null,
        });
        assert!(serde_json::from_value::<Transaction>(null_destination).is_err());
    }
}
