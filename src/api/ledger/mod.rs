pub mod client;
pub mod history;
pub mod models;

pub use client::LedgerClient;
pub use history::pretty_print_transaction_history;
pub use models::{ApiError, CoinTransfer, Transaction, Wallet, WalletRef};
