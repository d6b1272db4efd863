use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use tracing::{error, info};

use super::models::{ApiError, Wallet};
use crate::config::{ApiConfig, ConfigError};

/// Client for the remote wallet ledger service.
///
/// Every operation is a single authenticated round trip with no retries. The
/// idle pool is kept empty so no connection is reused across calls; each call
/// opens and closes its own.
#[derive(Clone)]
pub struct LedgerClient {
    http_client: HttpClient,
    base_url: String,
    username: String,
    password: String,
}

impl LedgerClient {
    /// Build a client from the resolved configuration. Fails only when the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let http_client = HttpClient::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: format!("http://{}:{}", config.host, config.port),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// GET /wallets/{discord_id}
    ///
    /// Looks up the wallet for the given member identity. A `"Not found."`
    /// detail in the body is the valid no-wallet result, not an error.
    pub async fn get_wallet(&self, discord_id: &str) -> Result<Option<Wallet>, ApiError> {
        info!("Getting wallet for {}", discord_id);
        let url = format!(
            "{}/wallets/{}",
            self.base_url,
            urlencoding::encode(discord_id)
        );

        let (status, body) = self.execute(self.http_client.get(&url)).await?;
        wallet_lookup_outcome(status, &body)
    }

    /// POST /wallets/
    ///
    /// Registers a new wallet for the given member identity.
    pub async fn make_wallet(&self, discord_id: &str) -> Result<Wallet, ApiError> {
        info!("Making new wallet for {}", discord_id);
        let url = format!("{}/wallets/", self.base_url);
        let request = self
            .http_client
            .post(&url)
            .form(&[("discord_id", discord_id)]);

        let (status, body) = self.execute(request).await?;
        wallet_created_outcome(status, &body)
    }

    /// DELETE /wallets/{discord_id}
    ///
    /// Deletes the given member's wallet. Anything but a 204 is a failure.
    pub async fn delete_wallet(&self, discord_id: &str) -> Result<(), ApiError> {
        info!("Deleting wallet for {}", discord_id);
        let url = format!(
            "{}/wallets/{}",
            self.base_url,
            urlencoding::encode(discord_id)
        );

        let (status, _body) = self.execute(self.http_client.delete(&url)).await?;
        let outcome = wallet_deleted_outcome(status, discord_id);
        if let Err(e) = &outcome {
            error!("{}", e);
        }
        outcome
    }

    /// POST /transactions/
    ///
    /// Sends bcoin from one member to another if possible.
    pub async fn send_bcoin(
        &self,
        source: &str,
        destination: &str,
        amount: Decimal,
    ) -> Result<(), ApiError> {
        info!("Sending B{} from {} to {}", amount, source, destination);
        let url = format!("{}/transactions/", self.base_url);
        let amount_value = amount.to_string();
        let request = self.http_client.post(&url).form(&[
            ("source", source),
            ("destination", destination),
            ("amount", amount_value.as_str()),
        ]);

        let (status, body) = self.execute(request).await?;
        let outcome = transfer_outcome(status, &body);
        if let Err(e) = &outcome {
            error!("{}", e);
        }
        outcome
    }

    /// Attach Basic auth, perform the round trip, and read the body; any
    /// transport failure becomes an [`ApiError::Request`].
    async fn execute(&self, request: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let response = request
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| ApiError::Request(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(format!("Failed to read response body: {}", e)))?;

        Ok((status, body))
    }
}

/// Decide the result of a wallet lookup from the response status and body.
///
/// The service reports a missing wallet inside the body rather than by
/// status code alone, so the detail check comes first.
fn wallet_lookup_outcome(status: StatusCode, body: &str) -> Result<Option<Wallet>, ApiError> {
    if detail_field(body).as_deref() == Some("Not found.") {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(rejection(status, body));
    }
    parse_wallet(body).map(Some)
}

fn wallet_created_outcome(status: StatusCode, body: &str) -> Result<Wallet, ApiError> {
    if !status.is_success() {
        return Err(rejection(status, body));
    }
    parse_wallet(body)
}

fn wallet_deleted_outcome(status: StatusCode, discord_id: &str) -> Result<(), ApiError> {
    if status == StatusCode::NO_CONTENT {
        Ok(())
    } else {
        Err(ApiError::Rejected(format!(
            "Failed to delete wallet for {}",
            discord_id
        )))
    }
}

/// Map a transfer response to its outcome. 404 and 409 have fixed meanings
/// in the ledger's contract; anything else non-201 surfaces the server's
/// `detail` when it sent one.
fn transfer_outcome(status: StatusCode, body: &str) -> Result<(), ApiError> {
    match status.as_u16() {
        201 => Ok(()),
        404 => Err(ApiError::MissingWallet),
        409 => Err(ApiError::InsufficientFunds),
        code => Err(match detail_field(body) {
            Some(detail) => ApiError::Rejected(detail),
            None => ApiError::Rejected(format!(
                "You not sendin shit today, something back here is busted: {} {}",
                code, body
            )),
        }),
    }
}

fn parse_wallet(body: &str) -> Result<Wallet, ApiError> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::Deserialization(format!("Failed to parse wallet response: {}", e)))
}

/// The `detail` string the service attaches to error bodies, when present.
fn detail_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

fn rejection(status: StatusCode, body: &str) -> ApiError {
    match detail_field(body) {
        Some(detail) => ApiError::Rejected(detail),
        None => ApiError::Rejected(format!(
            "Ledger service returned {}: {}",
            status.as_u16(),
            body
        )),
    }
}
