use thiserror::Error;

/// Fatal configuration problems, raised at startup before the gateway
/// connects or the ledger client exists.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    MissingVar(&'static str),
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Connection details for the ledger service, resolved once from the
/// environment and handed to the client at construction.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: require_var("API_HOST")?,
            port: require_var("API_PORT")?,
            username: require_var("API_USERNAME")?,
            password: require_var("API_PASSWORD")?,
        })
    }
}

/// Bot-side settings: which channels answer commands and what the currency
/// symbol is called in the guild's emoji list.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub permitted_channels: Vec<String>,
    pub currency_emoji: String,
}

impl BotConfig {
    pub fn from_env() -> Self {
        let permitted_channels =
            parse_channel_list(&std::env::var("PERMITTED_CHANNELS").unwrap_or_default());
        let currency_emoji = std::env::var("CURRENCY_EMOJI")
            .unwrap_or_else(|_| "B".to_string())
            .trim()
            .to_string();

        Self {
            permitted_channels,
            currency_emoji,
        }
    }

    /// Commands are only served from the configured channels. An empty
    /// allow-list permits nothing.
    pub fn is_permitted(&self, channel_id: &str) -> bool {
        self.permitted_channels.iter().any(|c| c == channel_id)
    }
}

fn parse_channel_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_list() {
        let channels = parse_channel_list("123, 456 ,789");
        assert_eq!(channels, vec!["123", "456", "789"]);
    }

    #[test]
    fn test_empty_channel_list_permits_nothing() {
        let config = BotConfig {
            permitted_channels: parse_channel_list(""),
            currency_emoji: "B".to_string(),
        };
        assert!(!config.is_permitted("123"));
    }

    #[test]
    fn test_is_permitted() {
        let config = BotConfig {
            permitted_channels: vec!["42".to_string(), "99".to_string()],
            currency_emoji: "B".to_string(),
        };
        assert!(config.is_permitted("42"));
        assert!(config.is_permitted("99"));
        assert!(!config.is_permitted("7"));
    }
}
