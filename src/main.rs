use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;

use api::ledger::LedgerClient;
use config::{ApiConfig, BotConfig};

struct Handler;

struct LedgerState;

impl TypeMapKey for LedgerState {
    type Value = LedgerClient;
}

struct BotSettings;

impl TypeMapKey for BotSettings {
    type Value = BotConfig;
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        commands::handle_message(&ctx, &msg).await;
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }

    // Fires once the guilds from the initial ready payload are cached, so
    // the startup inventory below sees their members and channels.
    async fn cache_ready(&self, ctx: Context, guilds: Vec<GuildId>) {
        info!("Bot is ready for some action");
        for guild_id in guilds {
            let Some(guild) = guild_id.to_guild_cached(&ctx.cache) else {
                continue;
            };
            info!(
                "Connected to guild {} - {} owned by {}",
                guild.name, guild.id, guild.owner_id
            );

            for member in guild.members.values() {
                info!("Guild member {} - {}", member.user.tag(), member.user.id);
            }

            for channel in guild.channels.values() {
                info!("Guild channel {} - {}", channel.name, channel.id);
            }
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("bcoin_bot=info".parse().unwrap())
                .add_directive("serenity=warn".parse().unwrap()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting the bot");

    let api_config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return;
        }
    };

    let bot_config = BotConfig::from_env();
    if bot_config.permitted_channels.is_empty() {
        warn!("PERMITTED_CHANNELS is empty, no channel will accept commands");
    }

    let ledger_client = match LedgerClient::new(&api_config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build ledger client: {}", e);
            return;
        }
    };

    let token = std::env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN not set");
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&token, intents)
        .event_handler(Handler)
        .await
        .expect("Failed to create client");

    // Store the ledger client and bot settings in client data
    {
        let mut data = client.data.write().await;
        data.insert::<LedgerState>(ledger_client);
        data.insert::<BotSettings>(bot_config);
    }

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }
}
