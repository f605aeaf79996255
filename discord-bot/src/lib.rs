use bot_utils::{
    bots::{
        async_trait, Bot, BotBuilder, BotConfig, ClientUtilsBuilder, ClientUtilsConfig, Map, Value,
    },
    config::{section, string_or},
    StopListener,
};

use serenity::client::{Client, ClientBuilder};
use thiserror::Error;

use std::sync::{Arc, Mutex};

#[derive(Debug, Error)]
pub enum DiscordBotError {
    #[error("No Discord API Token provided in DISCORD_TOKEN env var")]
    MissingToken,
    #[error("unable to create discord client: {0}")]
    Client(#[from] serenity::Error),
}

pub struct DiscordBot {
    client: Client,
}

#[async_trait]
impl Bot for DiscordBot {
    async fn run(mut self) {
        if let Err(e) = self.client.start_autosharded().await {
            log::error!("discord client failed: {}", e)
        }
        log::info!("discord bot stopped")
    }
}

pub struct DiscordBotBuilder {
    invite_url: String,
    token: Option<String>,
    dm_utils: ClientUtilsConfig,
    guild_utils: ClientUtilsConfig,
}

#[async_trait]
impl BotBuilder for DiscordBotBuilder {
    type B = DiscordBot;
    type Error = DiscordBotError;

    async fn build<S: StopListener>(
        self,
        utils: Arc<Mutex<ClientUtilsBuilder>>,
        mut stop: S,
    ) -> Result<Self::B, Self::Error> {
        let token = self.token.ok_or(DiscordBotError::MissingToken)?;
        let (dm_utils, guild_utils) = {
            let mut utils = utils.lock().unwrap_or_else(|e| e.into_inner());
            (
                utils.get_from_config(self.dm_utils),
                utils.get_from_config(self.guild_utils),
            )
        };
        let client = ClientBuilder::new(token)
            .raw_event_handler(DiscordBotHandler {
                dm_utils,
                guild_utils,
                invite_url: self.invite_url,
            })
            .await?;
        let shard = client.shard_manager.clone();
        tokio::task::spawn(async move {
            stop.wait_stop().await;
            shard.lock().await.shutdown_all().await;
        });
        Ok(DiscordBot { client })
    }
}

pub struct DiscordBotConfig {}

impl BotConfig for DiscordBotConfig {
    type Builder = DiscordBotBuilder;

    fn config(self, config: &mut Map<String, Value>) -> Self::Builder {
        let token = std::env::var("DISCORD_TOKEN").ok();
        let discord_config = section(config, "discord");
        let invite_url = string_or(discord_config, "invite_url", "https://example.com");
        let dm_utils = ClientUtilsConfig::from_config("discord-dm", section(discord_config, "dm"));
        let guild_utils =
            ClientUtilsConfig::from_config("discord-guild", section(discord_config, "guild"));
        DiscordBotBuilder {
            invite_url,
            token,
            dm_utils,
            guild_utils,
        }
    }
}

mod handler;
use handler::DiscordBotHandler;
