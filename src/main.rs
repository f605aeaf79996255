use bot_utils::BotManagerBuilder;
use discord_bot::DiscordBotConfig;

const DEFAULT_CONFIG_PATH: &str = "session-bot.toml";

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    pretty_env_logger::init();
    log::info!("logger created");
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    log::info!("using config file {}", config_path);
    match BotManagerBuilder::new(config_path, DiscordBotConfig {})
        .build_async()
        .await
    {
        Ok(manager) => manager.run().await,
        Err(e) => log::error!("unable to start bot: {}", e),
    }
}
