use crate::bots::{Bot, BotBuilder, BotConfig};
use crate::client_utils::{rolls::RollExecutor, ClientUtilsBuilder};
use crate::config::{integer_or, Map, Value};
pub use async_trait::async_trait;
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::join;

pub struct BotManager<B: Bot> {
    global_handle: ClientUtilsBuilder,
    bot: B,
}

impl<B: Bot> BotManager<B> {
    pub async fn run(self) {
        let bot = tokio::task::spawn(self.bot.run());
        let (_, r) = join!(self.global_handle.wait(), bot);
        if let Err(e) = r {
            log::error!("bot task failed: {}", e)
        }
    }
}

#[async_trait]
pub trait StopListener: Sized + Sync + Clone + Send + 'static {
    async fn wait_stop(&mut self) -> ();
}

#[async_trait]
impl StopListener for tokio::sync::watch::Receiver<bool> {
    async fn wait_stop(&mut self) -> () {
        loop {
            let stopped = *self.borrow();
            if stopped || self.changed().await.is_err() {
                break;
            }
        }
    }
}

/// Settings shared by every bot, read from the top level of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollSettings {
    pub roll_timeout: Duration,
    pub rng_reseed: Duration,
    pub rng_workers: u32,
}

impl RollSettings {
    pub fn from_config(config: &mut Map<String, Value>) -> RollSettings {
        RollSettings {
            roll_timeout: Duration::from_millis(
                integer_or::<u32>(config, "roll_timeout_ms", 2000).into(),
            ),
            rng_reseed: Duration::from_secs(
                integer_or::<u32>(config, "rng_reseed_s", 300).max(1).into(),
            ),
            rng_workers: integer_or::<u32>(config, "rng_workers", 4).max(1),
        }
    }
}

pub struct BotManagerBuilder<BB: BotBuilder> {
    bot: BB,
    settings: RollSettings,
}

#[cfg(target_family = "unix")]
async fn wait_hup() {
    use tokio::signal::unix::*;
    match signal(SignalKind::hangup()) {
        Ok(mut signal) => {
            signal.recv().await;
        }
        Err(e) => {
            log::warn!("unable to listen for SIGHUP: {}", e);
            std::future::pending::<()>().await
        }
    }
}

impl<BB: BotBuilder> BotManagerBuilder<BB> {
    /// Reads the config file at `config_path`, lets `bot` pick its settings
    /// and writes the completed config back.
    pub fn new<S, BC>(config_path: S, bot: BC) -> BotManagerBuilder<BB>
    where
        S: ToString,
        BC: BotConfig<Builder = BB>,
    {
        let config_path = PathBuf::from(config_path.to_string());
        let mut config: Map<String, Value> =
            match toml::from_slice(&match std::fs::read(&config_path) {
                Ok(a) => a,
                Err(e) => {
                    log::warn!("Unable to read config file: {}", e);
                    vec![]
                }
            }) {
                Ok(a) => a,
                Err(e) => {
                    log::warn!("Unable to parse config: {}", e);
                    Map::new()
                }
            };
        let settings = RollSettings::from_config(&mut config);
        let bot = bot.config(&mut config);

        match toml::to_vec(&config) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(config_path, bytes) {
                    log::error!("Error writing config: {}", e)
                }
            }
            Err(e) => log::error!("Error serializing config: {}", e),
        }

        BotManagerBuilder { bot, settings }
    }

    pub async fn build_async(self) -> Result<BotManager<BB::B>, BB::Error> {
        let (finished_sender, finished_receiver) = tokio::sync::watch::channel(false);
        tokio::task::spawn(async move {
            #[cfg(target_family = "unix")]
            {
                tokio::select! {
                    _ = tokio::signal::ctrl_c()=>{
                        log::info!("Received Ctrl-C: Shutting down")
                    }
                    _ = wait_hup()=>{
                        log::info!("Received SIGHUP: Shutting down")
                    }
                };
            }
            #[cfg(not(target_family = "unix"))]
            {
                match tokio::signal::ctrl_c().await {
                    _ => log::info!("Received Ctrl-C: Shutting down"),
                }
            }
            if finished_sender.send(true).is_err() {
                log::debug!("nobody was listening for shutdown")
            }
        });
        let (handle, roll) = RollExecutor::new(
            self.settings.rng_workers,
            self.settings.roll_timeout,
            self.settings.rng_reseed,
            finished_receiver.clone(),
        )
        .await;
        let utils = Arc::new(Mutex::new(ClientUtilsBuilder {
            rolls: Arc::new(roll),
            join_handles: vec![handle],
        }));
        let bot = self.bot.build(utils.clone(), finished_receiver).await?;
        let global_handle = match Arc::try_unwrap(utils) {
            Ok(utils) => utils.into_inner().unwrap_or_else(|e| e.into_inner()),
            Err(_) => panic!(
                "client utils builder is still owned somewhere after building the bot finished"
            ),
        };
        Ok(BotManager { global_handle, bot })
    }
}
