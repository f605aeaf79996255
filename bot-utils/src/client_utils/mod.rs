pub mod choices;
pub mod commands;
pub mod rolls;

use choices::{parse_choices, ChoiceError, ChoiceOutcome};
use commands::{Command, Visibility};
use rolls::{RollExecutor, RollFailure, RollOutcome};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::config::{string_or, Map, Value};

#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Help(String),
    RollHelp(String),
    Info,
    Roll(Result<RollOutcome, RollFailure>, Visibility),
    SecretRoll(Result<RollOutcome, RollFailure>),
    Choice(Result<ChoiceOutcome, ChoiceError>, Visibility),
}

/// Turns chat messages into results for one kind of client (guild channels,
/// direct messages, ...).
#[derive(Clone)]
pub struct ClientUtils {
    roll: Arc<RollExecutor>,
    command_prefix: String,
}

impl ClientUtils {
    /// `None` if the message is not meant for the bot.
    pub async fn eval(&self, message: &str) -> Option<CommandResult> {
        let command = commands::parse_logging(message, &self.command_prefix)?;
        Some(match command {
            Command::Help => CommandResult::Help(self.command_prefix.clone()),
            Command::RollHelp => CommandResult::RollHelp(self.command_prefix.clone()),
            Command::Info => CommandResult::Info,
            Command::Roll(expr, visibility) => {
                CommandResult::Roll(self.roll.roll(expr).await, visibility)
            }
            Command::SecretRoll(expr) => CommandResult::SecretRoll(self.roll.roll(expr).await),
            Command::Choice(options, visibility) => {
                CommandResult::Choice(self.choose(&options).await, visibility)
            }
        })
    }

    async fn choose(&self, options: &str) -> Result<ChoiceOutcome, ChoiceError> {
        let options = parse_choices(options);
        if options.len() < 2 {
            return Err(ChoiceError::TooFewOptions);
        }
        let index = self.roll.pick(options.len()).await?;
        let pick = options[index].clone();
        Ok(ChoiceOutcome { options, pick })
    }
}

pub struct ClientUtilsBuilder {
    pub(crate) rolls: Arc<RollExecutor>,
    pub(crate) join_handles: Vec<JoinHandle<()>>,
}

impl ClientUtilsBuilder {
    pub fn get<S: ToString>(&mut self, command_prefix: S) -> ClientUtils {
        ClientUtils {
            roll: self.rolls.clone(),
            command_prefix: command_prefix.to_string(),
        }
    }
    pub fn get_from_config(&mut self, config: ClientUtilsConfig) -> ClientUtils {
        log::info!(
            "{} uses command prefix {:?}",
            &config.client_type,
            &config.command_prefix
        );
        self.get(config.command_prefix)
    }
    pub async fn wait(self) {
        let handles = self.join_handles;
        drop(self.rolls);
        for handle in handles.into_iter() {
            if let Err(e) = handle.await {
                log::error!("client utils task failed: {}", e)
            }
        }
        log::info!("all client utils finished")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUtilsConfig {
    pub command_prefix: String,
    pub client_type: String,
}

impl ClientUtilsConfig {
    pub fn from_config<S: ToString>(
        client_type: S,
        config: &mut Map<String, Value>,
    ) -> ClientUtilsConfig {
        ClientUtilsConfig {
            command_prefix: string_or(config, "command_prefix", "!"),
            client_type: client_type.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_dice::{DiceError, RangeError};
    use std::time::Duration;

    async fn builder() -> (tokio::sync::watch::Sender<bool>, ClientUtilsBuilder) {
        let (stop_sender, stop) = tokio::sync::watch::channel(false);
        let (handle, executor) = RollExecutor::new(
            1,
            Duration::from_secs(5),
            Duration::from_secs(300),
            stop,
        )
        .await;
        (
            stop_sender,
            ClientUtilsBuilder {
                rolls: Arc::new(executor),
                join_handles: vec![handle],
            },
        )
    }

    #[tokio::test]
    async fn test_eval() {
        let (stop, mut builder) = builder().await;
        let utils = builder.get("!");

        match utils.eval("!roll 2d6+3").await {
            Some(CommandResult::Roll(Ok(outcome), Visibility::Public)) => {
                assert_eq!(outcome.display.expression, "2d6+3");
                assert_eq!(outcome.display.total, outcome.display.kept_sum + 3);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            utils.eval("!sr 0d6").await,
            Some(CommandResult::SecretRoll(Err(RollFailure::Dice(
                DiceError::Range(RangeError::DiceCount)
            ))))
        );
        assert_eq!(
            utils.eval("!choice A").await,
            Some(CommandResult::Choice(
                Err(ChoiceError::TooFewOptions),
                Visibility::Public
            ))
        );
        match utils.eval("!c secret A,B").await {
            Some(CommandResult::Choice(Ok(outcome), Visibility::Secret)) => {
                assert_eq!(outcome.options, vec!["A".to_string(), "B".to_string()]);
                assert!(outcome.options.contains(&outcome.pick));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            utils.eval("!").await,
            Some(CommandResult::Help("!".to_string()))
        );
        assert_eq!(utils.eval("just chatting").await, None);

        stop.send(true).unwrap();
        drop(utils);
        builder.wait().await;
    }

    #[test]
    fn test_config() {
        let mut config = Map::new();
        let utils_config = ClientUtilsConfig::from_config("discord-guild", &mut config);
        assert_eq!(utils_config.command_prefix, "!");
        assert_eq!(utils_config.client_type, "discord-guild");
        assert_eq!(
            config.get("command_prefix"),
            Some(&Value::String("!".to_string()))
        );
    }
}
