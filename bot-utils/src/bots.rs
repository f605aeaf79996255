pub use crate::bot_manager::StopListener;
pub use crate::client_utils::{ClientUtils, ClientUtilsBuilder, ClientUtilsConfig};
pub use crate::config::{Map, Value};
pub use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[async_trait]
pub trait Bot: Send + 'static {
    async fn run(self);
}

#[async_trait]
pub trait BotBuilder: Send + 'static {
    type B: Bot;
    type Error: std::fmt::Display + Send;
    async fn build<S: StopListener>(
        self,
        utils: Arc<Mutex<ClientUtilsBuilder>>,
        stop: S,
    ) -> Result<Self::B, Self::Error>;
}

pub trait BotConfig {
    type Builder: BotBuilder;
    fn config(self, config: &mut Map<String, Value>) -> Self::Builder;
}
