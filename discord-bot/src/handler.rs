use async_trait::async_trait;
use bot_utils::{ClientUtils, CommandResult};
use serenity::{
    builder::CreateEmbed,
    client::Context,
    model::{channel::Message, event::Event},
    prelude::RawEventHandler,
};

pub(crate) struct DiscordBotHandler {
    pub guild_utils: ClientUtils,
    pub dm_utils: ClientUtils,
    pub invite_url: String,
}

#[async_trait]
impl RawEventHandler for DiscordBotHandler {
    async fn raw_event(&self, ctx: Context, ev: Event) {
        if let Event::MessageCreate(event) = ev {
            if event.message.author.bot {
                return;
            }
            let utils = if event.message.guild_id.is_some() {
                &self.guild_utils
            } else {
                &self.dm_utils
            };
            if let Some(response) = utils.eval(&event.message.content).await {
                respond(ctx, event.message, response, &self.invite_url).await;
            }
        }
    }
}

mod help;
use help::{help, roll_help};
mod info;
use info::info;
mod roll;
use roll::{roll, secret_roll};
mod choice;
use choice::choice;

async fn respond(context: Context, message: Message, response: CommandResult, invite_url: &str) {
    match response {
        CommandResult::Help(prefix) => help(context, message, prefix).await,
        CommandResult::RollHelp(prefix) => roll_help(context, message, prefix).await,
        CommandResult::Info => info(context, message, invite_url).await,
        CommandResult::Roll(res, visibility) => roll(context, message, res, visibility).await,
        CommandResult::SecretRoll(res) => secret_roll(context, message, res).await,
        CommandResult::Choice(res, visibility) => choice(context, message, res, visibility).await,
    }
}

pub(crate) async fn reply(context: &Context, message: &Message, text: String) {
    if let Err(err) = message.reply(context, text).await {
        log::warn!("Unable to reply to message {}: {}", message.id, err)
    }
}

pub(crate) async fn react(context: &Context, message: &Message, reaction: char) {
    if let Err(err) = message.react(context, reaction).await {
        log::warn!("unable to react to message {}: {}", message.id, err)
    }
}

/// Nickname in the guild, user name everywhere else.
pub(crate) async fn display_name(context: &Context, message: &Message) -> String {
    message
        .author_nick(context)
        .await
        .unwrap_or_else(|| message.author.name.clone())
}

pub(crate) async fn send_embed<F>(context: &Context, message: &Message, f: F)
where
    F: FnOnce(&mut CreateEmbed) -> &mut CreateEmbed,
{
    if let Err(err) = message
        .channel_id
        .send_message(context, |m| {
            m.reference_message((message.channel_id, message.id))
                .allowed_mentions(|mentions| mentions.empty_users())
                .embed(f)
        })
        .await
    {
        log::warn!("Unable to reply to message {}: {}", message.id, err)
    }
}

/// Sends an embed to the author only. Returns whether it arrived.
pub(crate) async fn send_private_embed<F>(context: &Context, message: &Message, f: F) -> bool
where
    F: FnOnce(&mut CreateEmbed) -> &mut CreateEmbed,
{
    match message
        .author
        .direct_message(context, |m| m.embed(f))
        .await
    {
        Ok(_) => true,
        Err(err) => {
            log::warn!("unable to send DM to {}: {}", message.author.id, err);
            reply(
                context,
                message,
                "❌ Could not send you a direct message. Allow direct messages from this bot and try again."
                    .to_string(),
            )
            .await;
            false
        }
    }
}
