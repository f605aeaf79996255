use bot_utils::{ChoiceError, ChoiceOutcome, Visibility};
use serenity::{builder::CreateEmbed, client::Context, model::channel::Message};

use super::{react, reply, send_embed, send_private_embed};

const CHOICE_COLOUR: u32 = 0xf1c40f;

pub(crate) fn describe_choice(outcome: &ChoiceOutcome) -> String {
    format!("Options: {}", outcome.options.join(", "))
}

fn choice_embed<'e>(embed: &'e mut CreateEmbed, outcome: &ChoiceOutcome) -> &'e mut CreateEmbed {
    embed
        .title("🎯 Choice")
        .colour(CHOICE_COLOUR)
        .description(describe_choice(outcome))
        .field("Result", format!("**{}**", outcome.pick), false)
}

pub(crate) async fn choice(
    context: Context,
    message: Message,
    res: Result<ChoiceOutcome, ChoiceError>,
    visibility: Visibility,
) {
    let outcome = match res {
        Ok(outcome) => outcome,
        Err(e) => return reply(&context, &message, format!("❌ {}", e)).await,
    };
    match visibility {
        Visibility::Public => send_embed(&context, &message, |e| choice_embed(e, &outcome)).await,
        Visibility::Secret => {
            if send_private_embed(&context, &message, |e| choice_embed(e, &outcome)).await {
                react(&context, &message, '✅').await
            }
        }
    }
}
