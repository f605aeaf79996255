use bot_utils::{DiceError, DisplayModel, RollFailure, RollOutcome, Visibility};
use serenity::{builder::CreateEmbed, client::Context, model::channel::Message};

use super::{display_name, react, reply, send_embed, send_private_embed};

const PUBLIC_COLOUR: u32 = 0x2ecc71;
const SECRET_COLOUR: u32 = 0x9b59b6;

/// Text body of a roll embed, one line per step of the calculation.
pub(crate) fn describe_roll(display: &DisplayModel) -> String {
    let mut lines = vec![format!("🎲 `{}`", display.expression)];
    let faces = display
        .dice
        .iter()
        .map(|die| {
            if display.keep.is_some() && die.kept {
                format!("**{}**", die.value)
            } else {
                die.value.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("Rolls: {}", faces));
    match display.keep {
        Some(mode) => {
            let kept = display
                .kept_rolls
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!(
                "Kept ({}): {}  → sum {}",
                mode.suffix(),
                kept,
                display.kept_sum
            ))
        }
        None => lines.push(format!("Sum: {}", display.kept_sum)),
    }
    if let Some(modifier) = &display.modifier {
        lines.push(format!(
            "Modifier: `{}` (= {:+})",
            modifier.expression, modifier.value
        ));
    }
    lines.join("\n")
}

pub(crate) fn failure_text(failure: &RollFailure) -> String {
    match failure {
        RollFailure::Dice(DiceError::Parse) => format!(
            "❌ {} (examples: `1d100`, `2d6+3`, `4d6kh3`)",
            failure
        ),
        other => format!("❌ {}", other),
    }
}

fn roll_embed<'e>(
    embed: &'e mut CreateEmbed,
    title: &str,
    outcome: &RollOutcome,
    colour: u32,
) -> &'e mut CreateEmbed {
    embed
        .title(title)
        .colour(colour)
        .description(describe_roll(&outcome.display))
        .field("Result", format!("**{}**", outcome.display.total), false)
}

pub(crate) async fn roll(
    context: Context,
    message: Message,
    res: Result<RollOutcome, RollFailure>,
    visibility: Visibility,
) {
    let outcome = match res {
        Ok(outcome) => outcome,
        Err(e) => return reply(&context, &message, failure_text(&e)).await,
    };
    let name = display_name(&context, &message).await;
    match visibility {
        Visibility::Public => {
            let title = format!("🎲 {}'s roll", name);
            send_embed(&context, &message, |e| {
                roll_embed(e, &title, &outcome, PUBLIC_COLOUR)
            })
            .await
        }
        Visibility::Secret => {
            let title = format!("🎲 {}'s secret roll", name);
            if send_private_embed(&context, &message, |e| {
                roll_embed(e, &title, &outcome, SECRET_COLOUR)
            })
            .await
            {
                react(&context, &message, '✅').await
            }
        }
    }
}

pub(crate) async fn secret_roll(
    context: Context,
    message: Message,
    res: Result<RollOutcome, RollFailure>,
) {
    let outcome = match res {
        Ok(outcome) => outcome,
        Err(e) => return reply(&context, &message, failure_text(&e)).await,
    };
    let name = display_name(&context, &message).await;
    let title = format!("🎲 {}'s secret roll", name);
    if send_private_embed(&context, &message, |e| {
        roll_embed(e, &title, &outcome, SECRET_COLOUR)
    })
    .await
    {
        reply(
            &context,
            &message,
            "✅ sent the result to your DMs".to_string(),
        )
        .await
    }
}
