use serenity::{client::Context, model::channel::Message};

use super::send_embed;

const HELP_COLOUR: u32 = 0x3498db;

pub(crate) async fn help(context: Context, message: Message, prefix: String) {
    send_embed(&context, &message, |e| {
        e.title("Command Syntax")
            .colour(HELP_COLOUR)
            .description(format!(
                "
All commands are prefixed with `{}`.
The prefix is recognized both with or without following whitespace.
Sending only the prefix shows this help.
",
                prefix
            ))
            .field(
                "General Help Commands",
                "
`help`, `h` => show this help text
`roll-help`, `roll_help`, `rh` => show help on roll syntax
`info`, `i` => show extra info about this Bot
",
                false,
            )
            .field(
                "Roll",
                "
`roll [expression]`, `r [expression]` => roll dice as described in `[expression]`. See roll-help for the grammar.
`roll secret [expression]`, `r -s [expression]`, `r --secret [expression]` => roll and send the result to your DMs.
`secretroll [expression]`, `sr [expression]` => same as a secret roll, the channel only gets a note.
",
                false,
            )
            .field(
                "Choice",
                "
`choice [options]`, `choose [options]`, `c [options]` => pick one of `[options]`.
Options are separated by newlines, `|` or `,`, in that order of precedence. At most 50 options are considered.
`choice secret [options]` => send the pick to your DMs.
",
                false,
            )
    })
    .await
}

pub(crate) async fn roll_help(context: Context, message: Message, prefix: String) {
    send_embed(&context, &message, |e| {
        e.title("Roll Syntax")
            .colour(HELP_COLOUR)
            .description(format!(
                "
`{p}roll [count]d[sides][kh|kl][keep][modifier]`
Whitespace inside the expression is ignored and the `d`, `kh` and `kl` are case insensitive.
",
                p = prefix
            ))
            .field(
                "Dice",
                "
`[count]` => number of dice, 1 to 100. Defaults to 1.
`[sides]` => sides per die, 2 to 100000.
",
                false,
            )
            .field(
                "Keep",
                "
`kh[n]` => keep the `n` highest dice.
`kl[n]` => keep the `n` lowest dice.
`n` has to be between 1 and `[count]`.
",
                false,
            )
            .field(
                "Modifier",
                "
Integer arithmetic added to the sum: `+`, `-`, `*`, `/` and parentheses.
Division rounds toward zero. Decimal numbers are not supported.
",
                false,
            )
            .field(
                "Examples",
                format!(
                    "`{p}roll 1d100`\n`{p}roll 2d6+3`\n`{p}roll 4d6kh3`\n`{p}roll 2d20kl1-(1+2)*2`",
                    p = prefix
                ),
                false,
            )
    })
    .await
}
