use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{multispace0, multispace1, satisfy},
    combinator::{eof, map, opt, peek, rest, value},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

/// Who gets to see a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    /// only the requester
    Secret,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    RollHelp,
    Info,
    Roll(String, Visibility),
    /// roll that is sent to the requester and only acknowledged in the channel
    SecretRoll(String),
    Choice(String, Visibility),
}

/// End of a keyword: whitespace or the end of the message.
fn word_end(input: &str) -> IResult<&str, ()> {
    alt((value((), multispace1), value((), eof)))(input)
}

/// Roll keywords may be glued to the expression, as in `r2d6` or `rd20`.
fn roll_word_end(input: &str) -> IResult<&str, ()> {
    alt((
        word_end,
        value(
            (),
            peek(satisfy(|c| c.is_ascii_digit() || c == 'd' || c == 'D')),
        ),
    ))(input)
}

fn parse_secret_flag(input: &str) -> IResult<&str, Visibility> {
    map(
        terminated(
            alt((
                tag_no_case("--secret"),
                tag_no_case("-s"),
                tag_no_case("secret"),
            )),
            multispace1,
        ),
        |_| Visibility::Secret,
    )(input)
}

/// Rolls also take a bare `s`. A choice does not, `s` may be an option there.
fn parse_roll_secret_flag(input: &str) -> IResult<&str, Visibility> {
    alt((
        parse_secret_flag,
        map(terminated(tag_no_case("s"), multispace1), |_| {
            Visibility::Secret
        }),
    ))(input)
}

fn parse_visibility(input: &str) -> IResult<&str, Visibility> {
    map(opt(parse_secret_flag), |v| v.unwrap_or(Visibility::Public))(input)
}

fn parse_roll_visibility(input: &str) -> IResult<&str, Visibility> {
    map(opt(parse_roll_secret_flag), |v| {
        v.unwrap_or(Visibility::Public)
    })(input)
}

fn parse_help(input: &str) -> IResult<&str, Command> {
    map(
        terminated(alt((tag_no_case("help"), tag_no_case("h"))), word_end),
        |_| Command::Help,
    )(input)
}

fn parse_roll_help(input: &str) -> IResult<&str, Command> {
    map(
        terminated(
            alt((
                tag_no_case("roll-help"),
                tag_no_case("roll_help"),
                tag_no_case("roll help"),
                tag_no_case("rh"),
            )),
            word_end,
        ),
        |_| Command::RollHelp,
    )(input)
}

fn parse_info(input: &str) -> IResult<&str, Command> {
    map(
        terminated(alt((tag_no_case("info"), tag_no_case("i"))), word_end),
        |_| Command::Info,
    )(input)
}

fn parse_roll_command(input: &str) -> IResult<&str, Command> {
    preceded(
        terminated(alt((tag_no_case("roll"), tag_no_case("r"))), roll_word_end),
        map(pair(parse_roll_visibility, rest), |(visibility, expr): (_, &str)| {
            let expr = expr.trim();
            if expr.is_empty() {
                Command::RollHelp
            } else {
                Command::Roll(expr.to_owned(), visibility)
            }
        }),
    )(input)
}

fn parse_secret_roll(input: &str) -> IResult<&str, Command> {
    preceded(
        terminated(
            alt((
                tag_no_case("secretroll"),
                tag_no_case("secret-roll"),
                tag_no_case("secret_roll"),
                tag_no_case("sr"),
            )),
            roll_word_end,
        ),
        map(rest, |expr: &str| {
            let expr = expr.trim();
            if expr.is_empty() {
                Command::RollHelp
            } else {
                Command::SecretRoll(expr.to_owned())
            }
        }),
    )(input)
}

fn parse_choice(input: &str) -> IResult<&str, Command> {
    preceded(
        terminated(
            alt((
                tag_no_case("choice"),
                tag_no_case("choose"),
                tag_no_case("c"),
            )),
            word_end,
        ),
        map(pair(parse_visibility, rest), |(visibility, options): (_, &str)| {
            Command::Choice(options.trim().to_owned(), visibility)
        }),
    )(input)
}

fn parse_command<'a>(input: &'a str, prefix: &str) -> IResult<&'a str, Command> {
    preceded(
        tag(prefix),
        alt((
            delimited(
                multispace0,
                alt((
                    parse_help,
                    parse_roll_help,
                    parse_info,
                    parse_secret_roll,
                    parse_choice,
                    parse_roll_command,
                )),
                pair(multispace0, eof),
            ),
            map(pair(multispace0, eof), |_| Command::Help),
        )),
    )(input)
}

pub fn parse(message: &str, prefix: &str) -> Option<Command> {
    parse_command(message.trim_start(), prefix)
        .ok()
        .map(|(_, command)| command)
}

pub fn parse_logging(message: &str, prefix: &str) -> Option<Command> {
    let command = parse(message, prefix);
    if command.is_some() {
        log::info!("{:?}", &command);
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(expr: &str) -> Option<Command> {
        Some(Command::Roll(expr.to_string(), Visibility::Public))
    }

    #[test]
    fn test_parse_roll() {
        assert_eq!(parse("!roll 2d6+3", "!"), roll("2d6+3"));
        assert_eq!(parse("! r 4d6 kh3", "!"), roll("4d6 kh3"));
        assert_eq!(parse("!r2d6", "!"), roll("2d6"));
        assert_eq!(parse("!rd20", "!"), roll("d20"));
        assert_eq!(parse("!ROLL 1d100  ", "!"), roll("1d100"));
        assert_eq!(parse("rrb!roll 1d4", "rrb!"), roll("1d4"));
        assert_eq!(parse("!roll", "!"), Some(Command::RollHelp));
        // the engine decides whether the expression makes sense
        assert_eq!(parse("!roll what", "!"), roll("what"));
    }

    #[test]
    fn test_parse_secret() {
        assert_eq!(
            parse("!roll secret 1d20", "!"),
            Some(Command::Roll("1d20".to_string(), Visibility::Secret))
        );
        assert_eq!(
            parse("!r -s d6", "!"),
            Some(Command::Roll("d6".to_string(), Visibility::Secret))
        );
        assert_eq!(
            parse("!roll --secret 3d6", "!"),
            Some(Command::Roll("3d6".to_string(), Visibility::Secret))
        );
        assert_eq!(
            parse("!r s 1d6", "!"),
            Some(Command::Roll("1d6".to_string(), Visibility::Secret))
        );
        assert_eq!(
            parse("!secretroll 1d100", "!"),
            Some(Command::SecretRoll("1d100".to_string()))
        );
        assert_eq!(
            parse("!sr2d6+1", "!"),
            Some(Command::SecretRoll("2d6+1".to_string()))
        );
        assert_eq!(parse("!secret-roll", "!"), Some(Command::RollHelp));
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(
            parse("!choice A,B,C", "!"),
            Some(Command::Choice("A,B,C".to_string(), Visibility::Public))
        );
        assert_eq!(
            parse("!c secret A | B", "!"),
            Some(Command::Choice("A | B".to_string(), Visibility::Secret))
        );
        assert_eq!(
            parse("!choice\nA\nB", "!"),
            Some(Command::Choice("A\nB".to_string(), Visibility::Public))
        );
        assert_eq!(
            parse("!choice s | m | l", "!"),
            Some(Command::Choice("s | m | l".to_string(), Visibility::Public))
        );
        assert_eq!(
            parse("!c -s s | m", "!"),
            Some(Command::Choice("s | m".to_string(), Visibility::Secret))
        );
        assert_eq!(
            parse("!choice", "!"),
            Some(Command::Choice(String::new(), Visibility::Public))
        );
    }

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("!help", "!"), Some(Command::Help));
        assert_eq!(parse("! h ", "!"), Some(Command::Help));
        assert_eq!(parse("!", "!"), Some(Command::Help));
        assert_eq!(parse("!rh", "!"), Some(Command::RollHelp));
        assert_eq!(parse("!roll-help", "!"), Some(Command::RollHelp));
        assert_eq!(parse("!roll help", "!"), Some(Command::RollHelp));
        assert_eq!(parse("!info", "!"), Some(Command::Info));
        assert_eq!(parse("!i", "!"), Some(Command::Info));
    }

    #[test]
    fn test_ignored() {
        assert_eq!(parse("hello", "!"), None);
        assert_eq!(parse("roll 2d6", "!"), None);
        assert_eq!(parse("!!!", "!"), None);
        assert_eq!(parse("!hello", "!"), None);
        assert_eq!(parse("!help me", "!"), None);
        assert_eq!(parse("!rolled", "!"), None);
        assert_eq!(parse("!information", "!"), None);
    }
}
