/*
Copyright 2021 Robin Marchart

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

use crate::{
    dice_types::{DiceSpec, Keep, KeepMode},
    error::DiceError,
};

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{map, opt, rest},
    sequence::{pair, preceded, tuple},
    IResult,
};

#[cfg(feature = "logging")]
use log::debug;

/// Trims, lowercases and drops all whitespace. A leading `d` gets an
/// implicit count of one.
pub fn normalize(input: &str) -> String {
    let mut normalized: String = input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if normalized.starts_with('d') {
        normalized.insert(0, '1');
    }
    normalized
}

/// Unsigned number. Values beyond `u32` saturate so that the range checks
/// reject them instead of the grammar.
pub fn parse_bound(input: &str) -> IResult<&str, u32> {
    map(digit1, |s: &str| s.parse::<u32>().unwrap_or(u32::MAX))(input)
}

pub fn parse_keep_mode(input: &str) -> IResult<&str, KeepMode> {
    alt((
        map(tag("kh"), |_| KeepMode::Highest),
        map(tag("kl"), |_| KeepMode::Lowest),
    ))(input)
}

pub fn parse_keep(input: &str) -> IResult<&str, Keep> {
    map(pair(parse_keep_mode, parse_bound), |(mode, count)| Keep {
        mode,
        count,
    })(input)
}

/// `[count]d<sides>[keep]` followed by whatever is left as the modifier.
/// Expects normalized input.
pub fn parse_dice_parts(input: &str) -> IResult<&str, (Option<u32>, u32, Option<Keep>, &str)> {
    tuple((
        opt(parse_bound),
        preceded(tag("d"), parse_bound),
        opt(parse_keep),
        rest,
    ))(input)
}

/// Parses user text like `2d6+3`, `d100` or `4D6 kh3` into a [`DiceSpec`].
pub fn parse(input: &str) -> Result<DiceSpec, DiceError> {
    let normalized = normalize(input);
    let (_, (count, sides, keep, modifier)) =
        parse_dice_parts(&normalized).map_err(|_| DiceError::Parse)?;
    let spec = DiceSpec::new(count.unwrap_or(1), sides, keep, modifier);
    #[cfg(feature = "logging")]
    {
        debug!("parsed {:?} as {:?}", input, &spec);
    }
    spec
}
