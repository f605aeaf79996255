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

//! The arithmetic tail of a dice expression, e.g. the `+3-1*2` in `2d6+3-1*2`.
//!
//! Integer literals, `+ - * /`, unary signs and parentheses. Division
//! truncates toward zero. Every operation is checked.

use crate::{
    dice_types::{Operation, Term},
    error::EvaluationErrors,
    limits::MAX_MODIFIER_DEPTH,
};

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{map, map_res},
    error::{Error, ErrorKind},
    multi::fold_many0,
    sequence::{delimited, pair, preceded},
    IResult,
};

pub fn parse_constant(input: &str) -> IResult<&str, Term> {
    map_res(digit1, |s: &str| s.parse::<i64>().map(Term::Constant))(input)
}

/// Stops the descent once `depth` exceeds [`MAX_MODIFIER_DEPTH`]. The failure
/// is not backtracked, so it surfaces from the whole parse.
fn check_depth(input: &str, depth: usize) -> IResult<&str, ()> {
    if depth > MAX_MODIFIER_DEPTH {
        Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)))
    } else {
        Ok((input, ()))
    }
}

fn subterm_at(input: &str, depth: usize) -> IResult<&str, Term> {
    map(
        delimited(tag("("), |i| sum_at(i, depth), tag(")")),
        |t| Term::SubTerm(Box::new(t)),
    )(input)
}

fn factor_at(input: &str, depth: usize) -> IResult<&str, Term> {
    let (input, _) = check_depth(input, depth)?;
    alt((
        parse_constant,
        |i| subterm_at(i, depth + 2),
        map(preceded(tag("-"), |i| factor_at(i, depth + 1)), |t| {
            Term::Negated(Box::new(t))
        }),
        preceded(tag("+"), |i| factor_at(i, depth + 1)),
    ))(input)
}

fn parse_product_operator(input: &str) -> IResult<&str, Operation> {
    alt((
        map(tag("*"), |_| Operation::Mul),
        map(tag("/"), |_| Operation::Div),
    ))(input)
}

fn parse_sum_operator(input: &str) -> IResult<&str, Operation> {
    alt((
        map(tag("+"), |_| Operation::Add),
        map(tag("-"), |_| Operation::Sub),
    ))(input)
}

fn calculation(left: Term, (op, right): (Operation, Term)) -> Term {
    Term::Calculation(Box::new(left), op, Box::new(right))
}

fn product_at(input: &str, depth: usize) -> IResult<&str, Term> {
    let (input, first) = factor_at(input, depth)?;
    fold_many0(
        pair(parse_product_operator, |i| factor_at(i, depth)),
        first,
        calculation,
    )(input)
}

fn sum_at(input: &str, depth: usize) -> IResult<&str, Term> {
    let (input, first) = product_at(input, depth)?;
    fold_many0(
        pair(parse_sum_operator, |i| product_at(i, depth)),
        first,
        calculation,
    )(input)
}

pub fn parse_subterm(input: &str) -> IResult<&str, Term> {
    subterm_at(input, 2)
}

pub fn parse_factor(input: &str) -> IResult<&str, Term> {
    factor_at(input, 0)
}

pub fn parse_product(input: &str) -> IResult<&str, Term> {
    product_at(input, 0)
}

pub fn parse_sum(input: &str) -> IResult<&str, Term> {
    sum_at(input, 0)
}

pub trait TermEvaluate {
    fn evaluate(&self) -> Result<i64, EvaluationErrors>;
}

impl TermEvaluate for Term {
    fn evaluate(&self) -> Result<i64, EvaluationErrors> {
        match self {
            Term::Constant(i) => Ok(*i),
            Term::Negated(term) => term
                .evaluate()?
                .checked_neg()
                .ok_or(EvaluationErrors::Overflow),
            Term::SubTerm(term) => term.evaluate(),
            Term::Calculation(left, op, right) => {
                let left_r = left.evaluate()?;
                let right_r = right.evaluate()?;
                match op {
                    Operation::Add => left_r
                        .checked_add(right_r)
                        .ok_or(EvaluationErrors::Overflow),
                    Operation::Sub => left_r
                        .checked_sub(right_r)
                        .ok_or(EvaluationErrors::Overflow),
                    Operation::Mul => left_r
                        .checked_mul(right_r)
                        .ok_or(EvaluationErrors::Overflow),
                    Operation::Div if right_r == 0 => Err(EvaluationErrors::DivideByZero),
                    Operation::Div => left_r
                        .checked_div(right_r)
                        .ok_or(EvaluationErrors::Overflow),
                }
            }
        }
    }
}

/// Explains why `expr` could not be parsed.
fn diagnose(expr: &str) -> EvaluationErrors {
    let mut depth: i64 = 0;
    for c in expr.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return EvaluationErrors::UnbalancedParentheses;
        }
    }
    if depth != 0 {
        EvaluationErrors::UnbalancedParentheses
    } else if expr.contains('.') {
        EvaluationErrors::DecimalLiteral
    } else if expr
        .split(|c: char| !c.is_ascii_digit())
        .any(|digits| !digits.is_empty() && digits.parse::<i64>().is_err())
    {
        EvaluationErrors::Overflow
    } else {
        EvaluationErrors::Malformed
    }
}

/// Parses the modifier into a [`Term`]. A single leading `+` is dropped and
/// an empty modifier yields `None`.
pub fn parse_modifier(expr: &str) -> Result<Option<Term>, EvaluationErrors> {
    let trimmed = expr.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(None);
    }
    match parse_sum(&compact) {
        Ok(("", term)) => Ok(Some(term)),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
            Err(EvaluationErrors::TooDeep)
        }
        _ => Err(diagnose(&compact)),
    }
}

/// Value of a modifier, `0` when there is none.
pub fn evaluate_modifier(expr: &str) -> Result<i64, EvaluationErrors> {
    match parse_modifier(expr)? {
        Some(term) => term.evaluate(),
        None => Ok(0),
    }
}
