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
    error::{DiceError, RangeError},
    limits::{MAX_DICE, MAX_SIDES, MIN_SIDES},
};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeepMode {
    Highest,
    Lowest,
}

impl KeepMode {
    pub fn suffix(&self) -> &'static str {
        match self {
            KeepMode::Highest => "kh",
            KeepMode::Lowest => "kl",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keep {
    pub mode: KeepMode,
    pub count: u32,
}

/// A validated dice expression.
///
/// Only obtainable through [`DiceSpec::new`] (or the parser), so the bounds
/// on `count`, `sides` and the keep count always hold.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DiceSpec {
    count: u32,
    sides: u32,
    keep: Option<Keep>,
    modifier: String,
}

fn is_modifier_char(c: char) -> bool {
    c.is_ascii_digit() || "+-*/().".contains(c) || c.is_whitespace()
}

impl DiceSpec {
    /// Checks the bounds in the order count, sides, keep count, modifier
    /// characters and reports the first violation.
    pub fn new(
        count: u32,
        sides: u32,
        keep: Option<Keep>,
        modifier: &str,
    ) -> Result<DiceSpec, DiceError> {
        if count < 1 || count > MAX_DICE {
            return Err(RangeError::DiceCount.into());
        }
        if sides < MIN_SIDES || sides > MAX_SIDES {
            return Err(RangeError::Sides.into());
        }
        if let Some(k) = keep {
            if k.count < 1 || k.count > count {
                return Err(RangeError::KeepCount.into());
            }
        }
        if !modifier.chars().all(is_modifier_char) {
            return Err(DiceError::Validation);
        }
        Ok(DiceSpec {
            count,
            sides,
            keep,
            modifier: modifier.chars().filter(|c| !c.is_whitespace()).collect(),
        })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn keep(&self) -> Option<Keep> {
        self.keep
    }

    pub fn modifier(&self) -> &str {
        &self.modifier
    }

    /// Number of dice that contribute to the sum.
    pub fn kept_count(&self) -> u32 {
        self.keep.map(|k| k.count).unwrap_or(self.count)
    }
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if let Some(keep) = self.keep {
            write!(f, "{}{}", keep.mode.suffix(), keep.count)?;
        }
        f.write_str(&self.modifier)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RollResult {
    /// every die in roll order
    pub all_rolls: Vec<u32>,
    pub kept_rolls: Vec<u32>,
    pub kept_sum: i64,
    pub modifier_value: i64,
    pub total: i64,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operation {
    Mul,
    Div,
    Add,
    Sub,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Mul => "*",
            Operation::Div => "/",
            Operation::Add => "+",
            Operation::Sub => "-",
        })
    }
}

/// Parsed form of a modifier. Only integer literals and the four operators
/// exist, there is nothing else to evaluate.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Term {
    Constant(i64),
    Negated(Box<Term>),
    Calculation(Box<Term>, Operation, Box<Term>),
    SubTerm(Box<Term>),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(i) => write!(f, "{}", i),
            Term::Negated(t) => write!(f, "-{}", t),
            Term::Calculation(l, op, r) => write!(f, "{}{}{}", l, op, r),
            Term::SubTerm(t) => write!(f, "({})", t),
        }
    }
}
