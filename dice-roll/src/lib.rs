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

//! Dice expressions of the form `[count]d<sides>[kh|kl<n>][modifier]`.
//!
//! Parsing, validation, rolling with an injected [`DiceSource`], evaluation of
//! the trailing arithmetic modifier and the itemised breakdown used for display.

pub mod dice_types;
pub mod display;
pub mod error;
pub mod limits;

#[cfg(feature = "roll")]
pub mod dice_roll;
#[cfg(feature = "parser")]
pub mod modifier;
#[cfg(feature = "parser")]
pub mod parser;

pub use dice_types::{DiceSpec, Keep, KeepMode, Operation, RollResult, Term};
pub use display::{format_breakdown, DieFace, DisplayModel, ModifierDisplay};
pub use error::{DiceError, EvaluationErrors, RangeError};
pub use limits::{DiceLimits, MAX_DICE, MAX_SIDES};

#[cfg(feature = "roll")]
pub use dice_roll::{roll, DiceEvaluate, DiceSource, ScriptedDice};
#[cfg(feature = "parser")]
pub use modifier::evaluate_modifier;
#[cfg(feature = "parser")]
pub use parser::parse;

#[cfg(all(test, feature = "roll"))]
mod tests {
    use super::*;

    #[test]
    fn test_roll_with_modifier() {
        let spec = parse("2d6+3").unwrap();
        assert_eq!(spec.count(), 2);
        assert_eq!(spec.sides(), 6);
        assert_eq!(spec.keep(), None);
        assert_eq!(spec.modifier(), "+3");

        let result = roll(&spec, &mut ScriptedDice::new(vec![4, 5])).unwrap();
        assert_eq!(result.all_rolls, vec![4, 5]);
        assert_eq!(result.kept_rolls, vec![4, 5]);
        assert_eq!(result.kept_sum, 9);
        assert_eq!(result.modifier_value, 3);
        assert_eq!(result.total, 12);
    }

    #[test]
    fn test_keep_highest_breakdown() {
        let spec = parse("4d6kh3").unwrap();
        let result = roll(&spec, &mut ScriptedDice::new(vec![3, 6, 2, 6])).unwrap();
        let display = format_breakdown(&spec, &result);
        assert_eq!(display.expression, "4d6kh3");
        assert_eq!(
            display
                .dice
                .iter()
                .map(|d| (d.value, d.kept))
                .collect::<Vec<_>>(),
            vec![(3, true), (6, true), (2, false), (6, true)]
        );
        assert_eq!(display.kept_sum, 15);
        assert_eq!(display.total, 15);
        assert_eq!(display.modifier, None);
    }

    #[test]
    fn test_errors_reach_caller() {
        assert_eq!(
            parse("1d20+import os").unwrap_err().to_string(),
            "illegal characters in modifier"
        );
        let spec = parse("1d20+4/(2-2)").unwrap();
        assert_eq!(
            roll(&spec, &mut ScriptedDice::new(vec![7])),
            Err(DiceError::Evaluation(EvaluationErrors::DivideByZero))
        );
    }
}
