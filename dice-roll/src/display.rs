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

use crate::dice_types::{DiceSpec, KeepMode, RollResult};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DieFace {
    pub value: u32,
    pub kept: bool,
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModifierDisplay {
    pub expression: String,
    pub value: i64,
}

/// Everything a host needs to show a roll, independent of how it shows it.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayModel {
    /// canonical form of the rolled expression
    pub expression: String,
    pub dice: Vec<DieFace>,
    pub keep: Option<KeepMode>,
    pub kept_rolls: Vec<u32>,
    pub kept_sum: i64,
    pub modifier: Option<ModifierDisplay>,
    pub total: i64,
}

/// Flags the kept dice. For a face kept `n` times, its first `n` occurrences
/// in roll order are the kept ones.
pub fn format_breakdown(spec: &DiceSpec, result: &RollResult) -> DisplayModel {
    let mut remaining: HashMap<u32, usize> = HashMap::new();
    for face in result.kept_rolls.iter() {
        *remaining.entry(*face).or_insert(0) += 1;
    }
    let dice = result
        .all_rolls
        .iter()
        .map(|value| {
            let kept = match remaining.get_mut(value) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    true
                }
                _ => false,
            };
            DieFace {
                value: *value,
                kept,
            }
        })
        .collect();
    let modifier = if spec.modifier().is_empty() {
        None
    } else {
        Some(ModifierDisplay {
            expression: spec.modifier().to_owned(),
            value: result.modifier_value,
        })
    };
    DisplayModel {
        expression: spec.to_string(),
        dice,
        keep: spec.keep().map(|k| k.mode),
        kept_rolls: result.kept_rolls.clone(),
        kept_sum: result.kept_sum,
        modifier,
        total: result.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice_types::Keep;

    fn flags(model: &DisplayModel) -> Vec<bool> {
        model.dice.iter().map(|d| d.kept).collect()
    }

    #[test]
    fn test_duplicates_partially_kept() {
        let spec = DiceSpec::new(
            5,
            6,
            Some(Keep {
                mode: KeepMode::Lowest,
                count: 2,
            }),
            "",
        )
        .unwrap();
        let result = RollResult {
            all_rolls: vec![4, 2, 6, 2, 2],
            kept_rolls: vec![2, 2],
            kept_sum: 4,
            modifier_value: 0,
            total: 4,
        };
        let model = format_breakdown(&spec, &result);
        assert_eq!(flags(&model), vec![false, true, false, true, false]);
        assert_eq!(model.keep, Some(KeepMode::Lowest));
        assert_eq!(model.expression, "5d6kl2");
    }

    #[test]
    fn test_without_keep_everything_is_kept() {
        let spec = DiceSpec::new(2, 6, None, "+3").unwrap();
        let result = RollResult {
            all_rolls: vec![4, 5],
            kept_rolls: vec![4, 5],
            kept_sum: 9,
            modifier_value: 3,
            total: 12,
        };
        let model = format_breakdown(&spec, &result);
        assert_eq!(flags(&model), vec![true, true]);
        assert_eq!(
            model.modifier,
            Some(ModifierDisplay {
                expression: "+3".to_string(),
                value: 3
            })
        );
        assert_eq!(model.total, 12);
        assert_eq!(model.kept_sum, 9);
    }

    #[test]
    fn test_idempotent() {
        let spec = DiceSpec::new(
            3,
            20,
            Some(Keep {
                mode: KeepMode::Highest,
                count: 1,
            }),
            "+2",
        )
        .unwrap();
        let result = RollResult {
            all_rolls: vec![20, 1, 20],
            kept_rolls: vec![20],
            kept_sum: 20,
            modifier_value: 2,
            total: 22,
        };
        let first = format_breakdown(&spec, &result);
        let second = format_breakdown(&spec, &result);
        assert_eq!(first, second);
        assert_eq!(flags(&first), vec![true, false, false]);
    }
}
