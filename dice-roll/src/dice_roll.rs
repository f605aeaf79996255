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
    dice_types::{DiceSpec, Keep, KeepMode, RollResult},
    error::{DiceError, EvaluationErrors},
    modifier::evaluate_modifier,
};
use rand::{distributions::Uniform, Rng};

#[cfg(feature = "logging")]
use log::debug;

/// Where the face values come from.
///
/// Every [`rand::Rng`] is a source. Draws must be independent and uniform in
/// `1..=sides`; a source shared between threads has to serialize access
/// itself.
pub trait DiceSource {
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl<R: Rng> DiceSource for R {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.sample(Uniform::new_inclusive(1, sides))
    }
}

/// Replays a fixed list of faces, starting over when it runs out. An empty
/// script always yields `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: Vec<u32>,
    next: usize,
}

impl ScriptedDice {
    pub fn new(faces: Vec<u32>) -> ScriptedDice {
        ScriptedDice { faces, next: 0 }
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self, _sides: u32) -> u32 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.next % self.faces.len()];
        self.next = (self.next + 1) % self.faces.len();
        face
    }
}

/// Picks the kept faces. The sort is stable, so among equal faces the
/// earliest rolled die is the one considered kept.
pub fn select(rolls: &[u32], keep: Keep) -> Vec<u32> {
    let mut sorted = rolls.to_vec();
    match keep.mode {
        KeepMode::Highest => sorted.sort_by(|a, b| b.cmp(a)),
        KeepMode::Lowest => sorted.sort(),
    }
    sorted.truncate(keep.count as usize);
    sorted
}

pub trait DiceEvaluate {
    fn evaluate<S: DiceSource + ?Sized>(&self, source: &mut S) -> Result<RollResult, DiceError>;
}

impl DiceEvaluate for DiceSpec {
    fn evaluate<S: DiceSource + ?Sized>(&self, source: &mut S) -> Result<RollResult, DiceError> {
        let all_rolls: Vec<u32> = (0..self.count())
            .map(|_| source.roll_die(self.sides()))
            .collect();

        let kept_rolls = match self.keep() {
            Some(keep) => select(&all_rolls, keep),
            None => all_rolls.clone(),
        };
        let kept_sum: i64 = kept_rolls.iter().map(|r| i64::from(*r)).sum();
        let modifier_value = evaluate_modifier(self.modifier())?;
        let total = kept_sum
            .checked_add(modifier_value)
            .ok_or(EvaluationErrors::Overflow)?;

        #[cfg(feature = "logging")]
        {
            debug!(
                "rolled {:?} for {}, kept {:?}, total {}",
                &all_rolls, &self, &kept_rolls, total
            );
        }

        Ok(RollResult {
            all_rolls,
            kept_rolls,
            kept_sum,
            modifier_value,
            total,
        })
    }
}

/// Rolls `spec` with faces drawn from `source`.
pub fn roll<S: DiceSource + ?Sized>(
    spec: &DiceSpec,
    source: &mut S,
) -> Result<RollResult, DiceError> {
    spec.evaluate(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn keep(mode: KeepMode, count: u32) -> Keep {
        Keep { mode, count }
    }

    #[test]
    fn test_scripted_dice() {
        let mut dice = ScriptedDice::new(vec![1, 2, 3]);
        let faces: Vec<u32> = (0..5).map(|_| dice.roll_die(6)).collect();
        assert_eq!(faces, vec![1, 2, 3, 1, 2]);
        assert_eq!(ScriptedDice::new(vec![]).roll_die(6), 1);
    }

    #[test]
    fn test_select() {
        assert_eq!(select(&[3, 6, 2, 6], keep(KeepMode::Highest, 3)), vec![6, 6, 3]);
        assert_eq!(select(&[3, 6, 2, 6], keep(KeepMode::Lowest, 2)), vec![2, 3]);
        assert_eq!(select(&[5, 5, 5], keep(KeepMode::Lowest, 3)), vec![5, 5, 5]);
    }

    #[test]
    fn test_keep_highest() {
        let spec = parse("4d6kh3").unwrap();
        let result = roll(&spec, &mut ScriptedDice::new(vec![3, 6, 2, 6])).unwrap();
        assert_eq!(result.all_rolls, vec![3, 6, 2, 6]);
        assert_eq!(result.kept_rolls, vec![6, 6, 3]);
        assert_eq!(result.kept_sum, 15);
        assert_eq!(result.modifier_value, 0);
        assert_eq!(result.total, 15);
    }

    #[test]
    fn test_keep_lowest_with_modifier() {
        let spec = parse("4d6kl2-1").unwrap();
        let result = roll(&spec, &mut ScriptedDice::new(vec![3, 6, 2, 6])).unwrap();
        assert_eq!(result.kept_rolls, vec![2, 3]);
        assert_eq!(result.kept_sum, 5);
        assert_eq!(result.modifier_value, -1);
        assert_eq!(result.total, 4);
    }

    #[test]
    fn test_modifier_error_has_no_result() {
        let spec = parse("2d6+(1").unwrap();
        assert_eq!(
            roll(&spec, &mut ScriptedDice::new(vec![1, 2])),
            Err(DiceError::Evaluation(EvaluationErrors::UnbalancedParentheses))
        );
    }

    #[test]
    fn test_rng_faces_in_range() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for input in ["100d2", "100d6kh3", "100d100000kl7"].iter() {
            let spec = parse(input).unwrap();
            let result = roll(&spec, &mut rng).unwrap();
            assert_eq!(result.all_rolls.len(), spec.count() as usize);
            assert!(result
                .all_rolls
                .iter()
                .all(|r| *r >= 1 && *r <= spec.sides()));
            assert_eq!(result.kept_rolls.len(), spec.kept_count() as usize);
            // every kept face was rolled at least as often as it was kept
            for face in result.kept_rolls.iter() {
                let kept = result.kept_rolls.iter().filter(|r| *r == face).count();
                let rolled = result.all_rolls.iter().filter(|r| *r == face).count();
                assert!(kept <= rolled);
            }
            assert_eq!(
                result.kept_sum,
                result.kept_rolls.iter().map(|r| i64::from(*r)).sum::<i64>()
            );
        }
    }

    #[test]
    fn test_same_seed_same_roll() {
        let spec = parse("10d20kh4+2").unwrap();
        let first = roll(&spec, &mut Xoshiro256PlusPlus::seed_from_u64(7)).unwrap();
        let second = roll(&spec, &mut Xoshiro256PlusPlus::seed_from_u64(7)).unwrap();
        assert_eq!(first, second);
    }
}
