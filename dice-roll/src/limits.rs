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

use crate::dice_types::DiceSpec;

/// Upper bound for the number of dice in one expression.
pub const MAX_DICE: u32 = 100;
pub const MIN_SIDES: u32 = 2;
/// Upper bound for the faces of a single die.
pub const MAX_SIDES: u32 = 100_000;
/// Deepest nesting the modifier may have. A unary sign adds one level, a
/// pair of parentheses adds two. Flat sums and products of any length are
/// not affected.
pub const MAX_MODIFIER_DEPTH: usize = 256;

/// Bounds of the kept sum of a roll, modifier excluded.
pub trait DiceLimits {
    fn min(&self) -> i64;
    fn max(&self) -> i64;
}

impl DiceLimits for DiceSpec {
    fn min(&self) -> i64 {
        i64::from(self.kept_count())
    }

    fn max(&self) -> i64 {
        i64::from(self.kept_count()) * i64::from(self.sides())
    }
}
