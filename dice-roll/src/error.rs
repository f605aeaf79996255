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

use thiserror::Error;

/// Everything that can go wrong between raw user text and a roll result.
///
/// The `Display` output is meant to be shown to the user as is.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum DiceError {
    #[error("unreadable expression")]
    Parse,
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error("illegal characters in modifier")]
    Validation,
    #[error(transparent)]
    Evaluation(#[from] EvaluationErrors),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum RangeError {
    #[error("dice count out of range")]
    DiceCount,
    #[error("sides out of range")]
    Sides,
    #[error("keep count out of range")]
    KeepCount,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum EvaluationErrors {
    #[error("division by zero")]
    DivideByZero,
    #[error("overflow")]
    Overflow,
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("decimal literals are not supported")]
    DecimalLiteral,
    #[error("modifier nested too deeply")]
    TooDeep,
    #[error("malformed modifier")]
    Malformed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(DiceError::Parse.to_string(), "unreadable expression");
        assert_eq!(
            DiceError::from(RangeError::DiceCount).to_string(),
            "dice count out of range"
        );
        assert_eq!(
            DiceError::from(RangeError::Sides).to_string(),
            "sides out of range"
        );
        assert_eq!(
            DiceError::from(RangeError::KeepCount).to_string(),
            "keep count out of range"
        );
        assert_eq!(
            DiceError::Validation.to_string(),
            "illegal characters in modifier"
        );
        assert_eq!(
            DiceError::from(EvaluationErrors::DivideByZero).to_string(),
            "division by zero"
        );
    }
}
