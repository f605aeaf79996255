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

pub mod bot_manager;
pub mod bots;
pub mod client_utils;
pub mod config;

pub use bot_manager::{BotManager, BotManagerBuilder, StopListener};
pub use client_utils::{
    choices::{ChoiceError, ChoiceOutcome},
    commands::Visibility,
    rolls::{RollFailure, RollOutcome},
    ClientUtils, CommandResult,
};
pub use session_dice::{
    DiceError, DieFace, DisplayModel, EvaluationErrors, KeepMode, ModifierDisplay, RangeError,
};
