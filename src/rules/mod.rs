//! Transition rules for classic and battle mode.
//!
//! Both engines are pure functions of the current grid:
//! - `classic`: standard birth on 3, survival on 2 or 3
//! - `battle`: same rule, plus ownership by neighbor majority and scoring
//!
//! The match controller picks the engine through `engine_for`.

pub mod battle;
pub mod classic;
pub mod engine;

pub use battle::{next_generation_battle, BattleRules};
pub use classic::{next_generation, ClassicRules};
pub use engine::{engine_for, survives, Generation, RuleEngine};
