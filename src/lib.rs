//! # plo_pot_drill
//!
//! An offline, deterministic Pot-Limit Omaha "how much is the pot?" drill
//! generator.
//!
//! The engine simulates a plausible betting sequence at a six-handed table,
//! freezes it at one to three moments where a player asks the dealer for the
//! pot, and computes the correct answer together with a line-by-line
//! derivation:
//!
//! ```text
//! pot = dead money + 3 × last wager
//! ```
//!
//! ## How it works
//!
//! 1. Create a [`HandRequest`] with a difficulty, a blind level (the big-blind
//!    amount) and an optional RNG seed.
//! 2. Call [`generate_hand`]: the engine deals stacks, plays preflop up to the
//!    asking seat, then (for harder tiers) the flop and turn, carrying the
//!    center pot forward.
//! 3. The returned [`GeneratedHand`] holds the [`AskMoment`]s: seat states,
//!    the action log, the correct answer and its explanation, ready to display.
//!
//! A simpler single-question drill shares the same formula:
//! [`generate_random_pot_request`], [`calculate_pot_amount`] and
//! [`validate_pot_answer`].
//!
//! ## Quick start
//!
//! ```rust
//! use plo_pot_drill::{generate_hand, DifficultyLevel, HandRequest};
//!
//! let hand = generate_hand(HandRequest::new(DifficultyLevel::Medium, 2).with_seed(42))
//!     .expect("2 is a supported blind level");
//!
//! for moment in &hand.moments {
//!     println!("{}: {} asks for the pot", moment.street, moment.requester);
//!     for action in &moment.actions {
//!         println!("  {action}");
//!     }
//!     println!("{}", moment.explanation);
//! }
//! ```

pub mod training_engine;

// Convenience re-exports so callers can use `plo_pot_drill::generate_hand`
// directly without reaching into `training_engine::`.
pub use training_engine::{
    calculate_pot_amount, generate_hand, generate_hand_with, generate_random_pot_request,
    to_table_state, validate_pot_answer, ActionKind, AskMoment, DifficultyLevel, DrillError,
    DrillResult, GeneratedHand, HandRequest, PlayerActionRecord, Position, PotRequest,
    PotValidation, PriorAction, SeatView, SimulationConfig, Street,
};
