//! Pot-Limit Omaha pot-calculation engine.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: positions, actions, ask-moments, drill requests |
//! | `table`      | Six-seat acting orders and blind-level stack tables |
//! | `random`     | Weighted choice, shuffling and bet sizing helpers |
//! | `config`     | Tunable policy tables for the simulators |
//! | `error`      | `DrillError` returned at the engine boundary |
//! | `betting`    | Per-street bet map, folded set and pending list |
//! | `resolution` | Re-raise resolution: everyone with chips in answers a new wager |
//! | `pot`        | The pot formula, its explanation, and the single-question drill |
//! | `streets`    | Preflop and flop/turn simulators that freeze ask-moments |
//! | `deck`       | 52-card deck for the board run-out |
//! | `generator`  | `generate_hand()`: chains the streets for a difficulty tier |
//! | `view`       | JSON table state for the presentation layer |

pub mod betting;
pub mod config;
pub mod deck;
pub mod error;
pub mod generator;
pub mod models;
pub mod pot;
pub mod random;
pub mod resolution;
pub mod streets;
pub mod table;
pub mod view;

// Re-export the public API surface so callers can use
// `training_engine::generate_hand` without reaching into sub-modules.
pub use config::SimulationConfig;
pub use error::{DrillError, DrillResult};
pub use generator::{generate_hand, generate_hand_with};
pub use models::{
    ActionKind, AskMoment, DifficultyLevel, GeneratedHand, HandRequest, PlayerActionRecord,
    Position, PotRequest, PotValidation, PriorAction, SeatView, Street,
};
pub use pot::{calculate_pot_amount, generate_random_pot_request, validate_pot_answer};
pub use view::to_table_state;
