//! Simulation policy tables.
//!
//! Every probability, weight and sizing multiplier the street simulators use
//! lives here. The defaults are tunable simulation parameters, not poker
//! theory; load a replacement from JSON with [`SimulationConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::training_engine::{
    error::{DrillError, DrillResult},
    models::{ActionKind, Position},
};

/// Largest raise multiplier a policy may use.
pub const MAX_MULTIPLIER: u32 = 10;
/// Largest opening bet, as a fraction of the center pot.
pub const MAX_POT_FRACTION: f64 = 2.0;
/// Largest minimum opening bet, in big blinds.
pub const MAX_MIN_BET_BLINDS: u32 = 100;

/// One row of a decision table: the action and its relative weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedAction {
    pub action: ActionKind,
    pub weight: u32,
}

const fn wa(action: ActionKind, weight: u32) -> WeightedAction {
    WeightedAction { action, weight }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionWeight {
    pub position: Position,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreflopPolicy {
    /// Who asks for the pot, heavier toward the late seats and the big blind.
    pub requester_weights: Vec<PositionWeight>,
    /// No raise yet, no chips in.
    pub opener: Vec<WeightedAction>,
    /// No raise yet, blind already posted.
    pub blind: Vec<WeightedAction>,
    /// Facing a raise.
    pub facing_raise: Vec<WeightedAction>,
    pub open_raise_multipliers: Vec<u32>,
    pub reraise_multipliers: Vec<u32>,
    pub resolution_fold_probability: f64,
}

impl Default for PreflopPolicy {
    fn default() -> Self {
        Self {
            requester_weights: vec![
                PositionWeight { position: Position::UTG, weight: 5 },
                PositionWeight { position: Position::MP,  weight: 10 },
                PositionWeight { position: Position::CO,  weight: 20 },
                PositionWeight { position: Position::D,   weight: 25 },
                PositionWeight { position: Position::SB,  weight: 15 },
                PositionWeight { position: Position::BB,  weight: 25 },
            ],
            opener: vec![
                wa(ActionKind::Fold, 15),
                wa(ActionKind::Call, 20),
                wa(ActionKind::Raise, 65),
            ],
            blind: vec![
                wa(ActionKind::Fold, 25),
                wa(ActionKind::Check, 20),
                wa(ActionKind::Raise, 55),
            ],
            facing_raise: vec![
                wa(ActionKind::Fold, 35),
                wa(ActionKind::Call, 40),
                wa(ActionKind::Raise, 25),
            ],
            open_raise_multipliers: vec![2, 3, 4],
            reraise_multipliers: vec![2, 3],
            resolution_fold_probability: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostflopPolicy {
    /// Chance the first actor is the one asking.
    pub first_actor_requester_probability: f64,
    /// Nobody has bet this street.
    pub unopened: Vec<WeightedAction>,
    /// Facing a bet.
    pub facing_bet: Vec<WeightedAction>,
    /// Bet sizes as fractions of the center pot.
    pub pot_fractions: Vec<f64>,
    pub reraise_multipliers: Vec<u32>,
    /// Smallest opening bet, in big blinds.
    pub min_bet_blinds: u32,
    pub resolution_fold_probability: f64,
}

impl Default for PostflopPolicy {
    fn default() -> Self {
        Self {
            first_actor_requester_probability: 0.30,
            unopened: vec![
                wa(ActionKind::Check, 40),
                wa(ActionKind::Bet, 60),
            ],
            facing_bet: vec![
                wa(ActionKind::Fold, 30),
                wa(ActionKind::Call, 45),
                wa(ActionKind::Raise, 25),
            ],
            pot_fractions: vec![0.5, 0.67, 1.0],
            reraise_multipliers: vec![2, 3],
            min_bet_blinds: 2,
            resolution_fold_probability: 0.30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub preflop: PreflopPolicy,
    pub postflop: PostflopPolicy,
    /// Chance one uninvolved live seat also reaches the next street.
    pub extra_survivor_probability: f64,
    /// Generation attempts before falling back to the minimal hand.
    pub max_attempts: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            preflop: PreflopPolicy::default(),
            postflop: PostflopPolicy::default(),
            extra_survivor_probability: 0.40,
            max_attempts: 25,
        }
    }
}

impl SimulationConfig {
    /// Parse a (possibly partial) config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> DrillResult<Self> {
        let config: SimulationConfig =
            serde_json::from_str(json).map_err(|e| DrillError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DrillResult<()> {
        let pf = &self.preflop;
        let post = &self.postflop;

        check_weights("preflop.requester_weights", pf.requester_weights.iter().map(|w| w.weight))?;
        check_actions("preflop.opener", &pf.opener)?;
        check_actions("preflop.blind", &pf.blind)?;
        check_actions("preflop.facing_raise", &pf.facing_raise)?;
        check_actions("postflop.unopened", &post.unopened)?;
        check_actions("postflop.facing_bet", &post.facing_bet)?;

        check_multipliers("preflop.open_raise_multipliers", &pf.open_raise_multipliers)?;
        check_multipliers("preflop.reraise_multipliers", &pf.reraise_multipliers)?;
        check_multipliers("postflop.reraise_multipliers", &post.reraise_multipliers)?;
        if post.pot_fractions.is_empty()
            || post.pot_fractions.iter().any(|f| !(*f > 0.0 && *f <= MAX_POT_FRACTION))
        {
            return Err(DrillError::Config(format!(
                "postflop.pot_fractions must be non-empty, each within (0, {MAX_POT_FRACTION}]"
            )));
        }
        if !(1..=MAX_MIN_BET_BLINDS).contains(&post.min_bet_blinds) {
            return Err(DrillError::Config(format!(
                "postflop.min_bet_blinds must be within [1, {MAX_MIN_BET_BLINDS}]"
            )));
        }

        check_probability("preflop.resolution_fold_probability", pf.resolution_fold_probability)?;
        check_probability("postflop.resolution_fold_probability", post.resolution_fold_probability)?;
        check_probability(
            "postflop.first_actor_requester_probability",
            post.first_actor_requester_probability,
        )?;
        check_probability("extra_survivor_probability", self.extra_survivor_probability)?;

        if self.max_attempts == 0 {
            return Err(DrillError::Config("max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

fn check_weights(name: &str, weights: impl Iterator<Item = u32>) -> DrillResult<()> {
    let total: u64 = weights.map(u64::from).sum();
    if total == 0 || total > u64::from(u32::MAX) {
        return Err(DrillError::Config(format!(
            "{name} needs a positive total weight that fits in u32"
        )));
    }
    Ok(())
}

fn check_actions(name: &str, table: &[WeightedAction]) -> DrillResult<()> {
    check_weights(name, table.iter().map(|w| w.weight))
}

fn check_multipliers(name: &str, multipliers: &[u32]) -> DrillResult<()> {
    if multipliers.is_empty() || multipliers.iter().any(|m| !(2..=MAX_MULTIPLIER).contains(m)) {
        return Err(DrillError::Config(format!(
            "{name} must be non-empty with every entry within [2, {MAX_MULTIPLIER}]"
        )));
    }
    Ok(())
}

fn check_probability(name: &str, p: f64) -> DrillResult<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(DrillError::Config(format!("{name} must be within [0, 1], got {p}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SimulationConfig::from_json(
            r#"{ "max_attempts": 5, "postflop": { "pot_fractions": [1.0] } }"#,
        )
        .unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.postflop.pot_fractions, vec![1.0]);
        assert_eq!(config.postflop.facing_bet, PostflopPolicy::default().facing_bet);
        assert_eq!(config.preflop, PreflopPolicy::default());
    }

    #[test]
    fn decision_tables_load_from_json() {
        let config = SimulationConfig::from_json(
            r#"{ "preflop": { "opener": [ { "action": "raise", "weight": 1 } ] } }"#,
        )
        .unwrap();
        assert_eq!(config.preflop.opener, vec![wa(ActionKind::Raise, 1)]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_prob = SimulationConfig::from_json(r#"{ "extra_survivor_probability": 1.5 }"#);
        assert!(matches!(bad_prob, Err(DrillError::Config(_))));

        let zero_weights = SimulationConfig::from_json(
            r#"{ "postflop": { "unopened": [ { "action": "check", "weight": 0 } ] } }"#,
        );
        assert!(matches!(zero_weights, Err(DrillError::Config(_))));

        let bad_json = SimulationConfig::from_json("{ not json");
        assert!(matches!(bad_json, Err(DrillError::Config(_))));

        let flat_raise = SimulationConfig::from_json(
            r#"{ "preflop": { "reraise_multipliers": [1] } }"#,
        );
        assert!(matches!(flat_raise, Err(DrillError::Config(_))));
    }

    #[test]
    fn oversized_sizing_is_rejected() {
        let huge_open = SimulationConfig::from_json(
            r#"{ "preflop": { "open_raise_multipliers": [2000000000],
                              "opener": [ { "action": "raise", "weight": 1 } ] } }"#,
        );
        assert!(matches!(huge_open, Err(DrillError::Config(_))));

        let huge_fraction = SimulationConfig::from_json(r#"{ "postflop": { "pot_fractions": [5.0] } }"#);
        assert!(matches!(huge_fraction, Err(DrillError::Config(_))));

        let huge_min_bet = SimulationConfig::from_json(r#"{ "postflop": { "min_bet_blinds": 4000000000 } }"#);
        assert!(matches!(huge_min_bet, Err(DrillError::Config(_))));

        let overflowing_weights = SimulationConfig::from_json(
            r#"{ "postflop": { "facing_bet": [ { "action": "fold", "weight": 4000000000 },
                                               { "action": "call", "weight": 4000000000 } ] } }"#,
        );
        assert!(matches!(overflowing_weights, Err(DrillError::Config(_))));

        let at_the_bounds = SimulationConfig::from_json(
            r#"{ "preflop": { "open_raise_multipliers": [10] }, "postflop": { "pot_fractions": [2.0] } }"#,
        );
        assert!(at_the_bounds.is_ok());
    }
}
