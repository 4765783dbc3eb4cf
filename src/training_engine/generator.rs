use std::collections::BTreeMap;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, warn};

use crate::training_engine::{
    betting::BettingState,
    config::SimulationConfig,
    deck::deal_board,
    error::DrillResult,
    models::{AskMoment, DifficultyLevel, GeneratedHand, HandRequest, Position, Street},
    streets::{freeze, postflop, preflop, StreetContext, StreetOutcome},
    table::{blind_level, BlindLevel, POSTFLOP_ORDER},
};

/// Entry point: build one training hand from a request.
///
/// `rng_seed: Some(_)` replays the same hand every time; `None` draws from
/// entropy. Uses the default simulation policy.
pub fn generate_hand(request: HandRequest) -> DrillResult<GeneratedHand> {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate_hand_with(
        &mut rng,
        request.difficulty,
        request.blind_level,
        &SimulationConfig::default(),
    )
}

/// Build a hand with an injected random source and policy.
///
/// Fails fast on an unsupported blind level or an invalid config. Otherwise
/// always returns a hand with 1–3 ask-moments: attempts that produce none are
/// discarded, and after `config.max_attempts` a minimal preflop-only hand is
/// returned.
pub fn generate_hand_with<R: Rng>(
    rng: &mut R,
    difficulty: DifficultyLevel,
    blind_level_amount: u32,
    config: &SimulationConfig,
) -> DrillResult<GeneratedHand> {
    let level = blind_level(blind_level_amount)?;
    config.validate()?;

    Ok(first_productive_attempt(
        rng,
        difficulty,
        &level,
        blind_level_amount,
        config.max_attempts,
        |rng| simulate_hand(rng, difficulty, &level, config),
    ))
}

/// Run `attempt` until it yields at least one moment, up to `max_attempts`
/// times, then fall back to the minimal preflop hand.
fn first_productive_attempt<R, F>(
    rng: &mut R,
    difficulty: DifficultyLevel,
    level: &BlindLevel,
    blind_level_amount: u32,
    max_attempts: u32,
    mut attempt: F,
) -> GeneratedHand
where
    R: Rng,
    F: FnMut(&mut R) -> Vec<AskMoment>,
{
    for n in 1..=max_attempts {
        let moments = attempt(rng);
        if !moments.is_empty() {
            debug!(%difficulty, attempt = n, moments = moments.len(), "generated hand");
            return GeneratedHand { blind_level: blind_level_amount, difficulty, moments };
        }
        warn!(%difficulty, attempt = n, "hand produced no ask moments, regenerating");
    }

    warn!(
        %difficulty,
        max_attempts,
        "attempt cap reached, returning minimal preflop hand"
    );
    GeneratedHand {
        blind_level: blind_level_amount,
        difficulty,
        moments: vec![fallback_moment(level)],
    }
}

/// Streets a difficulty tier may ask about.
fn streets_for(difficulty: DifficultyLevel) -> &'static [Street] {
    match difficulty {
        DifficultyLevel::Easy     => &[Street::Preflop],
        DifficultyLevel::Medium   => &[Street::Preflop, Street::Flop],
        DifficultyLevel::Advanced => &[Street::Preflop, Street::Flop, Street::Turn],
    }
}

/// One generation attempt. Streets run in order until one is skipped.
fn simulate_hand<R: Rng>(
    rng: &mut R,
    difficulty: DifficultyLevel,
    level: &BlindLevel,
    config: &SimulationConfig,
) -> Vec<AskMoment> {
    let mut stacks = level.shuffled_stacks(rng);
    let board = deal_board(rng);
    let mut live: Vec<Position> = POSTFLOP_ORDER.to_vec();
    let mut center_pot = 0u32;
    let mut moments = Vec::with_capacity(3);

    for &street in streets_for(difficulty) {
        let ctx = StreetContext {
            street,
            level,
            center_pot,
            live: &live,
            stacks: &stacks,
            board: &board,
        };
        let outcome = match street {
            Street::Preflop => preflop::simulate(rng, &ctx, config),
            Street::Flop | Street::Turn => postflop::simulate(rng, &ctx, config),
        };
        let Some(StreetOutcome { moment, survivors, next_center_pot, settled }) = outcome else {
            debug!(%street, "street skipped");
            break;
        };

        moments.push(moment);
        for (position, amount) in settled {
            if let Some(stack) = stacks.get_mut(&position) {
                *stack = stack.saturating_sub(amount);
            }
        }
        // All-in seats are done acting; the street needs two with chips.
        live = survivors
            .into_iter()
            .filter(|p| stacks.get(p).map_or(false, |behind| *behind > 0))
            .collect();
        center_pot = next_center_pot;
    }
    moments
}

/// UTG asks with only the blinds in: always a valid question.
fn fallback_moment(level: &BlindLevel) -> AskMoment {
    let stacks: BTreeMap<Position, u32> =
        POSTFLOP_ORDER.iter().copied().zip(level.stacks).collect();
    let ctx = StreetContext {
        street: Street::Preflop,
        level,
        center_pot: 0,
        live: &POSTFLOP_ORDER,
        stacks: &stacks,
        board: &[],
    };
    let state = BettingState::with_blinds(level.small_blind, level.big_blind);
    freeze(&ctx, &state, Position::UTG, Position::BB)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training_engine::error::DrillError;

    #[test]
    fn easy_hands_stop_after_preflop() {
        for seed in 0..50u64 {
            let hand = generate_hand(HandRequest::new(DifficultyLevel::Easy, 2).with_seed(seed)).unwrap();
            assert_eq!(hand.moments.len(), 1);
            assert_eq!(hand.moments[0].street, Street::Preflop);
            assert_eq!(hand.moments[0].community_cards, 0);
        }
    }

    #[test]
    fn difficulty_caps_the_number_of_moments() {
        for seed in 0..100u64 {
            let medium = generate_hand(HandRequest::new(DifficultyLevel::Medium, 5).with_seed(seed)).unwrap();
            assert!((1..=2).contains(&medium.moments.len()));
            let advanced = generate_hand(HandRequest::new(DifficultyLevel::Advanced, 5).with_seed(seed)).unwrap();
            assert!((1..=3).contains(&advanced.moments.len()));
        }
    }

    #[test]
    fn bad_blind_levels_fail_fast() {
        assert_eq!(
            generate_hand(HandRequest::new(DifficultyLevel::Easy, 0)),
            Err(DrillError::InvalidBlindLevel(0))
        );
        assert!(matches!(
            generate_hand(HandRequest::new(DifficultyLevel::Easy, 3)),
            Err(DrillError::UnsupportedBlindLevel { level: 3, .. })
        ));
    }

    #[test]
    fn invalid_config_fails_fast() {
        let mut config = SimulationConfig::default();
        config.max_attempts = 0;
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generate_hand_with(&mut rng, DifficultyLevel::Easy, 2, &config),
            Err(DrillError::Config(_))
        ));
    }

    #[test]
    fn fallback_hand_is_a_valid_utg_question() {
        let fallback = fallback_moment(&blind_level(10).unwrap());
        assert_eq!(fallback.requester, Position::UTG);
        assert_eq!(fallback.last_aggressor, Position::BB);
        assert_eq!(fallback.dead_money, 5);
        assert_eq!(fallback.correct_answer, 5 + 30);
        assert!(fallback.actions.is_empty());
        assert_eq!(fallback.live_positions().len(), 6);
    }

    #[test]
    fn attempt_cap_returns_the_fallback_hand() {
        let level = blind_level(5).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut calls = 0u32;
        let hand = first_productive_attempt(&mut rng, DifficultyLevel::Advanced, &level, 5, 4, |_| {
            calls += 1;
            Vec::new()
        });
        assert_eq!(calls, 4);
        assert_eq!(hand.blind_level, 5);
        assert_eq!(hand.difficulty, DifficultyLevel::Advanced);
        assert_eq!(hand.moments, vec![fallback_moment(&level)]);
        assert_eq!(hand.moments[0].requester, Position::UTG);
        assert_eq!(hand.moments[0].correct_answer, 2 + 15);
    }

    #[test]
    fn productive_attempt_stops_the_retry_loop() {
        let level = blind_level(2).unwrap();
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut calls = 0u32;
        let hand = first_productive_attempt(&mut rng, DifficultyLevel::Medium, &level, 2, 25, |rng| {
            calls += 1;
            if calls < 3 {
                Vec::new()
            } else {
                simulate_hand(rng, DifficultyLevel::Medium, &level, &config)
            }
        });
        assert_eq!(calls, 3);
        assert!(!hand.moments.is_empty());
    }

    #[test]
    fn single_attempt_config_still_produces_a_hand() {
        let mut config = SimulationConfig::default();
        config.max_attempts = 1;
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let hand = generate_hand_with(&mut rng, DifficultyLevel::Advanced, 20, &config).unwrap();
            assert!(!hand.moments.is_empty());
        }
    }
}
