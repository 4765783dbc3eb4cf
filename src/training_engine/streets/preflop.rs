//! Preflop street: blinds posted, seats act in preflop order up to the
//! seat that asks for the pot.

use rand::Rng;

use crate::training_engine::{
    betting::BettingState,
    config::SimulationConfig,
    models::{ActionKind, Position},
    random::{raise_to, weighted_action, weighted_choice},
    resolution::apply_raise,
    streets::{apply_passive, finish, StreetContext, StreetOutcome},
    table::PREFLOP_ORDER,
};

/// Draw the seat that asks for the pot.
pub fn pick_requester<R: Rng>(rng: &mut R, config: &SimulationConfig) -> Option<Position> {
    weighted_choice(rng, &config.preflop.requester_weights, |w| w.weight).map(|w| w.position)
}

pub fn simulate<R: Rng>(
    rng: &mut R,
    ctx: &StreetContext<'_>,
    config: &SimulationConfig,
) -> Option<StreetOutcome> {
    let requester = pick_requester(rng, config)?;
    simulate_for(rng, ctx, config, requester)
}

/// Play the street with a fixed requester.
pub fn simulate_for<R: Rng>(
    rng: &mut R,
    ctx: &StreetContext<'_>,
    config: &SimulationConfig,
    requester: Position,
) -> Option<StreetOutcome> {
    let policy = &config.preflop;
    let mut state = BettingState::with_blinds(ctx.level.small_blind, ctx.level.big_blind)
        .with_stacks(ctx.stacks.clone());

    let requester_idx = PREFLOP_ORDER.iter().position(|p| *p == requester)?;
    let actors = &PREFLOP_ORDER[..requester_idx];

    for (i, &actor) in actors.iter().enumerate() {
        if state.is_folded(actor) || state.is_all_in(actor) {
            continue;
        }
        let committed = state.bet_of(actor);

        // The requester must face someone else's wager. In an unraised pot
        // that would leave the big blind asking about its own blind.
        let must_raise = i + 1 == actors.len() && state.last_aggressor == Some(requester);

        let decision = if must_raise {
            ActionKind::Raise
        } else if state.raises == 0 {
            let table = if committed == 0 { &policy.opener } else { &policy.blind };
            weighted_action(rng, table).unwrap_or(ActionKind::Fold)
        } else if committed == state.current_bet {
            // Already matched, nothing new to answer.
            continue;
        } else {
            weighted_action(rng, &policy.facing_raise).unwrap_or(ActionKind::Fold)
        };

        match decision {
            ActionKind::Bet | ActionKind::Raise => {
                let multipliers = if state.raises == 0 {
                    &policy.open_raise_multipliers
                } else {
                    &policy.reraise_multipliers
                };
                let amount = raise_to(rng, state.current_bet, multipliers);
                apply_raise(rng, &mut state, actor, requester, amount, policy.resolution_fold_probability);
            }
            passive => apply_passive(&mut state, actor, passive),
        }
    }

    finish(rng, ctx, &state, requester, config.extra_survivor_probability)
}
