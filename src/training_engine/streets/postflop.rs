//! Flop and turn: the survivors act in postflop order, with a real check
//! option until someone bets.

use rand::Rng;
use tracing::debug;

use crate::training_engine::{
    betting::BettingState,
    config::SimulationConfig,
    models::{ActionKind, Position},
    random::{pot_fraction_bet, raise_to, weighted_action, weighted_choice},
    resolution::apply_raise,
    streets::{apply_passive, finish, StreetContext, StreetOutcome},
    table::postflop_order_of,
};

/// Index into the acting order of the seat that asks. Either the first actor
/// or, more often, someone facing action toward the back of the order.
fn pick_requester_index<R: Rng>(rng: &mut R, actors: usize, config: &SimulationConfig) -> Option<usize> {
    if actors < 2 {
        return None;
    }
    if rng.gen_bool(config.postflop.first_actor_requester_probability) {
        return Some(0);
    }
    let later: Vec<usize> = (1..actors).collect();
    weighted_choice(rng, &later, |i| *i as u32)
}

pub fn simulate<R: Rng>(
    rng: &mut R,
    ctx: &StreetContext<'_>,
    config: &SimulationConfig,
) -> Option<StreetOutcome> {
    let order = postflop_order_of(ctx.live);
    let requester_idx = pick_requester_index(rng, order.len(), config)?;
    simulate_for(rng, ctx, config, order[requester_idx])
}

/// Play the street with a fixed requester.
pub fn simulate_for<R: Rng>(
    rng: &mut R,
    ctx: &StreetContext<'_>,
    config: &SimulationConfig,
    requester: Position,
) -> Option<StreetOutcome> {
    let policy = &config.postflop;
    let order = postflop_order_of(ctx.live);
    if order.len() < 2 {
        return None;
    }
    let requester_idx = order.iter().position(|p| *p == requester)?;
    let actors = &order[..requester_idx];
    let big_blind = ctx.level.big_blind;
    let mut state = BettingState::new().with_stacks(ctx.stacks.clone());

    for &actor in actors {
        if state.is_folded(actor) || state.is_all_in(actor) {
            continue;
        }
        let unopened = state.last_aggressor.is_none();

        let decision = if unopened {
            weighted_action(rng, &policy.unopened).unwrap_or(ActionKind::Check)
        } else if state.bet_of(actor) == state.current_bet {
            continue;
        } else {
            weighted_action(rng, &policy.facing_bet).unwrap_or(ActionKind::Fold)
        };

        match decision {
            ActionKind::Bet | ActionKind::Raise => {
                let amount = if unopened {
                    pot_fraction_bet(rng, ctx.center_pot, &policy.pot_fractions, big_blind, policy.min_bet_blinds)
                } else {
                    raise_to(rng, state.current_bet, &policy.reraise_multipliers)
                };
                apply_raise(rng, &mut state, actor, requester, amount, policy.resolution_fold_probability);
            }
            passive => apply_passive(&mut state, actor, passive),
        }
    }

    if state.last_aggressor.is_none() {
        // Checked around to the requester: there is no wager to ask about
        // unless the first seat still in with chips is made to lead out.
        let Some(leader) = actors
            .iter()
            .copied()
            .find(|p| !state.is_folded(*p) && !state.is_all_in(*p))
        else {
            debug!(street = %ctx.street, requester = %requester, "nobody left to lead, skipping street");
            return None;
        };
        let amount =
            pot_fraction_bet(rng, ctx.center_pot, &policy.pot_fractions, big_blind, policy.min_bet_blinds);
        state.log.retain(|r| r.action != ActionKind::Check);
        if !apply_raise(rng, &mut state, leader, requester, amount, policy.resolution_fold_probability) {
            return None;
        }
    }

    finish(rng, ctx, &state, requester, config.extra_survivor_probability)
}
