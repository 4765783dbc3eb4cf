//! Re-raise resolution.
//!
//! When a new wager lands, every seat that already has chips in this street
//! must answer it again, including the seat that made the previous raise.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use crate::training_engine::{
    betting::BettingState,
    models::{ActionKind, PlayerActionRecord, Position},
};

/// Ask each of `responders` to call `amount` or fold.
///
/// Folders keep whatever they already had in front of them (it becomes dead
/// money). Callers are raised to `amount`, or all-in for less when `stacks`
/// says they are short, and returned in order.
pub fn resolve_reraise<R: Rng>(
    rng: &mut R,
    responders: &[Position],
    amount: u32,
    folded: &mut BTreeSet<Position>,
    bets: &mut BTreeMap<Position, u32>,
    stacks: &BTreeMap<Position, u32>,
    fold_probability: f64,
    log: &mut Vec<PlayerActionRecord>,
) -> Vec<Position> {
    let mut still_active = Vec::with_capacity(responders.len());
    for &position in responders {
        if folded.contains(&position) {
            continue;
        }
        if rng.gen_bool(fold_probability) {
            folded.insert(position);
            log.push(PlayerActionRecord::new(position, ActionKind::Fold, None));
        } else {
            let matched = stacks.get(&position).map_or(amount, |behind| amount.min(*behind));
            bets.insert(position, matched);
            log.push(PlayerActionRecord::new(position, ActionKind::Call, Some(matched)));
            still_active.push(position);
        }
    }
    still_active
}

/// Seats that must answer a raise by `raiser`: the pending list minus the
/// raiser itself, the seat waiting to ask for the pot, and anyone all-in.
pub fn responders_for(state: &BettingState, raiser: Position, requester: Position) -> Vec<Position> {
    state
        .pending
        .iter()
        .copied()
        .filter(|p| *p != raiser && *p != requester && !state.is_folded(*p) && !state.is_all_in(*p))
        .collect()
}

/// Record a bet or raise to `amount` by `raiser`, resolve everyone pending,
/// and make the raiser the new last aggressor.
///
/// The wager is capped at the raiser's chips. When that leaves nothing above
/// the current bet the raiser just calls (or checks) and `false` is returned.
pub fn apply_raise<R: Rng>(
    rng: &mut R,
    state: &mut BettingState,
    raiser: Position,
    requester: Position,
    amount: u32,
    fold_probability: f64,
) -> bool {
    let amount = amount.min(state.stack_of(raiser));
    if amount <= state.current_bet {
        if state.bet_of(raiser) < state.current_bet {
            state.call(raiser);
        } else {
            state.check(raiser);
        }
        return false;
    }

    let kind = if state.raises == 0 && state.current_bet == 0 {
        ActionKind::Bet
    } else {
        ActionKind::Raise
    };
    state.record(raiser, kind, Some(amount));

    let responders = responders_for(state, raiser, requester);
    let mut callers = resolve_reraise(
        rng,
        &responders,
        amount,
        &mut state.folded,
        &mut state.bets,
        &state.stacks,
        fold_probability,
        &mut state.log,
    );

    state.bets.insert(raiser, amount);
    state.last_aggressor = Some(raiser);
    state.current_bet = amount;
    state.raises += 1;
    callers.push(raiser);
    state.pending = callers;
    true
}
