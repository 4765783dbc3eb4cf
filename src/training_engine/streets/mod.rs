//! Street betting simulators.
//!
//! Each simulator plays one street up to the moment a chosen seat asks for
//! the pot, then freezes that moment. Both share the signature:
//!
//! ```ignore
//! pub fn simulate<R: Rng>(
//!     rng: &mut R,
//!     ctx: &StreetContext<'_>,
//!     config: &SimulationConfig,
//! ) -> Option<StreetOutcome>
//! ```
//!
//! `None` means the street cannot produce a question and is skipped.

pub mod postflop;
pub mod preflop;

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use crate::training_engine::{
    betting::BettingState,
    models::{ActionKind, AskMoment, Card, Position, SeatView, Street},
    pot::{evaluate, next_center_pot, settled_contributions},
    random::pick,
    table::{BlindLevel, POSTFLOP_ORDER},
};

/// Everything a street simulator reads from the hand so far.
#[derive(Debug, Clone, Copy)]
pub struct StreetContext<'a> {
    pub street: Street,
    pub level: &'a BlindLevel,
    /// Chips carried in from earlier streets.
    pub center_pot: u32,
    /// Seats dealt into this street.
    pub live: &'a [Position],
    /// Stacks behind at the start of the street.
    pub stacks: &'a BTreeMap<Position, u32>,
    /// The full run-out; the street shows a prefix of it.
    pub board: &'a [Card],
}

#[derive(Debug, Clone)]
pub struct StreetOutcome {
    pub moment: AskMoment,
    /// Seats that see the next street.
    pub survivors: Vec<Position>,
    pub next_center_pot: u32,
    /// Chips each seat leaves in the pot this street.
    pub settled: BTreeMap<Position, u32>,
}

/// Apply a fold/check/call decision. A "check" facing chips to call
/// completes to the current bet; a "call" with nothing to call is a check.
pub(crate) fn apply_passive(state: &mut BettingState, actor: Position, decision: ActionKind) {
    match decision {
        ActionKind::Fold => state.fold(actor),
        _ if state.bet_of(actor) < state.current_bet => state.call(actor),
        _ => state.check(actor),
    }
}

/// Snapshot the betting state as an ask-moment.
pub(crate) fn freeze(
    ctx: &StreetContext<'_>,
    state: &BettingState,
    requester: Position,
    last_aggressor: Position,
) -> AskMoment {
    let breakdown = evaluate(ctx.center_pot, &state.bets, requester, last_aggressor);
    let community_cards = ctx.street.community_cards();

    let seats = POSTFLOP_ORDER
        .iter()
        .map(|&position| {
            let in_hand = ctx.live.contains(&position);
            let current_bet = if in_hand { state.bet_of(position) } else { 0 };
            let behind = ctx.stacks.get(&position).copied().unwrap_or(0);
            SeatView {
                position,
                stack: behind.saturating_sub(current_bet),
                folded: !in_hand || state.is_folded(position),
                current_bet,
                is_requester: position == requester,
                is_dealer: position.is_dealer(),
            }
        })
        .collect();

    AskMoment {
        street: ctx.street,
        community_cards,
        board: ctx.board.iter().take(community_cards as usize).copied().collect(),
        center_pot: ctx.center_pot,
        seats,
        actions: state.log.clone(),
        requester,
        last_aggressor,
        last_aggressor_amount: breakdown.last_amount,
        dead_money: breakdown.dead_money,
        correct_answer: breakdown.answer,
        explanation: breakdown.explanation(),
    }
}

/// Close out a street: check the moment is askable, freeze it, and pick who
/// carries on.
pub(crate) fn finish<R: Rng>(
    rng: &mut R,
    ctx: &StreetContext<'_>,
    state: &BettingState,
    requester: Position,
    extra_survivor_probability: f64,
) -> Option<StreetOutcome> {
    let last_aggressor = state.last_aggressor?;
    if last_aggressor == requester || state.is_folded(requester) {
        return None;
    }
    let live = state.live_in(ctx.live);
    if live.len() < 2 {
        debug!(street = %ctx.street, "fewer than two live seats, skipping street");
        return None;
    }

    let moment = freeze(ctx, state, requester, last_aggressor);

    let mut survivors = vec![requester, last_aggressor];
    let bystanders: Vec<Position> = live
        .iter()
        .copied()
        .filter(|p| !survivors.contains(p))
        .collect();
    if !bystanders.is_empty() && rng.gen_bool(extra_survivor_probability) {
        if let Some(extra) = pick(rng, &bystanders) {
            survivors.push(extra);
        }
    }
    survivors.sort();

    let answer = moment.correct_answer;
    let settled = settled_contributions(&state.bets, ctx.stacks, requester, last_aggressor, answer);
    let next_center = next_center_pot(ctx.center_pot, &settled);

    debug!(
        street = %ctx.street,
        requester = %requester,
        last_aggressor = %last_aggressor,
        answer,
        actions = moment.actions.len(),
        "froze ask moment"
    );

    Some(StreetOutcome { moment, survivors, next_center_pot: next_center, settled })
}
