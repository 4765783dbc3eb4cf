//! Pot-limit "pot" arithmetic.
//!
//! The dealer's pot is the largest legal raise-to amount:
//!
//! ```text
//! pot = dead money + 3 × last wager
//! ```
//!
//! where dead money is the center pot plus every chip in front of players
//! other than the one asking and the one who made the last wager. Folded
//! players' chips stay in the dead-money sum.
//!
//! Two entry points share the formula: [`evaluate`] for frozen multi-street
//! betting states, and [`calculate_pot_amount`] / [`validate_pot_answer`] for
//! the flat single-question drill.

use std::collections::BTreeMap;

use rand::Rng;

use crate::training_engine::{
    config::WeightedAction,
    models::{ActionKind, Position, PotRequest, PotValidation, PriorAction},
    random::{pick, raise_to, shuffle, weighted_action},
    table::{BLIND_LEVELS, PREFLOP_ORDER},
};

// ---------------------------------------------------------------------------
// Multi-street evaluator
// ---------------------------------------------------------------------------

/// The pot answer for one frozen betting state, with every term kept so the
/// derivation can be shown line by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotBreakdown {
    pub center_pot: u32,
    /// Dead contributions this street, in seat order.
    pub contributions: Vec<(Position, u32)>,
    pub last_aggressor: Position,
    pub last_amount: u32,
    pub dead_money: u32,
    pub answer: u32,
}

impl PotBreakdown {
    pub fn explanation(&self) -> String {
        let mut lines = Vec::with_capacity(self.contributions.len() + 3);
        if self.center_pot > 0 {
            lines.push(format!("Center pot: ${}", self.center_pot));
        }
        for (position, amount) in &self.contributions {
            lines.push(format!("{position}: ${amount}"));
        }
        lines.push(format!("Last action: ${} ({})", self.last_amount, self.last_aggressor));
        lines.push(format!(
            "Pot = ${} + 3×${} = ${}",
            self.dead_money, self.last_amount, self.answer
        ));
        lines.join("\n")
    }
}

pub fn evaluate(
    center_pot: u32,
    bets: &BTreeMap<Position, u32>,
    requester: Position,
    last_aggressor: Position,
) -> PotBreakdown {
    let contributions: Vec<(Position, u32)> = bets
        .iter()
        .filter(|(p, amount)| **p != requester && **p != last_aggressor && **amount > 0)
        .map(|(p, amount)| (*p, *amount))
        .collect();
    let dead_money = contributions
        .iter()
        .fold(center_pot, |total, (_, a)| total.saturating_add(*a));
    let last_amount = bets.get(&last_aggressor).copied().unwrap_or(0);
    PotBreakdown {
        center_pot,
        contributions,
        last_aggressor,
        last_amount,
        dead_money,
        answer: dead_money.saturating_add(last_amount.saturating_mul(3)),
    }
}

pub fn pot_amount(
    center_pot: u32,
    bets: &BTreeMap<Position, u32>,
    requester: Position,
    last_aggressor: Position,
) -> u32 {
    evaluate(center_pot, bets, requester, last_aggressor).answer
}

pub fn pot_explanation(
    center_pot: u32,
    bets: &BTreeMap<Position, u32>,
    requester: Position,
    last_aggressor: Position,
) -> String {
    evaluate(center_pot, bets, requester, last_aggressor).explanation()
}

/// What each seat ends up putting in this street, assuming the requester and
/// the last aggressor both finish at the frozen answer. Neither can put in
/// more than its entry in `stacks`; seats without one are uncapped.
pub fn settled_contributions(
    bets: &BTreeMap<Position, u32>,
    stacks: &BTreeMap<Position, u32>,
    requester: Position,
    last_aggressor: Position,
    answer: u32,
) -> BTreeMap<Position, u32> {
    let mut settled: BTreeMap<Position, u32> = bets
        .iter()
        .filter(|(p, _)| **p != requester && **p != last_aggressor)
        .map(|(p, a)| (*p, *a))
        .collect();
    for position in [requester, last_aggressor] {
        let behind = stacks.get(&position).copied().unwrap_or(u32::MAX);
        settled.insert(position, answer.min(behind));
    }
    settled
}

/// Center pot carried into the next street.
pub fn next_center_pot(center_pot: u32, settled: &BTreeMap<Position, u32>) -> u32 {
    settled.values().fold(center_pot, |total, a| total.saturating_add(*a))
}

// ---------------------------------------------------------------------------
// Single-question drill
// ---------------------------------------------------------------------------

/// Amount of the last bet or raise, or the big blind when nobody has raised.
fn last_wager(request: &PotRequest) -> (u32, Option<Position>) {
    request
        .prior_actions
        .iter()
        .rev()
        .find(|a| a.action.is_aggressive())
        .map(|a| (a.amount, Some(a.position)))
        .unwrap_or((request.big_blind, None))
}

fn drill_dead_money(request: &PotRequest) -> u32 {
    request
        .prior_actions
        .iter()
        .fold(request.small_blind.saturating_add(request.big_blind), |total, a| {
            total.saturating_add(a.amount)
        })
}

pub fn calculate_pot_amount(request: &PotRequest) -> u32 {
    let (last, _) = last_wager(request);
    drill_dead_money(request).saturating_add(last.saturating_mul(3))
}

fn drill_explanation(request: &PotRequest) -> String {
    let (last, who) = last_wager(request);
    let dead = drill_dead_money(request);
    let mut lines = vec![format!("Blinds: ${} + ${}", request.small_blind, request.big_blind)];
    for a in request.prior_actions.iter().filter(|a| a.amount > 0) {
        lines.push(format!("{} {} ${}", a.position, a.action, a.amount));
    }
    let who = who.map(|p| p.to_string()).unwrap_or_else(|| "big blind".to_string());
    lines.push(format!("Last action: ${last} ({who})"));
    lines.push(format!("Pot = ${dead} + 3×${last} = ${}", dead + 3 * last));
    lines.join("\n")
}

pub fn validate_pot_answer(request: &PotRequest, user_answer: u32) -> PotValidation {
    let correct_answer = calculate_pot_amount(request);
    PotValidation {
        is_correct: user_answer == correct_answer,
        user_answer,
        correct_answer,
        explanation: drill_explanation(request),
    }
}

const LIMPER_TABLE: [WeightedAction; 2] = [
    WeightedAction { action: ActionKind::Fold, weight: 50 },
    WeightedAction { action: ActionKind::Call, weight: 50 },
];

const FACING_TABLE: [WeightedAction; 3] = [
    WeightedAction { action: ActionKind::Fold, weight: 30 },
    WeightedAction { action: ActionKind::Call, weight: 45 },
    WeightedAction { action: ActionKind::Raise, weight: 25 },
];

const OPEN_MULTIPLIERS: [u32; 3] = [3, 4, 5];
const RERAISE_MULTIPLIERS: [u32; 2] = [2, 3];

/// Random preflop question with 2–4 prior actions, exactly one of which
/// opens the betting.
pub fn generate_random_pot_request<R: Rng>(rng: &mut R) -> PotRequest {
    let level = pick(rng, BLIND_LEVELS).unwrap_or(BLIND_LEVELS[0]);

    // Actors come from the non-blind seats; the requester sits behind them.
    let count = rng.gen_range(2..=4usize);
    let mut seat_indices = [0usize, 1, 2, 3];
    shuffle(rng, &mut seat_indices);
    let mut actors: Vec<usize> = seat_indices[..count].to_vec();
    actors.sort_unstable();
    let last_actor = actors[count - 1];
    let requester_index = rng.gen_range(last_actor + 1..PREFLOP_ORDER.len());
    let requester = PREFLOP_ORDER[requester_index];

    let opener = rng.gen_range(0..count);
    let mut current = level.big_blind;
    let mut prior_actions = Vec::with_capacity(count);
    for (i, &seat) in actors.iter().enumerate() {
        let position = PREFLOP_ORDER[seat];
        let action = if i < opener {
            match weighted_action(rng, &LIMPER_TABLE).unwrap_or(ActionKind::Call) {
                ActionKind::Call => PriorAction { position, action: ActionKind::Call, amount: current },
                _ => PriorAction { position, action: ActionKind::Fold, amount: 0 },
            }
        } else if i == opener {
            current = raise_to(rng, level.big_blind, &OPEN_MULTIPLIERS);
            PriorAction { position, action: ActionKind::Bet, amount: current }
        } else {
            match weighted_action(rng, &FACING_TABLE).unwrap_or(ActionKind::Call) {
                ActionKind::Raise => {
                    current = raise_to(rng, current, &RERAISE_MULTIPLIERS);
                    PriorAction { position, action: ActionKind::Raise, amount: current }
                }
                ActionKind::Call => PriorAction { position, action: ActionKind::Call, amount: current },
                _ => PriorAction { position, action: ActionKind::Fold, amount: 0 },
            }
        };
        prior_actions.push(action);
    }

    PotRequest {
        small_blind: level.small_blind,
        big_blind: level.big_blind,
        requester,
        prior_actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::training_engine::table::supported_blind_levels;

    fn bets(entries: &[(Position, u32)]) -> BTreeMap<Position, u32> {
        entries.iter().copied().collect()
    }

    #[test]
    fn big_blind_asks_after_utg_bets_ten() {
        let b = bets(&[(Position::SB, 1), (Position::BB, 2), (Position::UTG, 10)]);
        let breakdown = evaluate(0, &b, Position::BB, Position::UTG);
        assert_eq!(breakdown.dead_money, 1);
        assert_eq!(breakdown.answer, 31);
        assert_eq!(
            breakdown.explanation(),
            "SB: $1\nLast action: $10 (UTG)\nPot = $1 + 3×$10 = $31"
        );
    }

    #[test]
    fn utg_opening_pot_is_seven_at_one_two() {
        let b = bets(&[(Position::SB, 1), (Position::BB, 2)]);
        assert_eq!(pot_amount(0, &b, Position::UTG, Position::BB), 7);
    }

    #[test]
    fn center_pot_and_folded_chips_are_dead_money() {
        // MP bet 10 then folded to CO's raise; SB called 30; D asks.
        let b = bets(&[(Position::SB, 30), (Position::MP, 10), (Position::CO, 30)]);
        let breakdown = evaluate(40, &b, Position::D, Position::CO);
        assert_eq!(breakdown.dead_money, 80);
        assert_eq!(breakdown.answer, 170);
        let text = pot_explanation(40, &b, Position::D, Position::CO);
        assert!(text.starts_with("Center pot: $40\nSB: $30\nMP: $10\n"), "{text}");
        assert!(text.ends_with("Pot = $80 + 3×$30 = $170"), "{text}");
    }

    #[test]
    fn next_street_assumes_both_finish_at_the_answer() {
        let b = bets(&[(Position::SB, 1), (Position::BB, 2), (Position::UTG, 10)]);
        // SB's 1 stays dead; BB and UTG both end at 31.
        let settled = settled_contributions(&b, &BTreeMap::new(), Position::BB, Position::UTG, 31);
        assert_eq!(settled[&Position::SB], 1);
        assert_eq!(settled[&Position::UTG], 31);
        assert_eq!(next_center_pot(0, &settled), 63);
    }

    #[test]
    fn short_stack_settles_all_in() {
        let b = bets(&[(Position::SB, 1), (Position::BB, 2), (Position::UTG, 10)]);
        let stacks = bets(&[(Position::BB, 20), (Position::UTG, 300)]);
        let settled = settled_contributions(&b, &stacks, Position::BB, Position::UTG, 31);
        assert_eq!(settled[&Position::BB], 20);
        assert_eq!(settled[&Position::UTG], 31);
        assert_eq!(next_center_pot(5, &settled), 5 + 1 + 20 + 31);
    }

    #[test]
    fn huge_wagers_saturate_instead_of_overflowing() {
        let b = bets(&[(Position::SB, u32::MAX), (Position::BB, u32::MAX / 2)]);
        let breakdown = evaluate(u32::MAX, &b, Position::UTG, Position::BB);
        assert_eq!(breakdown.dead_money, u32::MAX);
        assert_eq!(breakdown.answer, u32::MAX);
        let settled = settled_contributions(&b, &BTreeMap::new(), Position::UTG, Position::BB, u32::MAX);
        assert_eq!(next_center_pot(u32::MAX, &settled), u32::MAX);
    }

    #[test]
    fn drill_single_bet_before_big_blind() {
        let request = PotRequest {
            small_blind: 1,
            big_blind: 2,
            requester: Position::BB,
            prior_actions: vec![PriorAction { position: Position::UTG, action: ActionKind::Bet, amount: 10 }],
        };
        assert_eq!(calculate_pot_amount(&request), 43);

        let right = validate_pot_answer(&request, 43);
        assert!(right.is_correct);
        assert!(right.explanation.ends_with("Pot = $13 + 3×$10 = $43"), "{}", right.explanation);

        let wrong = validate_pot_answer(&request, 40);
        assert!(!wrong.is_correct);
        assert_eq!(wrong.user_answer, 40);
        assert_eq!(wrong.correct_answer, 43);
    }

    #[test]
    fn drill_uses_the_last_raise() {
        let request = PotRequest {
            small_blind: 1,
            big_blind: 2,
            requester: Position::D,
            prior_actions: vec![
                PriorAction { position: Position::UTG, action: ActionKind::Bet, amount: 6 },
                PriorAction { position: Position::MP, action: ActionKind::Raise, amount: 18 },
                PriorAction { position: Position::CO, action: ActionKind::Call, amount: 18 },
            ],
        };
        // dead = 1 + 2 + 6 + 18 + 18 = 45
        assert_eq!(calculate_pot_amount(&request), 45 + 54);
    }

    #[test]
    fn random_requests_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..300 {
            let request = generate_random_pot_request(&mut rng);
            let n = request.prior_actions.len();
            assert!((2..=4).contains(&n), "got {n} prior actions");
            let aggressive = request.prior_actions.iter().filter(|a| a.action == ActionKind::Bet).count();
            assert_eq!(aggressive, 1, "{request:?}");
            assert!(request.prior_actions.iter().all(|a| a.position != request.requester));
            assert!(supported_blind_levels().contains(&request.big_blind));
            assert!(calculate_pot_amount(&request) > 3 * request.big_blind);
        }
    }
}
