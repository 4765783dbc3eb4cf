//! Weighted random decision helpers shared by the street simulators.
//!
//! All helpers take the caller's `Rng` so a seeded `StdRng` replays a hand
//! exactly.

use rand::{distributions::WeightedIndex, prelude::Distribution, seq::SliceRandom, Rng};

use crate::training_engine::{config::WeightedAction, models::ActionKind};

/// Pick one item with probability proportional to `weight(item)`.
///
/// Returns `None` for an empty slice or when every weight is zero.
pub fn weighted_choice<R, T, F>(rng: &mut R, items: &[T], weight: F) -> Option<T>
where
    R: Rng,
    T: Copy,
    F: Fn(&T) -> u32,
{
    let dist = WeightedIndex::<u32>::new(items.iter().map(&weight)).ok()?;
    Some(items[dist.sample(rng)])
}

/// Draw an action from a decision table.
pub fn weighted_action<R: Rng>(rng: &mut R, table: &[WeightedAction]) -> Option<ActionKind> {
    weighted_choice(rng, table, |w| w.weight).map(|w| w.action)
}

/// Uniformly pick one element.
pub fn pick<R: Rng, T: Copy>(rng: &mut R, items: &[T]) -> Option<T> {
    items.choose(rng).copied()
}

pub fn shuffle<R: Rng, T>(rng: &mut R, items: &mut [T]) {
    items.shuffle(rng);
}

/// New wager for a raise: the current bet times one of `multipliers`.
pub fn raise_to<R: Rng>(rng: &mut R, current_bet: u32, multipliers: &[u32]) -> u32 {
    let multiplier = pick(rng, multipliers).unwrap_or(2);
    current_bet.saturating_mul(multiplier)
}

/// Round `amount` to the nearest multiple of `increment` (halves round up).
pub fn snap_to_increment(amount: u32, increment: u32) -> u32 {
    if increment == 0 {
        return amount;
    }
    amount.saturating_add(increment / 2) / increment * increment
}

/// Opening bet sized as a fraction of the center pot, snapped to the big
/// blind and never below `min_bet_blinds` big blinds.
pub fn pot_fraction_bet<R: Rng>(
    rng: &mut R,
    center_pot: u32,
    fractions: &[f64],
    big_blind: u32,
    min_bet_blinds: u32,
) -> u32 {
    let fraction = pick(rng, fractions).unwrap_or(1.0);
    let raw = (center_pot as f64 * fraction).round() as u32;
    snap_to_increment(raw, big_blind).max(big_blind.saturating_mul(min_bet_blinds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn weighted_choice_never_picks_zero_weight() {
        let mut rng = StdRng::seed_from_u64(11);
        let items = [(1u8, 0u32), (2, 5), (3, 0)];
        for _ in 0..200 {
            assert_eq!(weighted_choice(&mut rng, &items, |i| i.1), Some((2, 5)));
        }
    }

    #[test]
    fn weighted_choice_handles_degenerate_tables() {
        let mut rng = StdRng::seed_from_u64(11);
        let empty: [(u8, u32); 0] = [];
        assert_eq!(weighted_choice(&mut rng, &empty, |i| i.1), None);
        assert_eq!(weighted_choice(&mut rng, &[(1u8, 0u32)], |i| i.1), None);
    }

    #[test]
    fn weighted_action_roughly_follows_weights() {
        let mut rng = StdRng::seed_from_u64(5);
        let table = [
            WeightedAction { action: ActionKind::Check, weight: 40 },
            WeightedAction { action: ActionKind::Bet, weight: 60 },
        ];
        let bets = (0..2000)
            .filter(|_| weighted_action(&mut rng, &table) == Some(ActionKind::Bet))
            .count();
        assert!((1050..1350).contains(&bets), "bets={bets}");
    }

    #[test]
    fn raise_uses_clean_multiples() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let amount = raise_to(&mut rng, 6, &[2, 3]);
            assert!(amount == 12 || amount == 18, "amount={amount}");
        }
    }

    #[test]
    fn snapping_rounds_to_nearest_blind() {
        assert_eq!(snap_to_increment(13, 5), 15);
        assert_eq!(snap_to_increment(12, 5), 10);
        assert_eq!(snap_to_increment(7, 2), 8);
        assert_eq!(snap_to_increment(7, 0), 7);
        assert_eq!(snap_to_increment(u32::MAX, 10), u32::MAX / 10 * 10);
    }

    #[test]
    fn pot_fraction_bet_is_floored_at_two_blinds() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pot_fraction_bet(&mut rng, 3, &[0.5], 2, 2), 4);
        assert_eq!(pot_fraction_bet(&mut rng, 40, &[0.5], 2, 2), 20);
        // 67% of 45 = 30.15 -> 30, snapped to a $5 increment.
        assert_eq!(pot_fraction_bet(&mut rng, 45, &[0.67], 5, 2), 30);
    }
}
