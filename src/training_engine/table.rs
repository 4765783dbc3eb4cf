//! Fixed six-seat table: acting orders and the blind-level stack tables.

use std::collections::BTreeMap;

use rand::Rng;

use crate::training_engine::{
    error::{DrillError, DrillResult},
    models::Position,
    random::shuffle,
};

// ---------------------------------------------------------------------------
// Acting orders
// ---------------------------------------------------------------------------

/// Preflop: blinds act last.
pub const PREFLOP_ORDER: [Position; 6] = [
    Position::UTG, Position::MP, Position::CO,
    Position::D,   Position::SB, Position::BB,
];

/// Flop and later: small blind acts first.
pub const POSTFLOP_ORDER: [Position; 6] = [
    Position::SB,  Position::BB, Position::UTG,
    Position::MP,  Position::CO, Position::D,
];

/// Postflop order filtered to the given live seats.
pub fn postflop_order_of(live: &[Position]) -> Vec<Position> {
    POSTFLOP_ORDER.iter().copied().filter(|p| live.contains(p)).collect()
}

// ---------------------------------------------------------------------------
// Blind levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlindLevel {
    pub small_blind: u32,
    pub big_blind: u32,
    pub stacks: [u32; 6],
}

pub const BLIND_LEVELS: &[BlindLevel] = &[
    BlindLevel { small_blind: 1,  big_blind: 2,  stacks: [150, 200, 240, 300, 360, 500] },
    BlindLevel { small_blind: 2,  big_blind: 5,  stacks: [400, 500, 600, 750, 900, 1200] },
    BlindLevel { small_blind: 5,  big_blind: 10, stacks: [800, 1000, 1200, 1500, 1800, 2500] },
    BlindLevel { small_blind: 10, big_blind: 20, stacks: [1600, 2000, 2400, 3000, 3600, 5000] },
];

pub fn supported_blind_levels() -> Vec<u32> {
    BLIND_LEVELS.iter().map(|l| l.big_blind).collect()
}

/// Look up a blind level by its big-blind amount.
pub fn blind_level(level: u32) -> DrillResult<BlindLevel> {
    if level == 0 {
        return Err(DrillError::InvalidBlindLevel(level));
    }
    BLIND_LEVELS
        .iter()
        .find(|l| l.big_blind == level)
        .copied()
        .ok_or_else(|| DrillError::UnsupportedBlindLevel {
            level,
            supported: supported_blind_levels(),
        })
}

impl BlindLevel {
    /// Deal the level's six stacks to the seats in random order.
    pub fn shuffled_stacks<R: Rng>(&self, rng: &mut R) -> BTreeMap<Position, u32> {
        let mut stacks = self.stacks;
        shuffle(rng, &mut stacks);
        POSTFLOP_ORDER.iter().copied().zip(stacks).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn orders_cover_all_six_seats() {
        for order in [PREFLOP_ORDER, POSTFLOP_ORDER] {
            let mut sorted = order.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), 6);
        }
        assert_eq!(PREFLOP_ORDER[5], Position::BB);
        assert_eq!(POSTFLOP_ORDER[0], Position::SB);
    }

    #[test]
    fn postflop_order_keeps_table_order() {
        let live = [Position::D, Position::BB, Position::CO];
        assert_eq!(
            postflop_order_of(&live),
            vec![Position::BB, Position::CO, Position::D]
        );
    }

    #[test]
    fn blind_level_lookup() {
        let level = blind_level(2).unwrap();
        assert_eq!((level.small_blind, level.big_blind), (1, 2));
        assert_eq!(blind_level(0), Err(DrillError::InvalidBlindLevel(0)));
        assert!(matches!(
            blind_level(7),
            Err(DrillError::UnsupportedBlindLevel { level: 7, .. })
        ));
    }

    #[test]
    fn shuffled_stacks_use_the_level_table() {
        let level = blind_level(5).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let stacks = level.shuffled_stacks(&mut rng);
        assert_eq!(stacks.len(), 6);
        let mut dealt: Vec<u32> = stacks.values().copied().collect();
        dealt.sort_unstable();
        assert_eq!(dealt, level.stacks.to_vec());
    }
}
