//! Per-street betting bookkeeping.
//!
//! A `BettingState` is created by the street simulator that owns it, mutated
//! only inside that call, and dropped once the street's ask-moment is frozen.

use std::collections::{BTreeMap, BTreeSet};

use crate::training_engine::models::{ActionKind, PlayerActionRecord, Position};

#[derive(Debug, Clone, Default)]
pub struct BettingState {
    /// Chips in front of each seat this street. Seats with nothing in are absent.
    pub bets: BTreeMap<Position, u32>,
    pub folded: BTreeSet<Position>,
    pub last_aggressor: Option<Position>,
    /// Highest wager this street.
    pub current_bet: u32,
    /// Seats with chips committed that must answer the next raise.
    pub pending: Vec<Position>,
    /// Bets and raises made so far this street.
    pub raises: u32,
    pub log: Vec<PlayerActionRecord>,
    /// Chips each seat had behind when the street began. Seats without an
    /// entry are uncapped.
    pub stacks: BTreeMap<Position, u32>,
}

impl BettingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preflop start: both blinds posted, the big blind holds the wager.
    pub fn with_blinds(small_blind: u32, big_blind: u32) -> Self {
        let mut state = Self::new();
        state.bets.insert(Position::SB, small_blind);
        state.bets.insert(Position::BB, big_blind);
        state.pending = vec![Position::SB, Position::BB];
        state.last_aggressor = Some(Position::BB);
        state.current_bet = big_blind;
        state
    }

    /// Cap every later wager at the chips each seat brought into the street.
    pub fn with_stacks(mut self, stacks: BTreeMap<Position, u32>) -> Self {
        self.stacks = stacks;
        self
    }

    /// Most a seat can have in front of it this street.
    pub fn stack_of(&self, position: Position) -> u32 {
        self.stacks.get(&position).copied().unwrap_or(u32::MAX)
    }

    /// Everything the seat owns is already in front of it.
    pub fn is_all_in(&self, position: Position) -> bool {
        self.bet_of(position) >= self.stack_of(position)
    }

    pub fn bet_of(&self, position: Position) -> u32 {
        self.bets.get(&position).copied().unwrap_or(0)
    }

    pub fn is_folded(&self, position: Position) -> bool {
        self.folded.contains(&position)
    }

    pub fn record(&mut self, position: Position, action: ActionKind, amount: Option<u32>) {
        self.log.push(PlayerActionRecord::new(position, action, amount));
    }

    pub fn fold(&mut self, position: Position) {
        self.folded.insert(position);
        self.pending.retain(|p| *p != position);
        self.record(position, ActionKind::Fold, None);
    }

    pub fn check(&mut self, position: Position) {
        self.record(position, ActionKind::Check, None);
    }

    /// Match the current wager, or go all-in for less, and join the pending
    /// list.
    pub fn call(&mut self, position: Position) {
        let amount = self.current_bet.min(self.stack_of(position));
        self.bets.insert(position, amount);
        if !self.pending.contains(&position) {
            self.pending.push(position);
        }
        self.record(position, ActionKind::Call, Some(amount));
    }

    /// Seats not folded, in `order`.
    pub fn live_in(&self, order: &[Position]) -> Vec<Position> {
        order.iter().copied().filter(|p| !self.is_folded(*p)).collect()
    }
}
