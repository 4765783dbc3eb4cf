use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::training_engine::error::DrillError;

// ---------------------------------------------------------------------------
// Card primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suit::Clubs => write!(f, "c"),
            Suit::Diamonds => write!(f, "d"),
            Suit::Hearts => write!(f, "h"),
            Suit::Spades => write!(f, "s"),
        }
    }
}

/// Rank 2..=14 where 14 = Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub fn symbol(self) -> &'static str {
        match self.0 {
            2 => "2", 3 => "3", 4 => "4", 5 => "5", 6 => "6",
            7 => "7", 8 => "8", 9 => "9", 10 => "T",
            11 => "J", 12 => "Q", 13 => "K", 14 => "A",
            _ => "?",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

// ---------------------------------------------------------------------------
// Table positions
// ---------------------------------------------------------------------------

/// One of the six fixed seats. Declaration order is the seat order around
/// the table starting from the small blind, which is also the postflop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    SB,   // Small Blind
    BB,   // Big Blind
    UTG,  // Under the Gun
    MP,   // Middle Position
    CO,   // Cutoff
    D,    // Dealer (button)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::SB  => "SB",
            Position::BB  => "BB",
            Position::UTG => "UTG",
            Position::MP  => "MP",
            Position::CO  => "CO",
            Position::D   => "D",
        };
        write!(f, "{}", s)
    }
}

impl Position {
    pub fn is_dealer(self) -> bool {
        self == Position::D
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Call,
    Check,
    Bet,
    Raise,
}

impl ActionKind {
    /// Bets and raises set a new wager everyone else must answer.
    pub fn is_aggressive(self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Fold  => write!(f, "folds"),
            ActionKind::Call  => write!(f, "calls"),
            ActionKind::Check => write!(f, "checks"),
            ActionKind::Bet   => write!(f, "bets"),
            ActionKind::Raise => write!(f, "raises to"),
        }
    }
}

/// One append-only entry of a street's action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerActionRecord {
    pub position: Position,
    pub action: ActionKind,
    pub amount: Option<u32>,
}

impl PlayerActionRecord {
    pub fn new(position: Position, action: ActionKind, amount: Option<u32>) -> Self {
        Self { position, action, amount }
    }
}

impl fmt::Display for PlayerActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(amount) => write!(f, "{} {} ${}", self.position, self.action, amount),
            None         => write!(f, "{} {}", self.position, self.action),
        }
    }
}

// ---------------------------------------------------------------------------
// Streets and difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
}

impl Street {
    /// Community cards visible while this street is being bet.
    pub fn community_cards(self) -> u8 {
        match self {
            Street::Preflop => 0,
            Street::Flop    => 3,
            Street::Turn    => 4,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "preflop"),
            Street::Flop    => write!(f, "flop"),
            Street::Turn    => write!(f, "turn"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Advanced,
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyLevel::Easy     => write!(f, "easy"),
            DifficultyLevel::Medium   => write!(f, "medium"),
            DifficultyLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for DifficultyLevel {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy"     => Ok(DifficultyLevel::Easy),
            "medium"   => Ok(DifficultyLevel::Medium),
            "advanced" => Ok(DifficultyLevel::Advanced),
            _ => Err(DrillError::UnknownDifficulty(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Hand generation request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRequest {
    pub difficulty: DifficultyLevel,
    /// Big-blind amount; selects the blinds and the stack table.
    pub blind_level: u32,
    pub rng_seed: Option<u64>,
}

impl HandRequest {
    /// Request with an entropy-seeded random source.
    pub fn new(difficulty: DifficultyLevel, blind_level: u32) -> Self {
        Self { difficulty, blind_level, rng_seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

/// Per-seat display state at the moment the pot question is asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub position: Position,
    pub stack: u32,
    pub folded: bool,
    pub current_bet: u32,
    pub is_requester: bool,
    pub is_dealer: bool,
}

/// A frozen point in the hand where `requester` asks for the pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskMoment {
    pub street: Street,
    pub community_cards: u8,
    /// The visible part of the board (`community_cards` long).
    pub board: Vec<Card>,
    /// Chips carried in from earlier streets.
    pub center_pot: u32,
    pub seats: Vec<SeatView>,
    pub actions: Vec<PlayerActionRecord>,
    pub requester: Position,
    pub last_aggressor: Position,
    pub last_aggressor_amount: u32,
    pub dead_money: u32,
    pub correct_answer: u32,
    pub explanation: String,
}

impl AskMoment {
    pub fn seat(&self, position: Position) -> Option<&SeatView> {
        self.seats.iter().find(|s| s.position == position)
    }

    /// Seats still holding cards at freeze time.
    pub fn live_positions(&self) -> Vec<Position> {
        self.seats.iter().filter(|s| !s.folded).map(|s| s.position).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedHand {
    pub blind_level: u32,
    pub difficulty: DifficultyLevel,
    pub moments: Vec<AskMoment>,
}

// ---------------------------------------------------------------------------
// Single-question pot drill
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorAction {
    pub position: Position,
    pub action: ActionKind,
    pub amount: u32,
}

/// A flat preflop pot question: blinds, the actions so far, and who asks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotRequest {
    pub small_blind: u32,
    pub big_blind: u32,
    pub requester: Position,
    pub prior_actions: Vec<PriorAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotValidation {
    pub is_correct: bool,
    pub user_answer: u32,
    pub correct_answer: u32,
    pub explanation: String,
}
