use rand::Rng;

use crate::training_engine::{
    models::{Card, Rank, Suit},
    random::shuffle,
};

/// Cards on the board by the river.
pub const BOARD_SIZE: usize = 5;

/// A standard 52-card deck that can be shuffled and dealt from.
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    /// Build a fresh ordered deck and shuffle it with `rng`.
    pub fn new_shuffled<R: Rng>(rng: &mut R) -> Self {
        let suits = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
        let mut cards: Vec<Card> = suits
            .iter()
            .flat_map(|&suit| (2u8..=14).map(move |r| Card { rank: Rank(r), suit }))
            .collect();
        shuffle(rng, &mut cards);
        Deck { cards, cursor: 0 }
    }

    /// Deal up to `n` cards; fewer when the deck runs out.
    pub fn deal_n(&mut self, n: usize) -> Vec<Card> {
        let end = (self.cursor + n).min(self.cards.len());
        let dealt = self.cards[self.cursor..end].to_vec();
        self.cursor = end;
        dealt
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }
}

/// Shuffle a deck and run out the full board for one hand. Each street
/// reveals a prefix of it.
pub fn deal_board<R: Rng>(rng: &mut R) -> Vec<Card> {
    Deck::new_shuffled(rng).deal_n(BOARD_SIZE)
}
