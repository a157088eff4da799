//! The card catalog and the shuffler.

use rand::{Rng, seq::SliceRandom};

use super::entities::{Card, Rank, Suit};

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// The full ordered catalog: 4 suits x 13 ranks.
#[must_use]
pub fn standard_deck() -> [Card; DECK_SIZE] {
    let mut cards = [Card::new(Suit::Hearts, Rank::Two); DECK_SIZE];
    for (i, suit) in Suit::ALL.into_iter().enumerate() {
        for (j, rank) in Rank::ALL.into_iter().enumerate() {
            cards[13 * i + j] = Card::new(suit, rank);
        }
    }
    cards
}

/// A fresh uniformly random permutation of the catalog. Every call
/// returns an owned deck; the catalog itself is never mutated.
#[must_use]
pub fn shuffled_deck() -> Vec<Card> {
    shuffled_deck_with(&mut rand::rng())
}

/// Shuffle with a caller-provided RNG. Fisher-Yates, so every
/// permutation is equally likely given a uniform RNG.
pub fn shuffled_deck_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut cards = standard_deck().to_vec();
    cards.shuffle(rng);
    cards
}
