use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::fmt;

pub const DECK_SIZE: usize = 52;
pub const HAND_SIZE: usize = 3;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

/// Opening hands: the player receives the first three cards of the
/// permutation and the dealer the next three, in dealt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deal {
    pub player: [Card; HAND_SIZE],
    pub dealer: [Card; HAND_SIZE],
}

impl Deal {
    /// The dealer's last card sets trump for the whole trial.
    pub fn trump(&self) -> Suit {
        self.dealer[HAND_SIZE - 1].suit
    }

    pub fn dealt_cards(&self) -> [Card; HAND_SIZE * 2] {
        let [p0, p1, p2] = self.player;
        let [d0, d1, d2] = self.dealer;
        [p0, p1, p2, d0, d1, d2]
    }
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for rank in Rank::ORDERED.iter().copied() {
            for suit in Suit::ALL.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn deal(&self) -> Deal {
        let c = &self.cards;
        Deal {
            player: [c[0], c[1], c[2]],
            dealer: [c[3], c[4], c[5]],
        }
    }

    /// Every card of the standard deck not in `dealt`, freshly shuffled.
    pub fn remaining_after<R: rand::Rng + ?Sized>(dealt: &[Card], rng: &mut R) -> RedrawPool {
        let mut cards: Vec<Card> = Self::standard()
            .cards
            .into_iter()
            .filter(|card| !dealt.contains(card))
            .collect();
        cards.shuffle(rng);
        RedrawPool { cards }
    }
}

/// Undealt cards available to the player's exchange. Draws pop from the end.
#[derive(Debug, Clone)]
pub struct RedrawPool {
    cards: Vec<Card>,
}

impl RedrawPool {
    pub fn draw(&mut self) -> Result<Card, DepletionError> {
        self.cards.pop().ok_or(DepletionError)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepletionError;

impl fmt::Display for DepletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "redraw pool exhausted")
    }
}

impl std::error::Error for DepletionError {}
