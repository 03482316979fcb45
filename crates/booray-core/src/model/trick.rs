use crate::model::card::Card;
use crate::model::deck::HAND_SIZE;
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One trick: the dealer reveals `led`, the player answers from hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trick {
    led: Card,
    trump: Suit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickOutcome {
    pub dealer_card: Card,
    pub player_card: Card,
    pub player_won: bool,
    pub trump_played: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    HandExhausted { trick: usize },
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::HandExhausted { trick } => {
                write!(f, "player has no card to answer trick {}", trick + 1)
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(led: Card, trump: Suit) -> Self {
        Self { led, trump }
    }

    /// Cards the player may consider: the led suit, else trump, else anything.
    pub fn playable(&self, hand: &Hand) -> Vec<Card> {
        let following: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|card| card.suit == self.led.suit)
            .collect();
        if !following.is_empty() {
            return following;
        }

        let trumps: Vec<Card> = hand
            .iter()
            .copied()
            .filter(|card| card.is_trump(self.trump))
            .collect();
        if !trumps.is_empty() {
            return trumps;
        }

        hand.cards().to_vec()
    }

    /// Greedy response: the highest-ranked playable card. Equal ranks go to
    /// the card held longest.
    pub fn choose_response(&self, hand: &Hand) -> Option<Card> {
        self.playable(hand)
            .into_iter()
            .reduce(|best, card| if card.rank > best.rank { card } else { best })
    }

    pub fn player_wins(&self, player: Card) -> bool {
        let dealer = self.led;
        if player.suit == dealer.suit {
            player.rank > dealer.rank
        } else if player.is_trump(self.trump) {
            true
        } else {
            // Off-suit non-trump loses whether or not the dealer led trump.
            false
        }
    }

    pub fn resolve(&self, player: Card) -> TrickOutcome {
        TrickOutcome {
            dealer_card: self.led,
            player_card: player,
            player_won: self.player_wins(player),
            trump_played: player.is_trump(self.trump),
        }
    }
}

/// The three tricks of a trial, in the order the dealer led them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickPlay {
    outcomes: [TrickOutcome; HAND_SIZE],
}

impl TrickPlay {
    /// Plays the dealer's cards in dealt order against the player's hand.
    pub fn run(
        mut hand: Hand,
        dealer: [Card; HAND_SIZE],
        trump: Suit,
    ) -> Result<Self, TrickError> {
        let mut outcomes = Vec::with_capacity(HAND_SIZE);
        for (index, led) in dealer.into_iter().enumerate() {
            let trick = Trick::new(led, trump);
            let card = trick
                .choose_response(&hand)
                .ok_or(TrickError::HandExhausted { trick: index })?;
            hand.remove(card);
            outcomes.push(trick.resolve(card));
        }

        let outcomes: [TrickOutcome; HAND_SIZE] = outcomes
            .try_into()
            .map_err(|_| TrickError::HandExhausted { trick: HAND_SIZE - 1 })?;
        Ok(Self { outcomes })
    }

    pub fn outcomes(&self) -> &[TrickOutcome; HAND_SIZE] {
        &self.outcomes
    }

    pub fn tricks_won(&self) -> u8 {
        self.outcomes.iter().filter(|o| o.player_won).count() as u8
    }

    pub fn played_cards(&self) -> [Card; HAND_SIZE] {
        self.outcomes.map(|o| o.player_card)
    }

    pub fn trump_cards(&self) -> Vec<Card> {
        self.outcomes
            .iter()
            .filter(|o| o.trump_played)
            .map(|o| o.player_card)
            .collect()
    }
}
