use crate::model::card::Card;
use crate::model::deck::{DepletionError, RedrawPool};
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// A hand already holding this many trump stands pat.
pub const STAND_TRUMP_COUNT: usize = 2;

/// Outcome of the draw heuristic: the cards to exchange, possibly none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawDecision {
    exchange: Vec<Card>,
}

impl DrawDecision {
    pub fn stand() -> Self {
        Self::default()
    }

    pub fn should_draw(&self) -> bool {
        !self.exchange.is_empty()
    }

    pub fn exchange(&self) -> &[Card] {
        &self.exchange
    }

    /// Swaps every flagged card for one popped off `pool`. Returns the cards
    /// drawn, in draw order. A pool too small for the whole exchange leaves
    /// the hand untouched.
    pub fn apply(
        &self,
        hand: &mut Hand,
        pool: &mut RedrawPool,
    ) -> Result<Vec<Card>, DepletionError> {
        if pool.remaining() < self.exchange.len() {
            return Err(DepletionError);
        }
        let mut drawn = Vec::with_capacity(self.exchange.len());
        for &card in &self.exchange {
            hand.remove(card);
            let replacement = pool.draw()?;
            hand.add(replacement);
            drawn.push(replacement);
        }
        Ok(drawn)
    }
}

/// Keep a hand with two or more trump; otherwise throw back every non-trump
/// card ranked below ten.
pub fn decide_draw(hand: &Hand, trump: Suit) -> DrawDecision {
    if hand.count_suit(trump) >= STAND_TRUMP_COUNT {
        return DrawDecision::stand();
    }

    DrawDecision {
        exchange: hand
            .iter()
            .copied()
            .filter(|card| card.is_low_off_suit(trump))
            .collect(),
    }
}
