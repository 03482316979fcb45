use crate::model::card::Card;
use crate::model::deck::HAND_SIZE;
use crate::model::suit::Suit;

/// The player's cards in the order they were received: dealt cards first,
/// redrawn cards appended. Never holds more than three cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn with_cards(cards: Vec<Card>) -> Self {
        debug_assert!(cards.len() <= HAND_SIZE);
        Self { cards }
    }

    pub fn add(&mut self, card: Card) {
        debug_assert!(self.cards.len() < HAND_SIZE, "hand already holds {HAND_SIZE} cards");
        self.cards.push(card);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|card| card.suit == suit).count()
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::default();
        let card = Card::new(Rank::Three, Suit::Clubs);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn keeps_cards_in_the_order_received() {
        let mut hand = Hand::with_cards(vec![
            Card::new(Rank::King, Suit::Spades),
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Two, Suit::Hearts),
        ]);
        hand.remove(Card::new(Rank::King, Suit::Spades));
        hand.add(Card::new(Rank::Three, Suit::Clubs));
        assert_eq!(
            hand.cards(),
            &[
                Card::new(Rank::Ace, Suit::Hearts),
                Card::new(Rank::Two, Suit::Hearts),
                Card::new(Rank::Three, Suit::Clubs),
            ]
        );
    }

    #[test]
    fn counts_cards_of_a_suit() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Four, Suit::Diamonds),
            Card::new(Rank::Jack, Suit::Diamonds),
            Card::new(Rank::Two, Suit::Clubs),
        ]);
        assert_eq!(hand.count_suit(Suit::Diamonds), 2);
        assert_eq!(hand.count_suit(Suit::Spades), 0);
    }
}
