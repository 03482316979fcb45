use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::trick::TrickPlay;
use core::fmt;
use serde::{Deserialize, Serialize};

/// The four independent bets settled on every trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagerLine {
    Ante,
    Booray,
    Play,
    Og3,
}

impl WagerLine {
    pub const ALL: [WagerLine; 4] = [
        WagerLine::Ante,
        WagerLine::Booray,
        WagerLine::Play,
        WagerLine::Og3,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            WagerLine::Ante => "ante",
            WagerLine::Booray => "booray",
            WagerLine::Play => "play",
            WagerLine::Og3 => "og3",
        }
    }
}

impl fmt::Display for WagerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many of the player's three played cards were trump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrumpComposition {
    /// Fewer than three trump played.
    Mixed,
    /// All three played cards trump.
    AllTrump,
    /// All three played cards trump and exactly Q, K, A.
    AkqTrump,
}

impl TrumpComposition {
    pub fn from_trump_cards(trump_cards: &[Card]) -> Self {
        if trump_cards.len() != 3 {
            return TrumpComposition::Mixed;
        }

        let mut ranks: Vec<Rank> = trump_cards.iter().map(|card| card.rank).collect();
        ranks.sort_unstable();
        let one_suit = trump_cards.iter().all(|card| card.suit == trump_cards[0].suit);
        if one_suit && ranks == [Rank::Queen, Rank::King, Rank::Ace] {
            TrumpComposition::AkqTrump
        } else {
            TrumpComposition::AllTrump
        }
    }

    pub fn from_play(play: &TrickPlay) -> Self {
        Self::from_trump_cards(&play.trump_cards())
    }

    pub fn all_trump(self) -> bool {
        !matches!(self, TrumpComposition::Mixed)
    }
}

/// Net result per unit on the three trick-settled lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payouts {
    pub ante: i32,
    pub booray: i32,
    pub play: i32,
}

impl Payouts {
    pub fn resolve(tricks_won: u8, composition: TrumpComposition) -> Self {
        match tricks_won {
            0 => Payouts {
                ante: -1,
                booray: -1,
                play: -1,
            },
            1 => Payouts {
                ante: 1,
                booray: 0,
                play: 0,
            },
            2 => Payouts {
                ante: 1,
                booray: 0,
                play: 1,
            },
            _ => Payouts {
                ante: 1,
                booray: match composition {
                    TrumpComposition::AkqTrump => 500,
                    TrumpComposition::AllTrump => 10,
                    TrumpComposition::Mixed => 1,
                },
                play: 2,
            },
        }
    }
}
