use crate::game::draw::{DrawDecision, decide_draw};
use crate::game::og3::{Og3Category, evaluate_og3};
use crate::game::payout::{Payouts, TrumpComposition, WagerLine};
use crate::model::card::Card;
use crate::model::deck::{Deal, Deck, DepletionError, HAND_SIZE};
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use crate::model::trick::{TrickError, TrickOutcome, TrickPlay};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything one trial produced. Built once by [`play_dealt`] and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub tricks_won: u8,
    pub used_all_trump: bool,
    pub used_akq_trump: bool,
    pub trump: Suit,
    pub initial_hand: [Card; HAND_SIZE],
    pub dealer_hand: [Card; HAND_SIZE],
    /// The hand taken into trick play, in the order the cards were played.
    pub final_hand: [Card; HAND_SIZE],
    pub exchanged: Vec<Card>,
    pub drawn: Vec<Card>,
    pub tricks: [TrickOutcome; HAND_SIZE],
    pub og3: Og3Category,
    pub og3_payout: i32,
    pub payouts: Payouts,
}

impl GameResult {
    pub fn payout(&self, line: WagerLine) -> i32 {
        match line {
            WagerLine::Ante => self.payouts.ante,
            WagerLine::Booray => self.payouts.booray,
            WagerLine::Play => self.payouts.play,
            WagerLine::Og3 => self.og3_payout,
        }
    }

    pub fn drew_cards(&self) -> bool {
        !self.drawn.is_empty()
    }
}

/// Broken engine bookkeeping. Neither variant is reachable with a full deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialError {
    Depletion(DepletionError),
    Trick(TrickError),
}

impl fmt::Display for TrialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialError::Depletion(err) => write!(f, "redraw failed: {err}"),
            TrialError::Trick(err) => write!(f, "trick play failed: {err}"),
        }
    }
}

impl std::error::Error for TrialError {}

impl From<DepletionError> for TrialError {
    fn from(err: DepletionError) -> Self {
        TrialError::Depletion(err)
    }
}

impl From<TrickError> for TrialError {
    fn from(err: TrickError) -> Self {
        TrialError::Trick(err)
    }
}

/// Shuffles a fresh deck and plays one hand to completion.
pub fn play_one_trial<R: rand::Rng + ?Sized>(rng: &mut R) -> Result<GameResult, TrialError> {
    let deck = Deck::shuffled(rng);
    play_dealt(deck.deal(), rng)
}

/// Plays a hand from fixed opening cards. `rng` is consumed only when the
/// player exchanges cards.
pub fn play_dealt<R: rand::Rng + ?Sized>(
    deal: Deal,
    rng: &mut R,
) -> Result<GameResult, TrialError> {
    let trump = deal.trump();
    let og3 = evaluate_og3(&deal.player);

    let mut hand = Hand::with_cards(deal.player.to_vec());
    let decision = decide_draw(&hand, trump);
    let drawn = exchange(&decision, &mut hand, &deal, rng)?;

    let play = TrickPlay::run(hand, deal.dealer, trump)?;
    let tricks_won = play.tricks_won();
    let composition = TrumpComposition::from_play(&play);

    Ok(GameResult {
        tricks_won,
        used_all_trump: composition.all_trump(),
        used_akq_trump: composition == TrumpComposition::AkqTrump,
        trump,
        initial_hand: deal.player,
        dealer_hand: deal.dealer,
        final_hand: play.played_cards(),
        exchanged: decision.exchange().to_vec(),
        drawn,
        tricks: *play.outcomes(),
        og3,
        og3_payout: og3.payout(),
        payouts: Payouts::resolve(tricks_won, composition),
    })
}

fn exchange<R: rand::Rng + ?Sized>(
    decision: &DrawDecision,
    hand: &mut Hand,
    deal: &Deal,
    rng: &mut R,
) -> Result<Vec<Card>, DepletionError> {
    if !decision.should_draw() {
        return Ok(Vec::new());
    }
    let mut pool = Deck::remaining_after(&deal.dealt_cards(), rng);
    decision.apply(hand, &mut pool)
}
