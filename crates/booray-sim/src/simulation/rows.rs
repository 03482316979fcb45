use booray_core::GameResult;
use booray_core::model::card::format_cards;
use serde::Serialize;

/// One JSONL line per trial.
#[derive(Serialize)]
pub(super) struct TrialLogRow {
    run_id: String,
    trial_index: usize,
    trial_seed: u64,
    trump: String,
    initial_hand: String,
    dealer_hand: String,
    exchanged: String,
    drawn: String,
    final_hand: String,
    tricks_won: u8,
    used_all_trump: bool,
    used_akq_trump: bool,
    og3: &'static str,
    ante: i32,
    booray: i32,
    play: i32,
    og3_payout: i32,
}

impl TrialLogRow {
    pub(super) fn new(
        run_id: &str,
        trial_index: usize,
        trial_seed: u64,
        result: &GameResult,
    ) -> Self {
        Self {
            run_id: run_id.to_string(),
            trial_index,
            trial_seed,
            trump: result.trump.to_string(),
            initial_hand: format_cards(&result.initial_hand),
            dealer_hand: format_cards(&result.dealer_hand),
            exchanged: format_cards(&result.exchanged),
            drawn: format_cards(&result.drawn),
            final_hand: format_cards(&result.final_hand),
            tricks_won: result.tricks_won,
            used_all_trump: result.used_all_trump,
            used_akq_trump: result.used_akq_trump,
            og3: result.og3.label(),
            ante: result.payouts.ante,
            booray: result.payouts.booray,
            play: result.payouts.play,
            og3_payout: result.og3_payout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TrialLogRow;
    use booray_core::game::serialization::TrialSnapshot;

    #[test]
    fn row_carries_seed_for_replay() {
        let snapshot = TrialSnapshot::capture(31).expect("trial");
        let row = TrialLogRow::new("unit", 4, snapshot.seed, &snapshot.result);
        let json = serde_json::to_value(&row).expect("row serializes");

        assert_eq!(json["trial_seed"], 31);
        assert_eq!(json["trial_index"], 4);
        assert_eq!(json["og3"], snapshot.result.og3.label());
        assert_eq!(
            json["tricks_won"].as_u64(),
            Some(u64::from(snapshot.result.tricks_won))
        );
        assert_eq!(json["initial_hand"].as_str().map(|s| s.split(' ').count()), Some(3));
    }
}
