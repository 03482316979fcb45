use super::trial::{GameResult, TrialError, play_one_trial};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A single trial pinned to the seed that produced it, so a notable hand
/// from a long run can be written out and replayed later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrialSnapshot {
    pub seed: u64,
    pub result: GameResult,
}

impl TrialSnapshot {
    pub fn capture(seed: u64) -> Result<Self, TrialError> {
        let result = Self::play(seed)?;
        Ok(TrialSnapshot { seed, result })
    }

    pub fn replay(&self) -> Result<GameResult, TrialError> {
        Self::play(self.seed)
    }

    /// True when replaying the seed reproduces the recorded result.
    pub fn is_consistent(&self) -> Result<bool, TrialError> {
        Ok(self.replay()? == self.result)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    fn play(seed: u64) -> Result<GameResult, TrialError> {
        let mut rng = StdRng::seed_from_u64(seed);
        play_one_trial(&mut rng)
    }
}
