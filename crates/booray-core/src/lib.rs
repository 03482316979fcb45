#![deny(warnings)]
pub mod game;
pub mod model;

pub use game::trial::{GameResult, TrialError, play_dealt, play_one_trial};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "booray"
    }

    pub const fn codename() -> &'static str {
        "Oh Hey BooRay"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
