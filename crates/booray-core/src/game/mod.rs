pub mod draw;
pub mod og3;
pub mod payout;
pub mod serialization;
pub mod trial;
