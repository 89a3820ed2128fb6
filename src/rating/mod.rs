pub mod elo;
pub mod replay;
pub mod types;

pub use elo::{compute_rating_change, expected_score};
pub use replay::replay;
pub use types::{MatchRecord, MatchSnapshot, PlayerStats, RatingChange, ReplayOutcome};
