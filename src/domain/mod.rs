pub mod models;
pub mod stats;
pub mod validation;

pub use models::{parse_sets, MatchSide, SetScore};
pub use stats::summarize_results;
pub use validation::{validate_participants, validate_sets};
