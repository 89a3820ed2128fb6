use thiserror::Error;

/// Rejections for match submissions. Everything user-provided is checked
/// here before it reaches the rating engine; the engine itself trusts its
/// input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("players must be different")]
    SamePlayer,
    #[error("a match needs at least one set")]
    NoSets,
    #[error("set {index} is tied at {score}-{score}")]
    TiedSet { index: usize, score: i32 },
    #[error("set {index} has a negative score")]
    NegativeScore { index: usize },
    #[error("sets won are split evenly, no match winner")]
    NoMajorityWinner,
}

/// Integrity fault detected while replaying the match history. Aborts the
/// whole replay; partial results are never persisted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("match {match_id} references player {player_id}, which is not in the roster")]
    UnknownParticipant { match_id: i64, player_id: i64 },
}

/// Failure modes of the match-recording path, kept apart so the API layer
/// can map them to distinct status codes.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("player {0} not found")]
    PlayerNotFound(i64),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
