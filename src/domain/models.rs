use serde::{Deserialize, Serialize};

/// One set within a match. Serialized as a `[player1, player2]` pair, which
/// is also the JSON shape stored in the `sets` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct SetScore {
    pub player1: i32,
    pub player2: i32,
}

impl SetScore {
    pub fn new(player1: i32, player2: i32) -> Self {
        Self { player1, player2 }
    }

    pub fn margin(&self) -> i32 {
        (self.player1 - self.player2).abs()
    }
}

impl From<(i32, i32)> for SetScore {
    fn from((player1, player2): (i32, i32)) -> Self {
        Self { player1, player2 }
    }
}

impl From<SetScore> for (i32, i32) {
    fn from(set: SetScore) -> Self {
        (set.player1, set.player2)
    }
}

/// Which participant slot won the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSide {
    Player1,
    Player2,
}

/// Decodes the stored set list of a match. Legacy rows predate per-set
/// storage, so a missing or malformed column yields an empty list rather
/// than an error; the rating engine treats that as a reference-length match.
pub fn parse_sets(raw: Option<&str>) -> Vec<SetScore> {
    raw.and_then(|s| serde_json::from_str::<Vec<SetScore>>(s).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_scores_round_trip_as_pairs() {
        let sets = vec![SetScore::new(11, 5), SetScore::new(9, 11)];
        let json = serde_json::to_string(&sets).unwrap();
        assert_eq!(json, "[[11,5],[9,11]]");
        assert_eq!(parse_sets(Some(&json)), sets);
    }

    #[test]
    fn malformed_or_missing_sets_parse_to_empty() {
        assert!(parse_sets(None).is_empty());
        assert!(parse_sets(Some("not json")).is_empty());
        assert!(parse_sets(Some("{\"a\":1}")).is_empty());
    }
}
