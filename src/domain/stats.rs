use std::collections::HashMap;

use crate::database::MatchResultRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakKind {
    Win,
    Loss,
}

impl StreakKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreakKind::Win => "win",
            StreakKind::Loss => "loss",
        }
    }
}

/// A player's record against one opponent.
#[derive(Debug, Clone)]
pub struct HeadToHeadRecord {
    pub opponent_id: i64,
    pub opponent_name: String,
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
}

#[derive(Debug, Clone)]
pub struct PlayerStatistics {
    pub biggest_gain: f64,
    pub biggest_loss: f64,
    pub current_streak: usize,
    pub streak_kind: Option<StreakKind>,
    pub head_to_head: Vec<HeadToHeadRecord>,
}

/// Condenses a player's results into headline numbers: their largest single
/// rating swing in each direction, the run of identical outcomes they are
/// currently on, and their record against every opponent they have faced.
///
/// `results` must be ordered most recent first, as the database layer
/// returns them; the streak is read off the front of the slice.
pub fn summarize_results(results: &[MatchResultRow]) -> PlayerStatistics {
    let biggest_gain = results
        .iter()
        .map(|r| r.elo_delta)
        .fold(0.0_f64, f64::max);
    let biggest_loss = results
        .iter()
        .map(|r| r.elo_delta)
        .fold(0.0_f64, f64::min);

    let streak_kind = results.first().map(|r| {
        if r.won {
            StreakKind::Win
        } else {
            StreakKind::Loss
        }
    });
    let current_streak = match results.first() {
        Some(latest) => results.iter().take_while(|r| r.won == latest.won).count(),
        None => 0,
    };

    let mut by_opponent: HashMap<i64, HeadToHeadRecord> = HashMap::new();
    for result in results {
        let record = by_opponent
            .entry(result.opponent_id)
            .or_insert_with(|| HeadToHeadRecord {
                opponent_id: result.opponent_id,
                opponent_name: result.opponent_name.clone(),
                total_matches: 0,
                wins: 0,
                losses: 0,
            });
        record.total_matches += 1;
        if result.won {
            record.wins += 1;
        } else {
            record.losses += 1;
        }
    }

    let mut head_to_head: Vec<HeadToHeadRecord> = by_opponent.into_values().collect();
    head_to_head.sort_by(|a, b| {
        b.total_matches
            .cmp(&a.total_matches)
            .then_with(|| a.opponent_name.cmp(&b.opponent_name))
    });

    PlayerStatistics {
        biggest_gain,
        biggest_loss,
        current_streak,
        streak_kind,
        head_to_head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn result(opponent_id: i64, opponent_name: &str, won: bool, elo_delta: f64) -> MatchResultRow {
        MatchResultRow {
            match_id: 0,
            opponent_id,
            opponent_name: opponent_name.to_string(),
            won,
            elo_delta,
            played_at: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn empty_history_yields_zeroed_statistics() {
        let stats = summarize_results(&[]);

        assert_eq!(stats.biggest_gain, 0.0);
        assert_eq!(stats.biggest_loss, 0.0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.streak_kind, None);
        assert!(stats.head_to_head.is_empty());
    }

    #[test]
    fn biggest_swings_pick_the_extremes() {
        let results = [
            result(2, "bob", true, 12.3),
            result(3, "carol", false, -18.4),
            result(2, "bob", true, 17.1),
            result(3, "carol", false, -5.0),
        ];

        let stats = summarize_results(&results);
        assert_eq!(stats.biggest_gain, 17.1);
        assert_eq!(stats.biggest_loss, -18.4);
    }

    #[test]
    fn all_losses_leave_biggest_gain_at_zero() {
        let results = [
            result(2, "bob", false, -9.0),
            result(3, "carol", false, -14.2),
        ];

        let stats = summarize_results(&results);
        assert_eq!(stats.biggest_gain, 0.0);
        assert_eq!(stats.biggest_loss, -14.2);
    }

    #[test]
    fn streak_counts_latest_run_of_identical_outcomes() {
        // Most recent first: two wins, then a loss ends the run.
        let results = [
            result(2, "bob", true, 10.0),
            result(3, "carol", true, 8.0),
            result(2, "bob", false, -11.0),
            result(2, "bob", true, 9.0),
        ];

        let stats = summarize_results(&results);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.streak_kind, Some(StreakKind::Win));
    }

    #[test]
    fn losing_streak_is_reported_as_such() {
        let results = [
            result(2, "bob", false, -7.0),
            result(3, "carol", false, -6.0),
            result(2, "bob", false, -8.0),
        ];

        let stats = summarize_results(&results);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.streak_kind, Some(StreakKind::Loss));
    }

    #[test]
    fn head_to_head_groups_per_opponent_most_played_first() {
        let results = [
            result(2, "bob", true, 10.0),
            result(3, "carol", false, -9.0),
            result(2, "bob", false, -8.0),
            result(2, "bob", true, 7.0),
        ];

        let stats = summarize_results(&results);
        assert_eq!(stats.head_to_head.len(), 2);

        let bob = &stats.head_to_head[0];
        assert_eq!(bob.opponent_name, "bob");
        assert_eq!(bob.total_matches, 3);
        assert_eq!(bob.wins, 2);
        assert_eq!(bob.losses, 1);

        let carol = &stats.head_to_head[1];
        assert_eq!(carol.opponent_name, "carol");
        assert_eq!(carol.total_matches, 1);
        assert_eq!(carol.wins, 0);
        assert_eq!(carol.losses, 1);
    }
}
