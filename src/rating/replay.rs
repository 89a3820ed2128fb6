use std::collections::HashMap;

use log::info;

use crate::config::settings::RatingSettings;
use crate::errors::ReplayError;

use super::elo::compute_rating_change;
use super::types::{MatchRecord, MatchSnapshot, PlayerId, PlayerStats, ReplayOutcome};

/// Replays the full match history from scratch.
///
/// `matches` must already be in playing order (played_at, then id as the
/// tie-break); the result is order-sensitive since every match is scored
/// against the ratings accumulated so far. Every roster player starts back
/// at the initial rating with zeroed counters. Replaying the same input
/// twice yields identical output.
///
/// A match referencing a player outside the roster is a data integrity
/// fault: the whole replay fails rather than skipping the match, because a
/// skip would corrupt every dependent rating after it.
pub fn replay(
    matches: &[MatchRecord],
    players: &[PlayerId],
    settings: &RatingSettings,
) -> Result<ReplayOutcome, ReplayError> {
    info!(
        "Replaying {} matches for {} players",
        matches.len(),
        players.len()
    );

    let mut ratings: HashMap<PlayerId, f64> = players
        .iter()
        .map(|&id| (id, settings.initial_rating))
        .collect();
    let mut stats: HashMap<PlayerId, PlayerStats> = players
        .iter()
        .map(|&id| (id, PlayerStats::default()))
        .collect();
    let mut snapshots = Vec::with_capacity(matches.len());

    for record in matches {
        let player1_elo_before = current_rating(&ratings, record, record.player1_id)?;
        let player2_elo_before = current_rating(&ratings, record, record.player2_id)?;

        let player1_won = record.winner_id == record.player1_id;
        let (winner_elo, loser_elo) = if player1_won {
            (player1_elo_before, player2_elo_before)
        } else {
            (player2_elo_before, player1_elo_before)
        };

        let change = compute_rating_change(winner_elo, loser_elo, &record.sets, settings);

        let (player1_elo_after, player2_elo_after) = if player1_won {
            (change.winner_new_elo, change.loser_new_elo)
        } else {
            (change.loser_new_elo, change.winner_new_elo)
        };

        snapshots.push((
            record.id,
            MatchSnapshot {
                player1_elo_before,
                player2_elo_before,
                player1_elo_after,
                player2_elo_after,
                elo_change: change.elo_change,
            },
        ));

        // Subsequent matches see the rounded post-match ratings, the same
        // values that get persisted.
        ratings.insert(record.player1_id, player1_elo_after);
        ratings.insert(record.player2_id, player2_elo_after);

        bump_stats(&mut stats, record.player1_id, player1_won);
        bump_stats(&mut stats, record.player2_id, !player1_won);
    }

    Ok(ReplayOutcome {
        ratings,
        stats,
        snapshots,
    })
}

fn current_rating(
    ratings: &HashMap<PlayerId, f64>,
    record: &MatchRecord,
    player_id: PlayerId,
) -> Result<f64, ReplayError> {
    ratings
        .get(&player_id)
        .copied()
        .ok_or(ReplayError::UnknownParticipant {
            match_id: record.id,
            player_id,
        })
}

fn bump_stats(stats: &mut HashMap<PlayerId, PlayerStats>, player_id: PlayerId, won: bool) {
    let entry = stats.entry(player_id).or_default();
    entry.games_played += 1;
    if won {
        entry.wins += 1;
    } else {
        entry.losses += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SetScore;

    fn settings() -> RatingSettings {
        RatingSettings::default()
    }

    fn sets(pairs: &[(i32, i32)]) -> Vec<SetScore> {
        pairs.iter().map(|&(a, b)| SetScore::new(a, b)).collect()
    }

    fn record(id: i64, player1: i64, player2: i64, winner: i64, pairs: &[(i32, i32)]) -> MatchRecord {
        MatchRecord {
            id,
            player1_id: player1,
            player2_id: player2,
            winner_id: winner,
            sets: sets(pairs),
        }
    }

    #[test]
    fn single_match_between_fresh_players() {
        let matches = vec![record(1, 1, 2, 1, &[(11, 5), (11, 7), (11, 5)])];
        let outcome = replay(&matches, &[1, 2], &settings()).unwrap();

        assert_eq!(outcome.ratings[&1], 1517.1);
        assert_eq!(outcome.ratings[&2], 1482.9);
        assert_eq!(
            outcome.stats[&1],
            PlayerStats {
                games_played: 1,
                wins: 1,
                losses: 0
            }
        );
        assert_eq!(
            outcome.stats[&2],
            PlayerStats {
                games_played: 1,
                wins: 0,
                losses: 1
            }
        );

        let (match_id, snapshot) = outcome.snapshots[0];
        assert_eq!(match_id, 1);
        assert_eq!(snapshot.player1_elo_before, 1500.0);
        assert_eq!(snapshot.player2_elo_before, 1500.0);
        assert_eq!(snapshot.player1_elo_after, 1517.1);
        assert_eq!(snapshot.player2_elo_after, 1482.9);
        assert_eq!(snapshot.elo_change, 17.1);
    }

    #[test]
    fn replay_is_idempotent() {
        let matches = vec![
            record(1, 1, 2, 1, &[(11, 5), (11, 7)]),
            record(2, 2, 3, 3, &[(9, 11), (11, 8), (7, 11)]),
            record(3, 1, 3, 1, &[(11, 2), (11, 4)]),
        ];
        let roster = [1, 2, 3];

        let first = replay(&matches, &roster, &settings()).unwrap();
        let second = replay(&matches, &roster, &settings()).unwrap();

        assert_eq!(first.ratings, second.ratings);
        assert_eq!(first.stats, second.stats);
        assert_eq!(first.snapshots, second.snapshots);
    }

    #[test]
    fn replay_is_order_sensitive() {
        let older = record(1, 1, 2, 1, &[(11, 5), (11, 7)]);
        let newer = record(2, 1, 2, 2, &[(5, 11), (7, 11)]);
        let roster = [1, 2];

        let chronological = replay(&[older.clone(), newer.clone()], &roster, &settings()).unwrap();
        let reversed = replay(&[newer, older], &roster, &settings()).unwrap();

        assert_ne!(chronological.ratings[&1], reversed.ratings[&1]);
        assert_ne!(chronological.ratings[&2], reversed.ratings[&2]);
    }

    #[test]
    fn roster_players_without_matches_keep_the_initial_rating() {
        let matches = vec![record(1, 1, 2, 2, &[(5, 11), (11, 9), (8, 11)])];
        let outcome = replay(&matches, &[1, 2, 3], &settings()).unwrap();

        assert_eq!(outcome.ratings[&3], 1500.0);
        assert_eq!(outcome.stats[&3], PlayerStats::default());
    }

    #[test]
    fn legacy_match_without_sets_uses_the_reference_fallback() {
        let matches = vec![MatchRecord {
            id: 1,
            player1_id: 1,
            player2_id: 2,
            winner_id: 1,
            sets: Vec::new(),
        }];
        let outcome = replay(&matches, &[1, 2], &settings()).unwrap();

        // Plain K=32 at equal ratings: half of 32.
        assert_eq!(outcome.ratings[&1], 1516.0);
        assert_eq!(outcome.ratings[&2], 1484.0);
    }

    #[test]
    fn unknown_participant_aborts_the_replay() {
        let matches = vec![
            record(1, 1, 2, 1, &[(11, 5), (11, 7)]),
            record(2, 1, 99, 99, &[(5, 11), (7, 11)]),
        ];
        let result = replay(&matches, &[1, 2], &settings());

        assert_eq!(
            result.unwrap_err(),
            ReplayError::UnknownParticipant {
                match_id: 2,
                player_id: 99
            }
        );
    }

    #[test]
    fn counters_stay_consistent_over_a_longer_history() {
        let matches = vec![
            record(1, 1, 2, 1, &[(11, 5), (11, 7)]),
            record(2, 1, 3, 3, &[(9, 11), (11, 8), (7, 11)]),
            record(3, 2, 3, 2, &[(11, 6), (11, 9)]),
            record(4, 1, 2, 2, &[(5, 11), (11, 7), (9, 11)]),
        ];
        let roster = [1, 2, 3];
        let outcome = replay(&matches, &roster, &settings()).unwrap();

        for id in roster {
            let stats = outcome.stats[&id];
            assert_eq!(stats.games_played, stats.wins + stats.losses);
        }
        let total_games: i32 = outcome.stats.values().map(|s| s.games_played).sum();
        assert_eq!(total_games, matches.len() as i32 * 2);
    }
}
