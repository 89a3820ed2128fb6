use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use rusqlite::Connection;

use crate::config::settings::RatingSettings;
use crate::database::{self, Match, Player};
use crate::domain::{self, MatchSide, SetScore};
use crate::errors::RecordError;
use crate::rating::{self, types::MatchSnapshot};

/// A match as submitted by a participant: two players and the set-by-set
/// scores, nothing derived.
#[derive(Debug, Clone)]
pub struct MatchSubmission {
    pub player1_id: i64,
    pub player2_id: i64,
    pub sets: Vec<SetScore>,
}

/// Records one match: validates the submission, scores it against both
/// players' current ratings and writes the match row plus both player
/// updates in a single transaction. Two concurrent recordings touching the
/// same player cannot both read the same pre-match rating.
pub fn record_match(
    conn: &mut Connection,
    submission: &MatchSubmission,
    settings: &RatingSettings,
) -> Result<Match, RecordError> {
    domain::validate_participants(submission.player1_id, submission.player2_id)?;
    let winner_side = domain::validate_sets(&submission.sets)?;

    let tx = conn
        .transaction()
        .context("Failed to open match-recording transaction")?;

    let player1 = load_player(&tx, submission.player1_id)?;
    let player2 = load_player(&tx, submission.player2_id)?;

    let (winner, loser) = match winner_side {
        MatchSide::Player1 => (&player1, &player2),
        MatchSide::Player2 => (&player2, &player1),
    };

    let change = rating::compute_rating_change(
        winner.current_elo,
        loser.current_elo,
        &submission.sets,
        settings,
    );

    let (player1_elo_after, player2_elo_after) = match winner_side {
        MatchSide::Player1 => (change.winner_new_elo, change.loser_new_elo),
        MatchSide::Player2 => (change.loser_new_elo, change.winner_new_elo),
    };

    let snapshot = MatchSnapshot {
        player1_elo_before: player1.current_elo,
        player2_elo_before: player2.current_elo,
        player1_elo_after,
        player2_elo_after,
        elo_change: change.elo_change,
    };

    let sets_json = serde_json::to_string(&submission.sets)
        .context("Failed to encode set scores")
        .map_err(RecordError::Internal)?;

    let match_row = database::matches::insert_match(
        &tx,
        player1.id,
        player2.id,
        winner.id,
        &sets_json,
        &snapshot,
        Utc::now().naive_utc(),
    )?;

    database::players::apply_match_result(&tx, player1.id, player1_elo_after, winner.id == player1.id)?;
    database::players::apply_match_result(&tx, player2.id, player2_elo_after, winner.id == player2.id)?;

    tx.commit()
        .context("Failed to commit recorded match")?;

    info!(
        "Recorded match {}: {} beat {} ({:+.1})",
        match_row.id, winner.name, loser.name, change.elo_change
    );

    Ok(match_row)
}

fn load_player(conn: &Connection, id: i64) -> Result<Player, RecordError> {
    database::players::find_by_id(conn, id)?
        .ok_or(RecordError::PlayerNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::RatingSettings;
    use crate::database::setup;
    use crate::errors::ValidationError;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup::init_database(&conn).unwrap();
        conn
    }

    fn add_player(conn: &Connection, name: &str) -> i64 {
        database::players::insert_player(conn, name, 1500.0)
            .unwrap()
            .id
    }

    fn sets(pairs: &[(i32, i32)]) -> Vec<SetScore> {
        pairs.iter().map(|&(a, b)| SetScore::new(a, b)).collect()
    }

    #[test]
    fn recording_updates_both_players_and_stores_the_snapshot() {
        let mut conn = test_conn();
        let alice = add_player(&conn, "alice");
        let bob = add_player(&conn, "bob");

        let submission = MatchSubmission {
            player1_id: alice,
            player2_id: bob,
            sets: sets(&[(11, 5), (11, 7), (11, 5)]),
        };
        let settings = RatingSettings::default();
        let match_row = record_match(&mut conn, &submission, &settings).unwrap();

        assert_eq!(match_row.winner_id, alice);
        assert_eq!(match_row.player1_elo_before, 1500.0);
        assert_eq!(match_row.player1_elo_after, 1517.1);
        assert_eq!(match_row.player2_elo_after, 1482.9);
        assert_eq!(match_row.elo_change, 17.1);

        let alice_row = database::players::find_by_id(&conn, alice).unwrap().unwrap();
        assert_eq!(alice_row.current_elo, 1517.1);
        assert_eq!(alice_row.games_played, 1);
        assert_eq!(alice_row.wins, 1);
        assert_eq!(alice_row.losses, 0);

        let bob_row = database::players::find_by_id(&conn, bob).unwrap().unwrap();
        assert_eq!(bob_row.current_elo, 1482.9);
        assert_eq!(bob_row.losses, 1);
    }

    #[test]
    fn invalid_submissions_leave_no_trace() {
        let mut conn = test_conn();
        let alice = add_player(&conn, "alice");
        let bob = add_player(&conn, "bob");
        let settings = RatingSettings::default();

        let tied_match = MatchSubmission {
            player1_id: alice,
            player2_id: bob,
            sets: sets(&[(11, 5), (5, 11)]),
        };
        let err = record_match(&mut conn, &tied_match, &settings).unwrap_err();
        assert!(matches!(
            err,
            RecordError::Invalid(ValidationError::NoMajorityWinner)
        ));

        let self_match = MatchSubmission {
            player1_id: alice,
            player2_id: alice,
            sets: sets(&[(11, 5), (11, 7)]),
        };
        let err = record_match(&mut conn, &self_match, &settings).unwrap_err();
        assert!(matches!(
            err,
            RecordError::Invalid(ValidationError::SamePlayer)
        ));

        assert_eq!(database::matches::count_all(&conn).unwrap(), 0);
        let alice_row = database::players::find_by_id(&conn, alice).unwrap().unwrap();
        assert_eq!(alice_row.games_played, 0);
        assert_eq!(alice_row.current_elo, 1500.0);
    }

    #[test]
    fn unknown_player_is_rejected() {
        let mut conn = test_conn();
        let alice = add_player(&conn, "alice");
        let settings = RatingSettings::default();

        let submission = MatchSubmission {
            player1_id: alice,
            player2_id: 999,
            sets: sets(&[(11, 5), (11, 7)]),
        };
        let err = record_match(&mut conn, &submission, &settings).unwrap_err();
        assert!(matches!(err, RecordError::PlayerNotFound(999)));
    }

    #[test]
    fn consecutive_matches_build_on_updated_ratings() {
        let mut conn = test_conn();
        let alice = add_player(&conn, "alice");
        let bob = add_player(&conn, "bob");
        let settings = RatingSettings::default();

        let first = MatchSubmission {
            player1_id: alice,
            player2_id: bob,
            sets: sets(&[(11, 6), (11, 6)]),
        };
        record_match(&mut conn, &first, &settings).unwrap();

        let second = MatchSubmission {
            player1_id: alice,
            player2_id: bob,
            sets: sets(&[(6, 11), (6, 11)]),
        };
        let match_row = record_match(&mut conn, &second, &settings).unwrap();

        // Bob was behind after the first match, so his win pays out more
        // than an even-field win would.
        assert!(match_row.player1_elo_before > match_row.player2_elo_before);
        assert!(match_row.elo_change > 0.0);
    }
}
