use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{Match, MatchResultRow, MatchWithNames, RatingHistoryRow};
use crate::rating::types::MatchSnapshot;

const MATCH_COLUMNS: &str = "id, player1_id, player2_id, winner_id, sets, \
    player1_elo_before, player2_elo_before, player1_elo_after, player2_elo_after, \
    elo_change, played_at";

#[allow(clippy::too_many_arguments)]
pub fn insert_match(
    conn: &Connection,
    player1_id: i64,
    player2_id: i64,
    winner_id: i64,
    sets_json: &str,
    snapshot: &MatchSnapshot,
    played_at: NaiveDateTime,
) -> Result<Match> {
    let sql = format!(
        "INSERT INTO matches (player1_id, player2_id, winner_id, sets, \
         player1_elo_before, player2_elo_before, player1_elo_after, player2_elo_after, \
         elo_change, played_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) RETURNING {MATCH_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            player1_id,
            player2_id,
            winner_id,
            sets_json,
            snapshot.player1_elo_before,
            snapshot.player2_elo_before,
            snapshot.player1_elo_after,
            snapshot.player2_elo_after,
            snapshot.elo_change,
            played_at
        ],
        parse_match_row,
    )
    .context("Failed to insert match")
}

/// All matches in playing order, the order the replayer consumes them in.
/// The id tie-break keeps same-timestamp matches in insertion order.
pub fn list_chronological(conn: &Connection) -> Result<Vec<Match>> {
    let sql = format!("SELECT {MATCH_COLUMNS} FROM matches ORDER BY played_at ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_recent(conn: &Connection, limit: usize, offset: usize) -> Result<Vec<MatchWithNames>> {
    let sql = format!(
        "SELECT {}, p1.name, p2.name, w.name \
         FROM matches m \
         JOIN players p1 ON m.player1_id = p1.id \
         JOIN players p2 ON m.player2_id = p2.id \
         JOIN players w ON m.winner_id = w.id \
         ORDER BY m.played_at DESC, m.id DESC \
         LIMIT ?1 OFFSET ?2",
        prefixed_match_columns()
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![limit as i64, offset as i64], parse_match_with_names_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn find_with_names(conn: &Connection, id: i64) -> Result<Option<MatchWithNames>> {
    let sql = format!(
        "SELECT {}, p1.name, p2.name, w.name \
         FROM matches m \
         JOIN players p1 ON m.player1_id = p1.id \
         JOIN players p2 ON m.player2_id = p2.id \
         JOIN players w ON m.winner_id = w.id \
         WHERE m.id = ?1",
        prefixed_match_columns()
    );

    conn.query_row(&sql, params![id], parse_match_with_names_row)
        .optional()
        .context("Failed to query match by id")
}

pub fn count_all(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM matches", [], |row| row.get(0))
        .context("Failed to count matches")
}

/// Rewrites the before/after rating snapshot of one match during a replay.
pub fn update_snapshot(conn: &Connection, match_id: i64, snapshot: &MatchSnapshot) -> Result<()> {
    let sql = "UPDATE matches
        SET player1_elo_before = ?1,
            player2_elo_before = ?2,
            player1_elo_after = ?3,
            player2_elo_after = ?4,
            elo_change = ?5
        WHERE id = ?6";

    conn.execute(
        sql,
        params![
            snapshot.player1_elo_before,
            snapshot.player2_elo_before,
            snapshot.player1_elo_after,
            snapshot.player2_elo_after,
            snapshot.elo_change,
            match_id
        ],
    )
    .context("Failed to update match snapshot")?;
    Ok(())
}

/// A player's rating trajectory, one point per match they took part in.
pub fn rating_history_for_player(conn: &Connection, player_id: i64) -> Result<Vec<RatingHistoryRow>> {
    let sql = "SELECT id, played_at,
            CASE WHEN player1_id = ?1 THEN player1_elo_before ELSE player2_elo_before END,
            CASE WHEN player1_id = ?1 THEN player1_elo_after ELSE player2_elo_after END,
            winner_id = ?1
        FROM matches
        WHERE player1_id = ?1 OR player2_id = ?1
        ORDER BY played_at ASC, id ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![player_id], |row| {
            Ok(RatingHistoryRow {
                match_id: row.get(0)?,
                played_at: row.get(1)?,
                elo_before: row.get(2)?,
                elo_after: row.get(3)?,
                won: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// A player's results most recent first, each from that player's
/// perspective: who they faced, whether they won, and the signed rating
/// swing the match gave them.
pub fn results_for_player(conn: &Connection, player_id: i64) -> Result<Vec<MatchResultRow>> {
    let sql = "SELECT m.id,
            CASE WHEN m.player1_id = ?1 THEN m.player2_id ELSE m.player1_id END,
            p.name,
            m.winner_id = ?1,
            CASE WHEN m.winner_id = ?1 THEN m.elo_change ELSE -m.elo_change END,
            m.played_at
        FROM matches m
        JOIN players p
            ON p.id = CASE WHEN m.player1_id = ?1 THEN m.player2_id ELSE m.player1_id END
        WHERE m.player1_id = ?1 OR m.player2_id = ?1
        ORDER BY m.played_at DESC, m.id DESC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![player_id], |row| {
            Ok(MatchResultRow {
                match_id: row.get(0)?,
                opponent_id: row.get(1)?,
                opponent_name: row.get(2)?,
                won: row.get(3)?,
                elo_delta: row.get(4)?,
                played_at: row.get(5)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn prefixed_match_columns() -> String {
    MATCH_COLUMNS
        .split(", ")
        .map(|col| format!("m.{}", col.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        player1_id: row.get(1)?,
        player2_id: row.get(2)?,
        winner_id: row.get(3)?,
        sets: row.get(4)?,
        player1_elo_before: row.get(5)?,
        player2_elo_before: row.get(6)?,
        player1_elo_after: row.get(7)?,
        player2_elo_after: row.get(8)?,
        elo_change: row.get(9)?,
        played_at: row.get(10)?,
    })
}

fn parse_match_with_names_row(row: &rusqlite::Row) -> rusqlite::Result<MatchWithNames> {
    Ok(MatchWithNames {
        match_row: parse_match_row(row)?,
        player1_name: row.get(11)?,
        player2_name: row.get(12)?,
        winner_name: row.get(13)?,
    })
}
