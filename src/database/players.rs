use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Player;
use crate::rating::types::PlayerStats;

const PLAYER_COLUMNS: &str = "id, name, current_elo, games_played, wins, losses, created_at";

pub fn insert_player(conn: &Connection, name: &str, initial_rating: f64) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (name, current_elo) VALUES (?1, ?2) RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(&sql, params![name, initial_rating], parse_player_row)
        .context("Failed to insert new player")
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

/// True when the error wraps the UNIQUE index on the player name. Insertion
/// relies on the database to reject duplicates so concurrent requests can't
/// both slip past a read-then-write check.
pub fn is_unique_name_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

pub fn list_all(conn: &Connection) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players");
    collect_players(conn, &sql)
}

pub fn list_leaderboard(conn: &Connection) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY current_elo DESC, name ASC");
    collect_players(conn, &sql)
}

/// Applies one recorded match to a player row: new rating, one more game,
/// and the win or loss counter.
pub fn apply_match_result(conn: &Connection, id: i64, new_elo: f64, won: bool) -> Result<()> {
    let sql = "UPDATE players
        SET current_elo = ?1,
            games_played = games_played + 1,
            wins = wins + ?2,
            losses = losses + ?3
        WHERE id = ?4";

    let (win, loss) = if won { (1, 0) } else { (0, 1) };
    conn.execute(sql, params![new_elo, win, loss, id])
        .context("Failed to update player after match")?;
    Ok(())
}

/// Overwrites a player's rating and counters with replayed values.
pub fn store_recalculated(
    conn: &Connection,
    id: i64,
    elo: f64,
    stats: &PlayerStats,
) -> Result<()> {
    let sql = "UPDATE players
        SET current_elo = ?1,
            games_played = ?2,
            wins = ?3,
            losses = ?4
        WHERE id = ?5";

    conn.execute(
        sql,
        params![elo, stats.games_played, stats.wins, stats.losses, id],
    )
    .context("Failed to store recalculated player state")?;
    Ok(())
}

fn collect_players(conn: &Connection, sql: &str) -> Result<Vec<Player>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        current_elo: row.get(2)?,
        games_played: row.get(3)?,
        wins: row.get(4)?,
        losses: row.get(5)?,
        created_at: row.get(6)?,
    })
}
