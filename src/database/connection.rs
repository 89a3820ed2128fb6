use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

use super::setup;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

// A handful of connections is plenty: the API runs short point queries and
// the recalculation path holds a single writing transaction.
const MAX_POOL_SIZE: u32 = 8;

/// Opens the ladder database and applies the schema before the pool is
/// handed out, so every consumer sees the players and matches tables.
pub fn create_pool(database_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = r2d2::Pool::builder()
        .max_size(MAX_POOL_SIZE)
        .build(manager)
        .with_context(|| format!("Failed to open ladder database at {database_path}"))?;

    let conn = get_connection(&pool)?;
    setup::init_database(&conn)?;

    Ok(pool)
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to check out a ladder database connection")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::players;

    #[test]
    fn pool_is_ready_for_queries_once_created() {
        let path = std::env::temp_dir().join(format!(
            "pingpong_ladder_pool_test_{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let pool = create_pool(path.to_str().unwrap()).unwrap();
        let conn = get_connection(&pool).unwrap();

        let player = players::insert_player(&conn, "alice", 1500.0).unwrap();
        let found = players::find_by_id(&conn, player.id).unwrap().unwrap();
        assert_eq!(found.name, "alice");
        assert_eq!(found.current_elo, 1500.0);

        drop(conn);
        drop(pool);
        let _ = std::fs::remove_file(&path);
    }
}
