use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;

use crate::config::settings::AppConfig;
use crate::database::{self, Match};
use crate::domain;
use crate::rating::{self, types::MatchRecord};

/// Rebuilds every rating, counter and per-match snapshot by replaying the
/// whole match history. Maintenance operation: run after correcting
/// historical data or changing the rating formula.
pub struct RecalculationService {
    config: AppConfig,
}

impl RecalculationService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<()> {
        let db_path = AppConfig::database_path();
        info!("=== Starting full rating recalculation ===");
        info!("Database: {}", db_path);

        let pool = database::create_pool(&db_path)?;
        let mut conn = database::get_connection(&pool)?;

        let replayed = self.recalculate(&mut conn)?;

        info!("=== Recalculated {} match(es) ===", replayed);
        Ok(())
    }

    /// The whole replay runs inside one transaction: history and roster are
    /// read from a consistent snapshot, and either every player and match
    /// row is rewritten or none is. A reader never sees a half-replayed
    /// state, and an integrity fault rolls everything back.
    pub fn recalculate(&self, conn: &mut Connection) -> Result<usize> {
        let tx = conn
            .transaction()
            .context("Failed to open recalculation transaction")?;

        let matches = database::matches::list_chronological(&tx)?;
        let players = database::players::list_all(&tx)?;
        let roster: Vec<i64> = players.iter().map(|p| p.id).collect();
        let records: Vec<MatchRecord> = matches.iter().map(to_match_record).collect();

        let outcome = rating::replay(&records, &roster, &self.config.rating)?;

        for (match_id, snapshot) in &outcome.snapshots {
            database::matches::update_snapshot(&tx, *match_id, snapshot)?;
        }

        for player in &players {
            let elo = outcome
                .ratings
                .get(&player.id)
                .copied()
                .unwrap_or(self.config.rating.initial_rating);
            let stats = outcome.stats.get(&player.id).copied().unwrap_or_default();
            database::players::store_recalculated(&tx, player.id, elo, &stats)?;
        }

        tx.commit()
            .context("Failed to commit recalculated ratings")?;

        Ok(records.len())
    }
}

fn to_match_record(m: &Match) -> MatchRecord {
    MatchRecord {
        id: m.id,
        player1_id: m.player1_id,
        player2_id: m.player2_id,
        winner_id: m.winner_id,
        sets: domain::parse_sets(m.sets.as_deref()),
    }
}
