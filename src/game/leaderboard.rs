use std::path::{Path, PathBuf};

use log::{error, trace};
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::model::ResultRecord;

pub const DEFAULT_TOP_N: usize = 10;

const CREATE_TABLE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS Leaderboard (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        PlayerName TEXT NOT NULL,
        GridSize INTEGER NOT NULL,
        TimeTaken REAL NOT NULL,
        Result TEXT NOT NULL
    )";

const INSERT_SQL: &str =
    "INSERT INTO Leaderboard (PlayerName, GridSize, TimeTaken, Result) VALUES (?1, ?2, ?3, ?4)";

const TOP_N_SQL: &str = "
    SELECT PlayerName, GridSize, TimeTaken, Result
    FROM Leaderboard
    ORDER BY TimeTaken ASC, ID ASC
    LIMIT ?1";

/// Durable, time-ranked collection of finished rounds.
///
/// Storage failures never escape: they are logged and reported through the
/// return value so a broken store cannot end a game session.
pub trait LeaderboardStore {
    /// Creates the backing table if it is missing. Safe to call repeatedly.
    fn ensure_schema(&self) -> bool;

    /// Stores one record, returning its new id, or `None` if it could not be saved.
    fn append(&self, record: &ResultRecord) -> Option<i64>;

    /// Up to `n` records, fastest first. Ranking ignores the outcome.
    fn top_n(&self, n: usize) -> Vec<ResultRecord>;

    fn top(&self) -> Vec<ResultRecord> {
        self.top_n(DEFAULT_TOP_N)
    }
}

/// SQLite-backed leaderboard. Each call opens its own connection and closes
/// it before returning.
#[derive(Debug, Clone)]
pub struct SqliteLeaderboard {
    path: PathBuf,
}

impl SqliteLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    fn try_ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(CREATE_TABLE_SQL)?;
        Ok(())
    }

    fn try_append(&self, record: &ResultRecord) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            INSERT_SQL,
            params![
                record.player_name,
                record.grid_size as i64,
                record.time_taken_seconds,
                record.outcome
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn try_top_n(&self, n: usize) -> Result<Vec<ResultRecord>> {
        let conn = self.connect()?;
        let mut statement = conn.prepare(TOP_N_SQL)?;
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        let records = statement
            .query_map([limit], |row| {
                let grid_size: i64 = row.get(1)?;
                Ok(ResultRecord::new(
                    row.get::<_, String>(0)?,
                    usize::try_from(grid_size)
                        .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(1, grid_size))?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }
}

impl LeaderboardStore for SqliteLeaderboard {
    fn ensure_schema(&self) -> bool {
        match self.try_ensure_schema() {
            Ok(()) => true,
            Err(err) => {
                error!(target: "leaderboard", "Database error creating schema in {:?}: {}", self.path, err);
                false
            }
        }
    }

    fn append(&self, record: &ResultRecord) -> Option<i64> {
        match self.try_append(record) {
            Ok(id) => {
                trace!(target: "leaderboard", "Saved result {} as #{}", record, id);
                Some(id)
            }
            Err(err) => {
                error!(target: "leaderboard", "Database error saving {}: {}", record, err);
                None
            }
        }
    }

    fn top_n(&self, n: usize) -> Vec<ResultRecord> {
        self.try_top_n(n).unwrap_or_else(|err| {
            error!(target: "leaderboard", "Database error reading leaderboard: {}", err);
            Vec::new()
        })
    }
}
