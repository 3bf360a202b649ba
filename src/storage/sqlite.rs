use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::models::TierAnalysis;
use crate::storage::{AnalysisStore, CachedAnalysis};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS analyses (
                username TEXT PRIMARY KEY NOT NULL,
                tier TEXT NOT NULL,
                overall_score INTEGER NOT NULL,
                analyzed_at TEXT NOT NULL,
                saved_at TEXT NOT NULL,
                analysis_json TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_analyses_saved_at ON analyses(saved_at);
            "#,
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| Error::Storage("analysis store lock poisoned".to_string()))?;
        f(&conn)
    }

    /// Cached usernames, most recently saved first.
    pub fn list_usernames(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT username FROM analyses ORDER BY saved_at DESC")?;
            let usernames = stmt.query_map([], |row| row.get(0))?;
            usernames
                .collect::<std::result::Result<Vec<String>, _>>()
                .map_err(Into::into)
        })
    }
}

fn key(username: &str) -> String {
    username.trim().to_lowercase()
}

impl AnalysisStore for SqliteStore {
    fn load(&self, username: &str) -> Result<Option<CachedAnalysis>> {
        let row = self.with_conn(|conn| {
            conn.query_row(
                "SELECT analysis_json, saved_at FROM analyses WHERE username = ?1",
                params![key(username)],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(Into::into)
        })?;

        let Some((json, saved_at)) = row else {
            return Ok(None);
        };

        let analysis: TierAnalysis = serde_json::from_str(&json)?;
        let saved_at = chrono::DateTime::parse_from_rfc3339(&saved_at)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .unwrap_or(analysis.analyzed_at);

        Ok(Some(CachedAnalysis { analysis, saved_at }))
    }

    fn save(&self, analysis: &TierAnalysis) -> Result<()> {
        let json = serde_json::to_string(analysis)?;
        let saved_at = chrono::Utc::now().to_rfc3339();

        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO analyses (username, tier, overall_score, analyzed_at, saved_at, analysis_json)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(username) DO UPDATE SET
                    tier = excluded.tier,
                    overall_score = excluded.overall_score,
                    analyzed_at = excluded.analyzed_at,
                    saved_at = excluded.saved_at,
                    analysis_json = excluded.analysis_json
                "#,
                params![
                    key(&analysis.username),
                    analysis.tier.to_string(),
                    analysis.overall_score,
                    analysis.analyzed_at.to_rfc3339(),
                    saved_at,
                    json,
                ],
            )?;
            Ok(())
        })
    }

    fn remove(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM analyses WHERE username = ?1",
                params![key(username)],
            )?;
            Ok(deleted > 0)
        })
    }
}
