use super::ConnectionPool;
use crate::shared::{AppError, Result};
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Tables wiped by `clear_all`, children before parents so cascades and
/// restrict constraints never fire mid-wipe.
const CLEAR_ORDER: [&str; 8] = [
    "validations",
    "journey_points",
    "user_journeys",
    "journeys",
    "qrcodes",
    "answers",
    "questions",
    "users",
];

/// On-device mirror of the remote schema. Usable with the backend unreachable;
/// rows are written exclusively by the `CacheSynchronizer`.
#[derive(Clone)]
pub struct CacheStore {
    pool: ConnectionPool,
    initialized: Arc<AtomicBool>,
}

impl CacheStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            pool,
            initialized: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Idempotent schema creation. Must run before any other operation.
    pub async fn initialize(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(self.pool.get_pool())
                .await?;
        }
        self.initialized.store(true, Ordering::SeqCst);
        info!("Local cache schema ready");
        Ok(())
    }

    /// Pool handle for cache queries. Errs if `initialize` was never called.
    pub fn connection(&self) -> Result<&SqlitePool> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(AppError::Database(
                "Cache store used before initialize()".to_string(),
            ));
        }
        Ok(self.pool.get_pool())
    }

    /// Wipes every mirrored row. Used for resets and tests.
    pub async fn clear_all(&self) -> Result<()> {
        let pool = self.connection()?;
        let mut tx = pool.begin().await?;
        for table in CLEAR_ORDER {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

const SCHEMA: [&str; 11] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        avatar_url TEXT,
        updated_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS questions (
        id TEXT PRIMARY KEY,
        text TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS answers (
        id TEXT PRIMARY KEY,
        question_id TEXT NOT NULL,
        text TEXT NOT NULL,
        is_correct INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY (question_id) REFERENCES questions(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS qrcodes (
        id TEXT PRIMARY KEY,
        code TEXT NOT NULL,
        location_name TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        description TEXT,
        question_id TEXT NOT NULL,
        FOREIGN KEY (question_id) REFERENCES questions(id) ON DELETE RESTRICT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS validations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id TEXT NOT NULL,
        qrcode_id TEXT NOT NULL,
        answer_id TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        distance_meters REAL NOT NULL,
        outcome TEXT NOT NULL,
        recorded_at INTEGER NOT NULL,
        FOREIGN KEY (qrcode_id) REFERENCES qrcodes(id) ON DELETE CASCADE,
        FOREIGN KEY (answer_id) REFERENCES answers(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS journeys (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS journey_points (
        id TEXT PRIMARY KEY,
        journey_id TEXT NOT NULL,
        qrcode_id TEXT,
        name TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        order_index INTEGER NOT NULL,
        description TEXT,
        FOREIGN KEY (journey_id) REFERENCES journeys(id) ON DELETE CASCADE,
        FOREIGN KEY (qrcode_id) REFERENCES qrcodes(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_journeys (
        user_id TEXT NOT NULL,
        journey_id TEXT NOT NULL,
        current_point_index INTEGER NOT NULL DEFAULT 0,
        is_completed INTEGER NOT NULL DEFAULT 0,
        updated_at INTEGER NOT NULL,
        PRIMARY KEY (user_id, journey_id),
        FOREIGN KEY (journey_id) REFERENCES journeys(id) ON DELETE CASCADE
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_qrcodes_code ON qrcodes(code)",
    "CREATE INDEX IF NOT EXISTS idx_answers_question ON answers(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_validations_user ON validations(user_id)",
];
