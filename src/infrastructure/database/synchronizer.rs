use crate::application::ports::remote::{RemoteCheckpoint, RemoteJourney, RemoteUser};
use crate::domain::entities::{JourneyProgress, ValidationRecord};
use crate::infrastructure::database::CacheStore;
use crate::shared::Result;
use sqlx::{Sqlite, Transaction};
use tracing::warn;

/// One-way propagation of freshly fetched remote rows into the local cache.
/// Every operation is an idempotent upsert running in a single transaction,
/// so a failure midway rolls back instead of leaving orphaned rows.
#[derive(Clone)]
pub struct CacheSynchronizer {
    store: CacheStore,
}

impl CacheSynchronizer {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    /// Upserts question, answers, and checkpoint row, in dependency order.
    /// A checkpoint without a linked question cannot be cached meaningfully
    /// and is skipped with a warning.
    pub async fn sync_checkpoint(&self, record: &RemoteCheckpoint) -> Result<()> {
        if record.question.is_none() {
            warn!(
                checkpoint_id = %record.id,
                "Skipping cache sync: checkpoint has no linked question"
            );
            return Ok(());
        }

        let pool = self.store.connection()?;
        let mut tx = pool.begin().await?;
        upsert_checkpoint(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Delete-then-insert keyed by (user, checkpoint): last write wins, so an
    /// online re-sync of an offline attempt never duplicates rows.
    pub async fn sync_validation(&self, record: &ValidationRecord) -> Result<()> {
        let pool = self.store.connection()?;
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM validations WHERE user_id = ? AND qrcode_id = ?")
            .bind(&record.user_id)
            .bind(&record.checkpoint_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO validations
                (user_id, qrcode_id, answer_id, latitude, longitude,
                 distance_meters, outcome, recorded_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.user_id)
        .bind(&record.checkpoint_id)
        .bind(&record.answer_id)
        .bind(record.coordinates.latitude())
        .bind(record.coordinates.longitude())
        .bind(record.distance_meters)
        .bind(record.outcome.as_str())
        .bind(record.recorded_at.timestamp_millis())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Upserts the journey row, its points, and each point's checkpoint. A
    /// point whose checkpoint cannot be cached (no nested question) is stored
    /// without a checkpoint reference; a re-sync never replaces an existing
    /// reference with NULL.
    pub async fn sync_journey(&self, record: &RemoteJourney) -> Result<()> {
        let pool = self.store.connection()?;
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO journeys (id, name, description)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.description)
        .execute(&mut *tx)
        .await?;

        for point in &record.points {
            let mut qrcode_id = None;
            if let Some(checkpoint) = point.checkpoint.as_ref() {
                if checkpoint.question.is_some() {
                    upsert_checkpoint(&mut tx, checkpoint).await?;
                    qrcode_id = Some(checkpoint.id.clone());
                } else {
                    warn!(
                        checkpoint_id = %checkpoint.id,
                        "Journey point checkpoint has no linked question, caching point only"
                    );
                }
            }

            sqlx::query(
                r#"
                INSERT INTO journey_points
                    (id, journey_id, qrcode_id, name, latitude, longitude,
                     order_index, description)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    journey_id = excluded.journey_id,
                    qrcode_id = COALESCE(excluded.qrcode_id, journey_points.qrcode_id),
                    name = excluded.name,
                    latitude = excluded.latitude,
                    longitude = excluded.longitude,
                    order_index = excluded.order_index,
                    description = excluded.description
                "#,
            )
            .bind(&point.id)
            .bind(&record.id)
            .bind(&qrcode_id)
            .bind(&point.name)
            .bind(point.latitude)
            .bind(point.longitude)
            .bind(point.order_index)
            .bind(&point.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Upserts the user row. `updated_at` is stamped with the current time
    /// regardless of what the caller supplies.
    pub async fn sync_user(&self, record: &RemoteUser) -> Result<()> {
        let pool = self.store.connection()?;

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, avatar_url, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                avatar_url = excluded.avatar_url,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.avatar_url)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Mirrors a per-user journey progress row.
    pub async fn sync_progress(&self, progress: &JourneyProgress) -> Result<()> {
        let pool = self.store.connection()?;

        sqlx::query(
            r#"
            INSERT INTO user_journeys
                (user_id, journey_id, current_point_index, is_completed, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(user_id, journey_id) DO UPDATE SET
                current_point_index = excluded.current_point_index,
                is_completed = excluded.is_completed,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&progress.user_id)
        .bind(&progress.journey_id)
        .bind(progress.current_point_index as i64)
        .bind(progress.is_completed as i64)
        .bind(progress.updated_at.timestamp_millis())
        .execute(pool)
        .await?;

        Ok(())
    }
}

async fn upsert_checkpoint(
    tx: &mut Transaction<'_, Sqlite>,
    record: &RemoteCheckpoint,
) -> Result<()> {
    // Caller guarantees the question is present.
    let question = match record.question.as_ref() {
        Some(question) => question,
        None => return Ok(()),
    };

    sqlx::query(
        r#"
        INSERT INTO questions (id, text)
        VALUES (?, ?)
        ON CONFLICT(id) DO UPDATE SET text = excluded.text
        "#,
    )
    .bind(&question.id)
    .bind(&question.text)
    .execute(&mut **tx)
    .await?;

    for answer in &question.answers {
        sqlx::query(
            r#"
            INSERT INTO answers (id, question_id, text, is_correct)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                question_id = excluded.question_id,
                text = excluded.text,
                is_correct = excluded.is_correct
            "#,
        )
        .bind(&answer.id)
        .bind(&question.id)
        .bind(&answer.text)
        .bind(answer.is_correct as i64)
        .execute(&mut **tx)
        .await?;
    }

    sqlx::query(
        r#"
        INSERT INTO qrcodes
            (id, code, location_name, latitude, longitude, description, question_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            code = excluded.code,
            location_name = excluded.location_name,
            latitude = excluded.latitude,
            longitude = excluded.longitude,
            description = excluded.description,
            question_id = excluded.question_id
        "#,
    )
    .bind(&record.id)
    .bind(&record.code)
    .bind(&record.location_name)
    .bind(record.latitude)
    .bind(record.longitude)
    .bind(&record.description)
    .bind(&question.id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::remote::{
        RemoteAnswer, RemoteJourneyPoint, RemoteQuestion,
    };
    use crate::domain::entities::ScanOutcome;
    use crate::domain::value_objects::Coordinates;
    use crate::infrastructure::database::ConnectionPool;
    use chrono::Utc;

    async fn setup() -> (CacheSynchronizer, CacheStore) {
        let pool = ConnectionPool::in_memory().await.unwrap();
        let store = CacheStore::new(pool);
        store.initialize().await.unwrap();
        (CacheSynchronizer::new(store.clone()), store)
    }

    fn remote_checkpoint(id: &str, code: &str) -> RemoteCheckpoint {
        RemoteCheckpoint {
            id: id.to_string(),
            code: code.to_string(),
            location_name: "Praça da Matriz".into(),
            latitude: -21.547429,
            longitude: -45.4392,
            description: None,
            question: Some(RemoteQuestion {
                id: format!("{}-q", id),
                text: "Founded in?".into(),
                answers: (0..4)
                    .map(|i| RemoteAnswer {
                        id: format!("{}-a{}", id, i),
                        question_id: format!("{}-q", id),
                        text: format!("Answer {}", i),
                        is_correct: i == 0,
                    })
                    .collect(),
            }),
        }
    }

    fn validation(user: &str, checkpoint: &str, answer: &str) -> ValidationRecord {
        ValidationRecord::new(
            user.to_string(),
            checkpoint.to_string(),
            answer.to_string(),
            Coordinates::new(-21.547429, -45.4392).unwrap(),
            12.5,
            ScanOutcome::Matched,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_sync_checkpoint_upserts_dependency_order() {
        let (sync, store) = setup().await;

        sync.sync_checkpoint(&remote_checkpoint("cp1", "QR-001"))
            .await
            .unwrap();

        let pool = store.connection().unwrap();
        let (questions,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(pool)
            .await
            .unwrap();
        let (answers,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM answers")
            .fetch_one(pool)
            .await
            .unwrap();
        let (qrcodes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM qrcodes")
            .fetch_one(pool)
            .await
            .unwrap();
        assert_eq!((questions, answers, qrcodes), (1, 4, 1));
    }

    #[tokio::test]
    async fn test_sync_checkpoint_is_idempotent_and_last_write_wins() {
        let (sync, store) = setup().await;

        sync.sync_checkpoint(&remote_checkpoint("cp1", "QR-001"))
            .await
            .unwrap();
        let mut updated = remote_checkpoint("cp1", "QR-001");
        updated.location_name = "Renamed square".into();
        sync.sync_checkpoint(&updated).await.unwrap();

        let pool = store.connection().unwrap();
        let (count, name): (i64, String) =
            sqlx::query_as("SELECT COUNT(*), location_name FROM qrcodes")
                .fetch_one(pool)
                .await
                .unwrap();
        assert_eq!(count, 1);
        assert_eq!(name, "Renamed square");
    }

    #[tokio::test]
    async fn test_sync_checkpoint_without_question_is_noop() {
        let (sync, store) = setup().await;

        let mut record = remote_checkpoint("cp1", "QR-001");
        record.question = None;
        sync.sync_checkpoint(&record).await.unwrap();

        let pool = store.connection().unwrap();
        let (qrcodes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM qrcodes")
            .fetch_one(pool)
            .await
            .unwrap();
        assert_eq!(qrcodes, 0);
    }

    #[tokio::test]
    async fn test_sync_validation_dedups_by_user_and_checkpoint() {
        let (sync, store) = setup().await;
        sync.sync_checkpoint(&remote_checkpoint("cp1", "QR-001"))
            .await
            .unwrap();

        sync.sync_validation(&validation("u1", "cp1", "cp1-a0"))
            .await
            .unwrap();
        sync.sync_validation(&validation("u1", "cp1", "cp1-a2"))
            .await
            .unwrap();

        let pool = store.connection().unwrap();
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT answer_id FROM validations WHERE user_id = 'u1'")
                .fetch_all(pool)
                .await
                .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "cp1-a2");
    }

    #[tokio::test]
    async fn test_sync_validation_requires_cached_checkpoint() {
        let (sync, _store) = setup().await;
        let result = sync.sync_validation(&validation("u1", "missing", "a1")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_sync_journey_caches_points_and_checkpoints() {
        let (sync, store) = setup().await;

        let journey = RemoteJourney {
            id: "j1".into(),
            name: "Historic center".into(),
            description: None,
            points: vec![RemoteJourneyPoint {
                id: "p1".into(),
                journey_id: "j1".into(),
                name: "First stop".into(),
                latitude: -21.54,
                longitude: -45.43,
                order_index: 1,
                description: None,
                checkpoint: Some(remote_checkpoint("cp1", "QR-001")),
            }],
        };
        sync.sync_journey(&journey).await.unwrap();

        let pool = store.connection().unwrap();
        let (points,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM journey_points")
            .fetch_one(pool)
            .await
            .unwrap();
        let (qrcodes,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM qrcodes")
            .fetch_one(pool)
            .await
            .unwrap();
        assert_eq!(points, 1);
        assert_eq!(qrcodes, 1);
    }

    fn remote_journey_with_point(checkpoint: Option<RemoteCheckpoint>) -> RemoteJourney {
        RemoteJourney {
            id: "j1".into(),
            name: "Historic center".into(),
            description: None,
            points: vec![RemoteJourneyPoint {
                id: "p1".into(),
                journey_id: "j1".into(),
                name: "First stop".into(),
                latitude: -21.54,
                longitude: -45.43,
                order_index: 1,
                description: None,
                checkpoint,
            }],
        }
    }

    #[tokio::test]
    async fn test_point_with_uncacheable_checkpoint_has_no_reference() {
        let (sync, store) = setup().await;

        let mut checkpoint = remote_checkpoint("cp1", "QR-001");
        checkpoint.question = None;
        sync.sync_journey(&remote_journey_with_point(Some(checkpoint)))
            .await
            .unwrap();

        let pool = store.connection().unwrap();
        let (qrcode_id,): (Option<String>,) =
            sqlx::query_as("SELECT qrcode_id FROM journey_points WHERE id = 'p1'")
                .fetch_one(pool)
                .await
                .unwrap();
        assert!(qrcode_id.is_none());
    }

    #[tokio::test]
    async fn test_resync_without_question_keeps_checkpoint_reference() {
        let (sync, store) = setup().await;

        sync.sync_journey(&remote_journey_with_point(Some(remote_checkpoint(
            "cp1", "QR-001",
        ))))
        .await
        .unwrap();

        // Later partial payload for the same point must not drop the link.
        let mut partial = remote_checkpoint("cp1", "QR-001");
        partial.question = None;
        sync.sync_journey(&remote_journey_with_point(Some(partial)))
            .await
            .unwrap();

        let pool = store.connection().unwrap();
        let (qrcode_id,): (Option<String>,) =
            sqlx::query_as("SELECT qrcode_id FROM journey_points WHERE id = 'p1'")
                .fetch_one(pool)
                .await
                .unwrap();
        assert_eq!(qrcode_id.as_deref(), Some("cp1"));
    }

    #[tokio::test]
    async fn test_sync_user_stamps_updated_at() {
        let (sync, store) = setup().await;
        let before = Utc::now().timestamp_millis();

        sync.sync_user(&RemoteUser {
            id: "u1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            avatar_url: None,
        })
        .await
        .unwrap();

        let pool = store.connection().unwrap();
        let (updated_at,): (i64,) = sqlx::query_as("SELECT updated_at FROM users WHERE id = 'u1'")
            .fetch_one(pool)
            .await
            .unwrap();
        assert!(updated_at >= before);
    }

    #[tokio::test]
    async fn test_sync_progress_upserts_row() {
        let (sync, store) = setup().await;
        sync.sync_journey(&RemoteJourney {
            id: "j1".into(),
            name: "Historic center".into(),
            description: None,
            points: vec![],
        })
        .await
        .unwrap();

        let mut progress = JourneyProgress::started("u1".into(), "j1".into(), Utc::now());
        sync.sync_progress(&progress).await.unwrap();
        progress.current_point_index = 2;
        sync.sync_progress(&progress).await.unwrap();

        let pool = store.connection().unwrap();
        let (count, index): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), current_point_index FROM user_journeys")
                .fetch_one(pool)
                .await
                .unwrap();
        assert_eq!(count, 1);
        assert_eq!(index, 2);
    }
}
