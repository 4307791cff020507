use crate::domain::entities::{Answer, Checkpoint, Question};
use crate::domain::value_objects::{Code, Coordinates};
use crate::infrastructure::database::CacheStore;
use crate::shared::{AppError, Result};
use sqlx::Row;

/// Cache-side checkpoint reads. Rows are reassembled through the same
/// invariant-checked constructors the remote mappers use.
#[derive(Clone)]
pub struct CheckpointCache {
    store: CacheStore,
}

impl CheckpointCache {
    pub fn new(store: CacheStore) -> Self {
        Self { store }
    }

    pub async fn get_by_code(&self, code: &Code) -> Result<Option<Checkpoint>> {
        self.fetch("SELECT * FROM qrcodes WHERE code = ?", code.as_str())
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Checkpoint>> {
        self.fetch("SELECT * FROM qrcodes WHERE id = ?", id).await
    }

    async fn fetch(&self, query: &str, key: &str) -> Result<Option<Checkpoint>> {
        let pool = self.store.connection()?;
        let row = sqlx::query(query).bind(key).fetch_optional(pool).await?;

        let row = match row {
            Some(row) => row,
            None => return Ok(None),
        };

        let id: String = row.try_get("id")?;
        let code: String = row.try_get("code")?;
        let location_name: String = row.try_get("location_name")?;
        let latitude: f64 = row.try_get("latitude")?;
        let longitude: f64 = row.try_get("longitude")?;
        let description: Option<String> = row.try_get("description")?;
        let question_id: String = row.try_get("question_id")?;

        let question = self.load_question(&question_id).await?;
        let code = Code::new(code).map_err(AppError::ValidationError)?;
        let coordinates =
            Coordinates::new(latitude, longitude).map_err(AppError::ValidationError)?;

        Checkpoint::new(id, code, location_name, coordinates, question, description)
            .map(Some)
            .map_err(AppError::ValidationError)
    }

    async fn load_question(&self, question_id: &str) -> Result<Question> {
        let pool = self.store.connection()?;

        let question_row = sqlx::query("SELECT text FROM questions WHERE id = ?")
            .bind(question_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cached question {}", question_id)))?;
        let text: String = question_row.try_get("text")?;

        let answer_rows = sqlx::query(
            "SELECT id, text, is_correct FROM answers WHERE question_id = ? ORDER BY id",
        )
        .bind(question_id)
        .fetch_all(pool)
        .await?;

        let mut answers = Vec::with_capacity(answer_rows.len());
        for row in answer_rows {
            let id: String = row.try_get("id")?;
            let answer_text: String = row.try_get("text")?;
            let is_correct: i64 = row.try_get("is_correct")?;
            answers.push(Answer::new(id, answer_text, is_correct != 0));
        }

        Question::new(question_id.to_string(), text, answers).map_err(AppError::ValidationError)
    }
}
