use crate::application::ports::remote::{RemoteCheckpoint, RemoteQuestion};
use crate::domain::entities::{Answer, Checkpoint, Question};
use crate::domain::value_objects::{Code, Coordinates};
use crate::shared::{AppError, Result};

pub fn map_question(record: &RemoteQuestion) -> Result<Question> {
    let answers = record
        .answers
        .iter()
        .map(|a| Answer::new(a.id.clone(), a.text.clone(), a.is_correct))
        .collect();
    Question::new(record.id.clone(), record.text.clone(), answers)
        .map_err(AppError::ValidationError)
}

pub fn map_checkpoint(record: &RemoteCheckpoint) -> Result<Checkpoint> {
    let question = record
        .question
        .as_ref()
        .ok_or_else(|| {
            AppError::ValidationError(format!("Checkpoint {} has no linked question", record.id))
        })
        .and_then(map_question)?;

    let code = Code::new(record.code.clone()).map_err(AppError::ValidationError)?;
    let coordinates =
        Coordinates::new(record.latitude, record.longitude).map_err(AppError::ValidationError)?;

    Checkpoint::new(
        record.id.clone(),
        code,
        record.location_name.clone(),
        coordinates,
        question,
        record.description.clone(),
    )
    .map_err(AppError::ValidationError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::remote::RemoteAnswer;

    pub(crate) fn sample_remote_checkpoint() -> RemoteCheckpoint {
        RemoteCheckpoint {
            id: "cp1".into(),
            code: "QR-001".into(),
            location_name: "Praça da Matriz".into(),
            latitude: -21.547429,
            longitude: -45.4392,
            description: Some("Main square".into()),
            question: Some(RemoteQuestion {
                id: "q1".into(),
                text: "Founded in?".into(),
                answers: (0..4)
                    .map(|i| RemoteAnswer {
                        id: format!("a{}", i),
                        question_id: "q1".into(),
                        text: format!("Answer {}", i),
                        is_correct: i == 1,
                    })
                    .collect(),
            }),
        }
    }

    #[test]
    fn test_map_checkpoint_builds_entity() {
        let checkpoint = map_checkpoint(&sample_remote_checkpoint()).unwrap();
        assert_eq!(checkpoint.code.as_str(), "QR-001");
        assert_eq!(checkpoint.question.correct_answer().id, "a1");
    }

    #[test]
    fn test_map_checkpoint_without_question_fails() {
        let mut record = sample_remote_checkpoint();
        record.question = None;
        assert!(matches!(
            map_checkpoint(&record),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_map_question_enforces_cardinality() {
        let mut record = sample_remote_checkpoint();
        if let Some(q) = record.question.as_mut() {
            q.answers.pop();
        }
        assert!(map_checkpoint(&record).is_err());
    }
}
