use serde::{Deserialize, Serialize};

pub const ANSWERS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl Answer {
    pub fn new(id: String, text: String, is_correct: bool) -> Self {
        Self {
            id,
            text,
            is_correct,
        }
    }
}

/// Quiz question attached to a checkpoint. Every construction path (remote
/// mapping, cache mapping, fixtures) goes through `new`, so a `Question` always
/// holds exactly four answers with exactly one marked correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    answers: Vec<Answer>,
}

impl Question {
    pub fn new(id: String, text: String, answers: Vec<Answer>) -> Result<Self, String> {
        if text.trim().is_empty() {
            return Err("Question text cannot be empty".to_string());
        }
        if answers.len() != ANSWERS_PER_QUESTION {
            return Err(format!(
                "Question must have exactly {} answers, got {}",
                ANSWERS_PER_QUESTION,
                answers.len()
            ));
        }
        let correct_count = answers.iter().filter(|a| a.is_correct).count();
        if correct_count != 1 {
            return Err(format!(
                "Question must have exactly 1 correct answer, got {}",
                correct_count
            ));
        }
        Ok(Self { id, text, answers })
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn correct_answer(&self) -> &Answer {
        // Cardinality is enforced at construction.
        self.answers
            .iter()
            .find(|a| a.is_correct)
            .unwrap_or(&self.answers[0])
    }

    pub fn is_correct_answer(&self, answer_id: &str) -> bool {
        self.correct_answer().id == answer_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(correct_index: usize) -> Vec<Answer> {
        (0..4)
            .map(|i| {
                Answer::new(
                    format!("a{}", i),
                    format!("Answer {}", i),
                    i == correct_index,
                )
            })
            .collect()
    }

    #[test]
    fn test_question_accepts_four_answers_one_correct() {
        let question = Question::new("q1".into(), "Which year?".into(), answers(2)).unwrap();
        assert_eq!(question.correct_answer().id, "a2");
        assert!(question.is_correct_answer("a2"));
        assert!(!question.is_correct_answer("a0"));
    }

    #[test]
    fn test_question_rejects_three_answers() {
        let mut three = answers(0);
        three.pop();
        assert!(Question::new("q1".into(), "Which year?".into(), three).is_err());
    }

    #[test]
    fn test_question_rejects_two_correct_answers() {
        let mut two_correct = answers(0);
        two_correct[1].is_correct = true;
        assert!(Question::new("q1".into(), "Which year?".into(), two_correct).is_err());
    }

    #[test]
    fn test_question_rejects_no_correct_answer() {
        let mut none = answers(0);
        none[0].is_correct = false;
        assert!(Question::new("q1".into(), "Which year?".into(), none).is_err());
    }

    #[test]
    fn test_question_rejects_blank_text() {
        assert!(Question::new("q1".into(), "  ".into(), answers(0)).is_err());
    }
}
