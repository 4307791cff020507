use crate::domain::entities::Question;
use crate::domain::value_objects::{Code, Coordinates};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanOutcome {
    Matched,
    Mismatched,
}

impl ScanOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanOutcome::Matched => "matched",
            ScanOutcome::Mismatched => "mismatched",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "matched" => Ok(ScanOutcome::Matched),
            "mismatched" => Ok(ScanOutcome::Mismatched),
            other => Err(format!("Unknown scan outcome '{}'", other)),
        }
    }
}

/// A physical checkpoint: the QR code, its location, and its quiz question.
/// Instances are immutable; recording a scan outcome produces a new copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: String,
    pub code: Code,
    pub location_name: String,
    pub coordinates: Coordinates,
    pub question: Question,
    pub description: Option<String>,
    pub last_outcome: Option<ScanOutcome>,
    pub scanned_at: Option<DateTime<Utc>>,
}

impl Checkpoint {
    pub fn new(
        id: String,
        code: Code,
        location_name: String,
        coordinates: Coordinates,
        question: Question,
        description: Option<String>,
    ) -> Result<Self, String> {
        if location_name.trim().is_empty() {
            return Err("Checkpoint location name cannot be empty".to_string());
        }
        Ok(Self {
            id,
            code,
            location_name,
            coordinates,
            question,
            description,
            last_outcome: None,
            scanned_at: None,
        })
    }

    /// Validated copy carrying the scan outcome and timestamp.
    pub fn with_outcome(&self, outcome: ScanOutcome, at: DateTime<Utc>) -> Checkpoint {
        let mut updated = self.clone();
        updated.last_outcome = Some(outcome);
        updated.scanned_at = Some(at);
        updated
    }
}
