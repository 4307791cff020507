use crate::domain::value_objects::Coordinates;
use serde::{Deserialize, Serialize};

/// One stop along a journey. Identity mirrors the checkpoint it represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyPoint {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub is_completed: bool,
    pub description: Option<String>,
}

impl JourneyPoint {
    pub fn new(
        id: String,
        name: String,
        coordinates: Coordinates,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            coordinates,
            is_completed: false,
            description,
        }
    }

    pub fn completed(&self) -> JourneyPoint {
        let mut updated = self.clone();
        updated.is_completed = true;
        updated
    }
}

/// Ordered sequence of checkpoints a user walks through. Immutable; every
/// update returns a new instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    points: Vec<JourneyPoint>,
    pub current_point_index: usize,
    pub is_completed: bool,
}

impl Journey {
    pub fn new(
        id: String,
        name: String,
        description: Option<String>,
        points: Vec<JourneyPoint>,
    ) -> Result<Self, String> {
        if name.trim().is_empty() {
            return Err("Journey name cannot be empty".to_string());
        }
        Ok(Self {
            id,
            name,
            description,
            points,
            current_point_index: 0,
            is_completed: false,
        })
    }

    pub fn points(&self) -> &[JourneyPoint] {
        &self.points
    }

    pub fn current_point(&self) -> Option<&JourneyPoint> {
        self.points.get(self.current_point_index)
    }

    /// Applies stored per-user progress: points before the index are completed.
    pub fn with_progress(&self, current_point_index: usize, is_completed: bool) -> Journey {
        let mut updated = self.clone();
        updated.current_point_index = current_point_index.min(self.points.len());
        updated.is_completed = is_completed;
        for (i, point) in updated.points.iter_mut().enumerate() {
            if i < updated.current_point_index || is_completed {
                *point = point.completed();
            }
        }
        updated
    }

    /// Marks the given point completed. The index advances only when the point
    /// is the current one; completing the final point completes the journey.
    pub fn complete_point(&self, point_id: &str) -> Journey {
        let position = match self.points.iter().position(|p| p.id == point_id) {
            Some(position) => position,
            None => return self.clone(),
        };

        let mut updated = self.clone();
        updated.points[position] = updated.points[position].completed();

        if position == self.current_point_index {
            updated.current_point_index += 1;
            if position + 1 == updated.points.len() {
                updated.is_completed = true;
            }
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_journey() -> Journey {
        let points = (1..=3)
            .map(|i| {
                JourneyPoint::new(
                    format!("p{}", i),
                    format!("Stop {}", i),
                    Coordinates::new(-21.5 - 0.01 * i as f64, -45.4).unwrap(),
                    None,
                )
            })
            .collect();
        Journey::new("j1".into(), "Historic center".into(), None, points).unwrap()
    }

    #[test]
    fn test_journey_rejects_blank_name() {
        assert!(Journey::new("j1".into(), " ".into(), None, vec![]).is_err());
    }

    #[test]
    fn test_complete_current_point_advances_index() {
        let journey = sample_journey();
        let updated = journey.complete_point("p1");

        assert_eq!(updated.current_point_index, 1);
        assert!(updated.points()[0].is_completed);
        assert!(!updated.is_completed);
        assert_eq!(journey.current_point_index, 0);
    }

    #[test]
    fn test_complete_non_current_point_keeps_index() {
        let journey = sample_journey();
        let updated = journey.complete_point("p3");

        assert_eq!(updated.current_point_index, 0);
        assert!(updated.points()[2].is_completed);
        assert!(!updated.is_completed);
    }

    #[test]
    fn test_complete_last_point_completes_journey() {
        let journey = sample_journey()
            .complete_point("p1")
            .complete_point("p2")
            .complete_point("p3");

        assert!(journey.is_completed);
        assert_eq!(journey.current_point_index, 3);
        assert!(journey.points().iter().all(|p| p.is_completed));
    }

    #[test]
    fn test_complete_unknown_point_is_noop() {
        let journey = sample_journey();
        let updated = journey.complete_point("p99");
        assert_eq!(updated, journey);
    }

    #[test]
    fn test_with_progress_marks_passed_points() {
        let journey = sample_journey().with_progress(2, false);

        assert_eq!(journey.current_point_index, 2);
        assert!(journey.points()[0].is_completed);
        assert!(journey.points()[1].is_completed);
        assert!(!journey.points()[2].is_completed);
    }
}
