use crate::application::ports::remote::{RemoteJourney, RemoteJourneyPoint};
use crate::domain::entities::{Journey, JourneyPoint};
use crate::domain::value_objects::Coordinates;
use crate::shared::{AppError, Result};

pub fn map_journey_point(record: &RemoteJourneyPoint) -> Result<JourneyPoint> {
    let coordinates =
        Coordinates::new(record.latitude, record.longitude).map_err(AppError::ValidationError)?;
    Ok(JourneyPoint::new(
        record.id.clone(),
        record.name.clone(),
        coordinates,
        record.description.clone(),
    ))
}

pub fn map_journey(record: &RemoteJourney) -> Result<Journey> {
    let mut ordered = record.points.clone();
    ordered.sort_by_key(|p| p.order_index);

    let points = ordered
        .iter()
        .map(map_journey_point)
        .collect::<Result<Vec<_>>>()?;

    Journey::new(
        record.id.clone(),
        record.name.clone(),
        record.description.clone(),
        points,
    )
    .map_err(AppError::ValidationError)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_remote_journey() -> RemoteJourney {
        RemoteJourney {
            id: "j1".into(),
            name: "Historic center".into(),
            description: None,
            points: vec![
                RemoteJourneyPoint {
                    id: "p2".into(),
                    journey_id: "j1".into(),
                    name: "Second".into(),
                    latitude: -21.55,
                    longitude: -45.44,
                    order_index: 2,
                    description: None,
                    checkpoint: None,
                },
                RemoteJourneyPoint {
                    id: "p1".into(),
                    journey_id: "j1".into(),
                    name: "First".into(),
                    latitude: -21.54,
                    longitude: -45.43,
                    order_index: 1,
                    description: None,
                    checkpoint: None,
                },
            ],
        }
    }

    #[test]
    fn test_map_journey_orders_points() {
        let journey = map_journey(&sample_remote_journey()).unwrap();
        assert_eq!(journey.points()[0].id, "p1");
        assert_eq!(journey.points()[1].id, "p2");
        assert_eq!(journey.current_point_index, 0);
    }

    #[test]
    fn test_map_journey_rejects_bad_coordinates() {
        let mut record = sample_remote_journey();
        record.points[0].latitude = 123.0;
        assert!(map_journey(&record).is_err());
    }
}
