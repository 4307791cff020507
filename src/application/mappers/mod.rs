pub mod checkpoints;
pub mod journeys;
pub mod users;

pub use checkpoints::{map_checkpoint, map_question};
pub use journeys::{map_journey, map_journey_point};
pub use users::map_user;
