pub mod checkpoints;
pub mod journeys;
pub mod progress;
pub mod users;
pub mod validations;

pub use checkpoints::CheckpointCache;
pub use journeys::JourneyCache;
pub use progress::ProgressCache;
pub use users::UserCache;
pub use validations::ValidationCache;
