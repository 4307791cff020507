pub mod auth;
pub mod checkpoint;
pub mod journey;
pub mod progress;

pub use auth::HybridAuthRepository;
pub use checkpoint::HybridCheckpointRepository;
pub use journey::HybridJourneyRepository;
pub use progress::HybridProgressRepository;
