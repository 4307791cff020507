pub mod auth_service;
pub mod checkpoint_service;
pub mod journey_service;
pub mod validation_service;

pub use auth_service::AuthService;
pub use checkpoint_service::CheckpointService;
pub use journey_service::JourneyService;
pub use validation_service::{
    ValidateCheckpointParams, ValidationErrors, ValidationReport, ValidationService,
    ValidationVerdict, DEFAULT_PROXIMITY_RADIUS_METERS,
};
