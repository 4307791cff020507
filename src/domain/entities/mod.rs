pub mod checkpoint;
pub mod journey;
pub mod question;
pub mod user;
pub mod validation;

pub use checkpoint::{Checkpoint, ScanOutcome};
pub use journey::{Journey, JourneyPoint};
pub use question::{Answer, Question, ANSWERS_PER_QUESTION};
pub use user::User;
pub use validation::{JourneyProgress, ValidationRecord};
