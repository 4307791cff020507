pub mod connectivity;
pub mod remote;
pub mod repositories;

pub use connectivity::{Connectivity, ConnectivityProbe};
pub use remote::{
    RemoteAnswer, RemoteAuthSource, RemoteCheckpoint, RemoteCheckpointSource, RemoteJourney,
    RemoteJourneyPoint, RemoteJourneySource, RemoteProgressSource, RemoteQuestion, RemoteUser,
    RemoteValidationSink,
};
pub use repositories::{
    AuthRepository, CheckpointRepository, JourneyRepository, ProgressRepository, ValidationStore,
};
