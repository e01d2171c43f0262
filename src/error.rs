use crate::env::EpisodePhase;
use std::time::Duration;

/// The errors that can be raised by the environment.
#[derive(thiserror::Error, Debug)]
pub enum EnvError {
    /// The world name does not match any known track.
    #[error("Unknown simulation world: {0}")]
    UnknownTrack(String),
    /// The track's waypoints span no distance at all.
    #[error("Track length is zero: {0}")]
    DegenerateTrack(String),
    /// A discrete action outside the action space of the mapping scheme.
    #[error("Invalid action {action}, expected an index below {num_actions}")]
    InvalidAction { action: usize, num_actions: usize },
    /// No camera frame arrived within the allowed time.
    #[error("No camera frame received within {0:?}")]
    TelemetryStale(Duration),
    /// A camera frame whose buffer does not match its dimensions.
    #[error("Invalid camera frame: {0}")]
    InvalidFrame(String),
    /// `step` was called while no episode was running.
    #[error("Cannot step while the episode is {0:?}")]
    NotRunning(EpisodePhase),
    /// The vehicle could not be moved to its starting pose.
    #[error("Failed to place vehicle: {0}")]
    Placement(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EnvError>;
