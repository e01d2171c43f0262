pub use action::{Action, ActionMapper, ActionScheme, ActionSpace, ActionTable, Command};
pub use cgmath;
pub use config::EnvConfig;
pub use env::{Collaborators, EpisodePhase, EpisodeStats, RacerEnv, StepResult, VehicleState};
pub use error::{EnvError, Result};
pub use observation::{Frame, Observation, PixelFormat};
pub use pose::{reset_pose, reset_pose_facing, Direction, Pose};
pub use progress::{find_closest_waypoint, progress_delta, ProgressTracker, ProgressUpdate};
pub use reward::{BaselineReward, RewardFunction, RewardInput, SURVIVAL_BONUS};
pub use sinks::{Actuator, LogSink, LogTraceSink, MetricsSink, Placement, TraceSink, WriterTraceSink};
pub use telemetry::{RandomTelemetry, SensorFeed, TelemetrySnapshot, TelemetrySource};
pub use trace::TraceRecord;
pub use track::{lookup_track, Track, TrackId};
pub use util::Interval;

pub mod action;
mod config;
mod env;
mod error;
pub mod math;
mod observation;
mod pose;
mod progress;
mod reward;
mod sinks;
mod telemetry;
pub mod trace;
mod track;
mod util;
