//! The per-step trace consumed by the training visualisation tools.
//!
//! Each step produces one comma separated line with a fixed field order:
//!
//! | # | Field                    | Format |
//! |---|--------------------------|--------|
//! | 1 | episode                  | int    |
//! | 2 | step                     | int    |
//! | 3 | x                        | `.4`   |
//! | 4 | y                        | `.4`   |
//! | 5 | yaw                      | `.4`   |
//! | 6 | steering                 | `.2`   |
//! | 7 | throttle                 | `.2`   |
//! | 8 | action                   | int    |
//! | 9 | reward                   | `.4`   |
//! | 10 | total progress          | `.4`   |
//! | 11 | expert action (always 0) | int   |
//! | 12 | done                    | `True`/`False` |
//! | 13 | on track                | `True`/`False` |
//! | 14 | progress delta          | `.4`   |
//! | 15 | start waypoint (always 0) | int  |
//! | 16 | closest waypoint        | int    |
//! | 17 | track length            | `.2`   |
//! | 18 | distance from centre    | `.4`   |
//! | 19 | distance from border 1  | `.4`   |
//! | 20 | distance from border 2  | `.4`   |
//! | 21 | unix timestamp in s     | float  |

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// The prefix which marks trace lines in the simulation log.
pub const TRACE_PREFIX: &str = "SIM_TRACE_LOG:";

/// The number of fields in a trace line.
pub const TRACE_FIELDS: usize = 21;

/// The state of the environment after one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TraceRecord {
    pub episode: usize,
    pub step: usize,
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
    pub steering: f64,
    pub throttle: f64,
    /// The discrete action taken, or -1 for a continuous command.
    pub action: i64,
    pub reward: f64,
    pub total_progress: f64,
    pub done: bool,
    pub on_track: bool,
    pub progress_delta: f64,
    pub closest_waypoint: usize,
    pub track_length: f64,
    pub distance_from_center: f64,
    pub distance_from_border_1: f64,
    pub distance_from_border_2: f64,
    /// Seconds since the unix epoch.
    pub timestamp: f64,
}

/// The current wall-clock time in seconds since the unix epoch.
pub fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

struct PyBool(bool);

impl fmt::Display for PyBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "True" } else { "False" })
    }
}

impl fmt::Display for TraceRecord {
    /// Writes the comma separated fields, without the [TRACE_PREFIX].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{:.4},{:.4},{:.4},{:.2},{:.2},{},{:.4},{:.4},{},{},{},{:.4},{},{},{:.2},{:.4},{:.4},{:.4},{}",
            self.episode,
            self.step,
            self.x,
            self.y,
            self.yaw,
            self.steering,
            self.throttle,
            self.action,
            self.reward,
            self.total_progress,
            0,
            PyBool(self.done),
            PyBool(self.on_track),
            self.progress_delta,
            0,
            self.closest_waypoint,
            self.track_length,
            self.distance_from_center,
            self.distance_from_border_1,
            self.distance_from_border_2,
            self.timestamp,
        )
    }
}

impl TraceRecord {
    /// The full trace line, including the [TRACE_PREFIX].
    pub fn to_line(&self) -> String {
        format!("{}{}", TRACE_PREFIX, self)
    }
}
