use crate::action::ActionScheme;
use crate::error::{EnvError, Result};
use crate::pose::Direction;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;
use std::time::Duration;

/// The configuration of a [RacerEnv](crate::RacerEnv).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// The simulation world name, which selects the track.
    pub world_name: String,
    /// The direction laps are driven in.
    pub direction: Direction,
    /// The mapping from discrete actions to drive commands.
    pub action_scheme: ActionScheme,
    /// The throttle of a full speed discrete action.
    pub base_throttle: f64,
    /// The steering angle of a full lock discrete action.
    pub base_steering: f64,
    /// The pause after placing the vehicle, in ms.
    pub reset_settle_ms: u64,
    /// The pause between sending a command and observing its effect, in ms.
    pub step_settle_ms: u64,
    /// The longest wait for a camera frame before giving up, in ms.
    pub frame_timeout_ms: u64,
    /// The reward given when the vehicle leaves the track.
    /// Defaults to 0, the value existing trained models were rewarded with on a crash.
    pub crash_reward: f64,
    /// The width of observations in pixels.
    pub observation_width: u32,
    /// The height of observations in pixels.
    pub observation_height: u32,
    /// The name of the per-episode reward metric.
    pub metric_name: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            world_name: "easy_track".to_owned(),
            direction: Direction::Anticlockwise,
            action_scheme: ActionScheme::Ten,
            base_throttle: 7.0 * 0.8,
            base_steering: 0.8,
            reset_settle_ms: 500,
            step_settle_ms: 100,
            frame_timeout_ms: 5000,
            crash_reward: 0.0,
            observation_width: 160,
            observation_height: 120,
            metric_name: "EpisodeReward".to_owned(),
        }
    }
}

impl EnvConfig {
    /// Reads a JSON configuration file. Missing fields take their default values.
    pub fn from_file(filepath: &Path) -> Result<Self> {
        let fh = OpenOptions::new().read(true).open(filepath)?;
        let config: EnvConfig = serde_json::from_reader(fh)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the numeric settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.observation_width == 0 || self.observation_height == 0 {
            return Err(EnvError::Config(format!(
                "observation size {}x{} is empty",
                self.observation_width, self.observation_height
            )));
        }
        if !self.base_throttle.is_finite() || !self.base_steering.is_finite() {
            return Err(EnvError::Config(
                "base throttle and steering must be finite".to_owned(),
            ));
        }
        if !self.crash_reward.is_finite() {
            return Err(EnvError::Config("crash reward must be finite".to_owned()));
        }
        Ok(())
    }

    pub fn reset_settle(&self) -> Duration {
        Duration::from_millis(self.reset_settle_ms)
    }

    pub fn step_settle(&self) -> Duration {
        Duration::from_millis(self.step_settle_ms)
    }

    pub fn frame_timeout(&self) -> Duration {
        Duration::from_millis(self.frame_timeout_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn partial_json_uses_defaults() {
        let config: EnvConfig = serde_json::from_str(
            r#"{ "world_name": "hard_track", "direction": "clockwise", "action_scheme": "six" }"#,
        )
        .unwrap();
        assert_eq!(config.world_name, "hard_track");
        assert_eq!(config.direction, Direction::Clockwise);
        assert_eq!(config.action_scheme, ActionScheme::Six);
        assert_approx_eq!(config.base_throttle, 5.6);
        assert_eq!(config.reset_settle(), Duration::from_millis(500));
        assert_eq!(config.metric_name, "EpisodeReward");
        assert_eq!(config.crash_reward, 0.0);
    }

    #[test]
    fn empty_observation_is_invalid() {
        let config = EnvConfig {
            observation_width: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EnvError::Config(_))));
        assert!(EnvConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file() {
        let result = EnvConfig::from_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(EnvError::Io(_))));
    }
}
