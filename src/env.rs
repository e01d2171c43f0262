use crate::action::{Action, ActionMapper, ActionSpace, Command, STEERING_RANGE, THROTTLE_RANGE};
use crate::config::EnvConfig;
use crate::error::{EnvError, Result};
use crate::observation::Observation;
use crate::pose::reset_pose_facing;
use crate::progress::{ProgressTracker, ProgressUpdate};
use crate::reward::{BaselineReward, RewardFunction, RewardInput};
use crate::sinks::{Actuator, MetricsSink, Placement, TraceSink};
use crate::telemetry::{TelemetrySnapshot, TelemetrySource};
use crate::trace::{unix_timestamp, TraceRecord};
use crate::track::{lookup_track, Track};
use std::thread;
use std::time::Duration;

/// The lifecycle phase of the current episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodePhase {
    /// No episode has been started yet.
    Idle,
    /// The vehicle is being returned to its starting pose.
    Resetting,
    /// The episode accepts steps.
    Running,
    /// The vehicle left the track; the next episode must be reset.
    Terminated,
}

/// Per-episode counters.
#[derive(Clone, Debug, Default)]
pub struct EpisodeStats {
    /// The number of steps taken this episode.
    pub steps: usize,
    /// The number of episodes started. Persists across episodes.
    pub episodes: usize,
    /// The reward accumulated this episode.
    pub reward: f64,
    /// The lap progress reported by the simulator at the start of the episode.
    pub progress_at_start: f64,
    /// The waypoint progress accumulated this episode.
    pub progress: ProgressTracker,
}

impl EpisodeStats {
    /// Clears the per-episode counters and counts a new episode.
    fn begin_episode(&mut self) {
        *self = Self {
            episodes: self.episodes + 1,
            ..Default::default()
        };
    }
}

/// The latest known state of the vehicle.
#[derive(Clone, Copy, Debug, Default)]
pub struct VehicleState {
    /// The telemetry used in the latest inference.
    pub telemetry: TelemetrySnapshot,
    pub closest_waypoint: usize,
    pub prev_closest_waypoint: usize,
    /// The waypoint progress accumulated this episode, in percent.
    pub total_progress: f64,
    /// The last command sent to the actuator.
    pub command: Command,
    /// The last discrete action taken, or -1 for a continuous command.
    pub action_taken: i64,
}

/// The outside world the environment talks to.
pub struct Collaborators {
    pub telemetry: Box<dyn TelemetrySource + Send>,
    pub actuator: Box<dyn Actuator + Send>,
    pub placement: Box<dyn Placement + Send>,
    pub metrics: Box<dyn MetricsSink + Send>,
    pub trace: Box<dyn TraceSink + Send>,
}

/// The outcome of a step.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    /// Diagnostic information, not to be used for training.
    pub info: TraceRecord,
}

/// A racing environment: a vehicle driving laps of a track,
/// rewarded for progress, speed and staying on the centre line.
pub struct RacerEnv {
    config: EnvConfig,
    track: Track,
    mapper: Box<dyn ActionMapper + Send>,
    reward_fn: Box<dyn RewardFunction + Send>,
    io: Collaborators,
    phase: EpisodePhase,
    stats: EpisodeStats,
    vehicle: VehicleState,
}

/// Sleeps to let the simulation settle.
fn settle(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}

impl RacerEnv {
    /// Creates an environment using the configured action scheme and the baseline reward.
    /// Fails if the configured world is not a known track.
    pub fn new(config: EnvConfig, io: Collaborators) -> Result<Self> {
        config.validate()?;
        let track = lookup_track(&config.world_name)?;
        log::info!(
            "Loaded {} with {} waypoints, length {:.2}m",
            track.id(),
            track.num_waypoints(),
            track.length()
        );
        let mapper = Box::new(config.action_scheme.table());
        Ok(Self {
            config,
            track,
            mapper,
            reward_fn: Box::new(BaselineReward),
            io,
            phase: EpisodePhase::Idle,
            stats: Default::default(),
            vehicle: Default::default(),
        })
    }

    /// Replaces the reward function.
    pub fn with_reward(mut self, reward_fn: impl RewardFunction + Send + 'static) -> Self {
        self.reward_fn = Box::new(reward_fn);
        self
    }

    /// Replaces the mapping from discrete actions to commands.
    pub fn with_action_mapper(mut self, mapper: impl ActionMapper + Send + 'static) -> Self {
        self.mapper = Box::new(mapper);
        self
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    /// The discrete action space of the configured mapper.
    pub fn action_space(&self) -> ActionSpace {
        ActionSpace::Discrete(self.mapper.num_actions())
    }

    /// The space of continuous commands, for agents which bypass the mapper.
    pub fn continuous_action_space(&self) -> ActionSpace {
        ActionSpace::Continuous {
            steering: STEERING_RANGE,
            throttle: THROTTLE_RANGE,
        }
    }

    /// The shape of observations as `(height, width, channels)`.
    pub fn observation_shape(&self) -> (usize, usize, usize) {
        (
            self.config.observation_height as usize,
            self.config.observation_width as usize,
            3,
        )
    }

    /// Ends the current episode and starts a new one, returning the first observation.
    pub fn reset(&mut self) -> Result<Observation> {
        self.report_episode();
        self.phase = EpisodePhase::Resetting;
        self.stats.begin_episode();
        self.vehicle = VehicleState {
            action_taken: self.mapper.neutral_action() as i64,
            ..Default::default()
        };

        // Return the vehicle to the start line
        self.io.telemetry.discard_frame();
        self.io.actuator.drive(Command::halt());
        let pose = reset_pose_facing(&self.track, self.config.direction);
        self.io.placement.place(&pose)?;
        settle(self.config.reset_settle());
        self.stats.progress_at_start = self.io.telemetry.telemetry().progress;

        let (observation, _) = self.infer(Command::halt())?;
        self.phase = EpisodePhase::Running;
        Ok(observation)
    }

    /// Applies an action and observes its outcome.
    pub fn step(&mut self, action: Action) -> Result<StepResult> {
        if self.phase != EpisodePhase::Running {
            return Err(EnvError::NotRunning(self.phase));
        }

        let (command, action_taken) = match action {
            Action::Discrete(idx) => {
                let command = self.mapper.map(
                    self.config.base_throttle,
                    self.config.base_steering,
                    idx,
                )?;
                (command, idx as i64)
            }
            Action::Continuous(command) => (command, -1),
        };
        self.stats.steps += 1;
        self.vehicle.command = command;
        self.vehicle.action_taken = action_taken;

        self.io.actuator.drive(command);
        settle(self.config.step_settle());
        let (observation, info) = self.infer(command)?;

        if info.done {
            self.phase = EpisodePhase::Terminated;
        }
        Ok(StepResult {
            observation,
            reward: info.reward,
            done: info.done,
            info,
        })
    }

    /// Ends the current episode without starting another, stopping the vehicle.
    pub fn close(&mut self) {
        self.report_episode();
        self.io.actuator.drive(Command::halt());
        self.phase = EpisodePhase::Idle;
    }

    /// Reports the totals of the episode in progress, if there is one.
    fn report_episode(&mut self) {
        if !matches!(self.phase, EpisodePhase::Running | EpisodePhase::Terminated) {
            return;
        }
        log::info!(
            "Total Reward={:.2} Total Steps={}",
            self.stats.reward,
            self.stats.steps
        );
        self.io
            .metrics
            .record(&self.config.metric_name, self.stats.reward);
    }

    /// Observes the vehicle, then computes its progress, reward and termination.
    fn infer(&mut self, command: Command) -> Result<(Observation, TraceRecord)> {
        let frame = self
            .io
            .telemetry
            .wait_for_frame(self.config.frame_timeout())?;
        let observation = Observation::from_frame(
            &frame,
            self.config.observation_width,
            self.config.observation_height,
        )?;

        let telemetry = self.io.telemetry.telemetry();
        let progress = self.stats.progress.update(&self.track, telemetry.position());
        self.update_vehicle(telemetry, &progress);

        let done = !telemetry.on_track;
        let reward = if done {
            self.config.crash_reward
        } else {
            self.reward_fn.reward(&RewardInput {
                on_track: telemetry.on_track,
                distance_from_center: telemetry.distance_from_center,
                distance_from_border_1: telemetry.distance_from_border_1,
                progress: progress.total,
                throttle: command.throttle,
            })
        };
        self.stats.reward += reward;
        log::debug!("Step No={} Step Reward={:.2}", self.stats.steps, reward);

        let record = TraceRecord {
            episode: self.stats.episodes,
            step: self.stats.steps,
            x: telemetry.x,
            y: telemetry.y,
            yaw: telemetry.yaw,
            steering: command.steering,
            throttle: command.throttle,
            action: self.vehicle.action_taken,
            reward,
            total_progress: progress.total,
            done,
            on_track: telemetry.on_track,
            progress_delta: progress.delta,
            closest_waypoint: progress.closest_waypoint,
            track_length: self.track.length(),
            distance_from_center: telemetry.distance_from_center,
            distance_from_border_1: telemetry.distance_from_border_1,
            distance_from_border_2: telemetry.distance_from_border_2,
            timestamp: unix_timestamp(),
        };
        if let Err(err) = self.io.trace.write(&record) {
            log::warn!("Failed to write trace: {}", err);
        }

        Ok((observation, record))
    }

    fn update_vehicle(&mut self, telemetry: TelemetrySnapshot, progress: &ProgressUpdate) {
        self.vehicle.telemetry = telemetry;
        self.vehicle.prev_closest_waypoint = self.vehicle.closest_waypoint;
        self.vehicle.closest_waypoint = progress.closest_waypoint;
        self.vehicle.total_progress = progress.total;
    }
}
