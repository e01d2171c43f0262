use crate::error::{EnvError, Result};
use crate::util::Interval;
use serde::{Deserialize, Serialize};

/// The range of continuous steering commands.
pub const STEERING_RANGE: Interval<f64> = Interval::new(-1.0, 1.0);

/// The range of continuous throttle commands.
pub const THROTTLE_RANGE: Interval<f64> = Interval::new(0.0, 1.0);

/// A continuous drive command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// The steering angle; positive steers left.
    pub steering: f64,
    pub throttle: f64,
}

impl Command {
    pub const fn new(steering: f64, throttle: f64) -> Self {
        Self { steering, throttle }
    }

    /// A command which stops the vehicle.
    pub const fn halt() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// An action chosen by the agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// An index into the discrete action space.
    Discrete(usize),
    /// A command which is applied as is.
    Continuous(Command),
}

/// The action space exposed to the agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActionSpace {
    Discrete(usize),
    Continuous {
        steering: Interval<f64>,
        throttle: Interval<f64>,
    },
}

/// Converts discrete actions into continuous drive commands.
pub trait ActionMapper {
    /// The number of discrete actions.
    fn num_actions(&self) -> usize;

    /// The action which drives straight ahead at full base throttle.
    fn neutral_action(&self) -> usize;

    /// Maps a discrete action to a command.
    ///
    /// # Parameters
    /// * `base_throttle` - The throttle of a full speed action
    /// * `base_steering` - The steering angle of a full lock action
    /// * `action` - The action index
    fn map(&self, base_throttle: f64, base_steering: f64, action: usize) -> Result<Command>;
}

/// Multipliers applied to the base steering angle and throttle by one action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionFactors {
    pub steering: f64,
    pub throttle: f64,
}

const fn factors(steering: f64, throttle: f64) -> ActionFactors {
    ActionFactors { steering, throttle }
}

/// Full and half lock to either side, then straight ahead.
const STEERS: [f64; 5] = [1.0, -1.0, 0.5, -0.5, 0.0];

static SIX_ACTIONS: [ActionFactors; 6] = [
    factors(1.0, 1.0),
    factors(-1.0, 1.0),
    factors(0.0, 1.0),
    factors(0.25, 1.0),
    factors(-0.25, 1.0),
    factors(0.0, 0.5),
];

static FIVE_ACTIONS: [ActionFactors; 5] = steer_band(1.0);

static TEN_ACTIONS: [ActionFactors; 10] = concat2(steer_band(1.0), steer_band(0.5));

static FIFTEEN_ACTIONS: [ActionFactors; 15] =
    concat3(steer_band(1.0), steer_band(0.5), steer_band(2.0));

const fn steer_band(throttle: f64) -> [ActionFactors; 5] {
    [
        factors(STEERS[0], throttle),
        factors(STEERS[1], throttle),
        factors(STEERS[2], throttle),
        factors(STEERS[3], throttle),
        factors(STEERS[4], throttle),
    ]
}

const fn concat2(a: [ActionFactors; 5], b: [ActionFactors; 5]) -> [ActionFactors; 10] {
    let mut out = [factors(0.0, 0.0); 10];
    let mut i = 0;
    while i < 5 {
        out[i] = a[i];
        out[i + 5] = b[i];
        i += 1;
    }
    out
}

const fn concat3(
    a: [ActionFactors; 5],
    b: [ActionFactors; 5],
    c: [ActionFactors; 5],
) -> [ActionFactors; 15] {
    let mut out = [factors(0.0, 0.0); 15];
    let mut i = 0;
    while i < 5 {
        out[i] = a[i];
        out[i + 5] = b[i];
        out[i + 10] = c[i];
        i += 1;
    }
    out
}

/// The available discrete action schemes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionScheme {
    /// Full and quarter lock to either side, straight, and a slow straight.
    Six,
    /// Full and half lock to either side, and straight.
    Five,
    /// The five action scheme at full and at half throttle.
    #[default]
    Ten,
    /// The five action scheme at full, half and double throttle.
    Fifteen,
}

impl ActionScheme {
    /// The action table of the scheme.
    pub fn table(&self) -> ActionTable {
        let factors: &'static [ActionFactors] = match self {
            ActionScheme::Six => &SIX_ACTIONS,
            ActionScheme::Five => &FIVE_ACTIONS,
            ActionScheme::Ten => &TEN_ACTIONS,
            ActionScheme::Fifteen => &FIFTEEN_ACTIONS,
        };
        ActionTable::new(factors)
    }
}

/// An [ActionMapper] backed by a table of per-action multipliers.
#[derive(Clone, Copy, Debug)]
pub struct ActionTable {
    factors: &'static [ActionFactors],
}

impl ActionTable {
    /// Creates a mapper from a table of action multipliers.
    pub const fn new(factors: &'static [ActionFactors]) -> Self {
        Self { factors }
    }

    /// The multipliers of every action, in index order.
    pub fn factors(&self) -> &'static [ActionFactors] {
        self.factors
    }
}

impl ActionMapper for ActionTable {
    fn num_actions(&self) -> usize {
        self.factors.len()
    }

    fn neutral_action(&self) -> usize {
        self.factors
            .iter()
            .position(|f| f.steering == 0.0 && f.throttle == 1.0)
            .unwrap_or(0)
    }

    fn map(&self, base_throttle: f64, base_steering: f64, action: usize) -> Result<Command> {
        let f = self.factors.get(action).ok_or(EnvError::InvalidAction {
            action,
            num_actions: self.factors.len(),
        })?;
        Ok(Command::new(
            f.steering * base_steering,
            f.throttle * base_throttle,
        ))
    }
}
