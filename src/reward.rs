use crate::util::Interval;

/// The bonus awarded for every step the vehicle stays on the track.
pub const SURVIVAL_BONUS: f64 = 0.5;

/// The state a reward is calculated from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RewardInput {
    pub on_track: bool,
    /// The distance from the centre line in m.
    pub distance_from_center: f64,
    /// The signed distance from the first road border in m.
    pub distance_from_border_1: f64,
    /// The progress made this episode, in percent.
    pub progress: f64,
    /// The throttle of the applied command.
    pub throttle: f64,
}

/// A reward shaping function.
pub trait RewardFunction {
    /// Computes the reward for a step.
    fn reward(&self, input: &RewardInput) -> f64;
}

impl<F: Fn(&RewardInput) -> f64> RewardFunction for F {
    fn reward(&self, input: &RewardInput) -> f64 {
        self(input)
    }
}

/// Rewards hugging the centre line, making progress and driving fast.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaselineReward;

impl BaselineReward {
    /// Maximum distance from the centre line which earns the centring bonus, in m.
    const CENTRE_TOLERANCE: f64 = 0.013;
    const CENTRE_BONUS: f64 = 4.0;
    const PROGRESS_WEIGHT: f64 = 5.0;
    const THROTTLE_WEIGHT: f64 = 3.0;
    const PROGRESS_RANGE: Interval<f64> = Interval::new(0.0, 100.0);
    const THROTTLE_RANGE: Interval<f64> = Interval::new(0.0, 10.0);
    const UNIT: Interval<f64> = Interval::new(0.0, 1.0);
}

impl RewardFunction for BaselineReward {
    fn reward(&self, input: &RewardInput) -> f64 {
        let mut reward = 0.0;
        if input.distance_from_border_1 >= 0.0
            && input.distance_from_center <= Self::CENTRE_TOLERANCE
        {
            reward += Self::CENTRE_BONUS;
        }
        reward += Self::PROGRESS_WEIGHT
            * Self::PROGRESS_RANGE.remap_clamped(input.progress, Self::UNIT);
        reward += Self::THROTTLE_WEIGHT
            * Self::THROTTLE_RANGE.remap_clamped(input.throttle, Self::UNIT);
        if input.on_track {
            reward += SURVIVAL_BONUS;
        }
        reward
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn input() -> RewardInput {
        RewardInput {
            on_track: true,
            distance_from_center: 0.005,
            distance_from_border_1: 0.1,
            progress: 50.0,
            throttle: 5.0,
        }
    }

    #[test]
    fn baseline() {
        assert_approx_eq!(BaselineReward.reward(&input()), 8.5);
    }

    #[test]
    fn off_centre_loses_bonus() {
        let off_centre = RewardInput {
            distance_from_center: 0.02,
            ..input()
        };
        assert_approx_eq!(BaselineReward.reward(&off_centre), 4.5);
        let past_border = RewardInput {
            distance_from_border_1: -0.01,
            ..input()
        };
        assert_approx_eq!(BaselineReward.reward(&past_border), 4.5);
    }

    #[test]
    fn terms_are_clamped() {
        let saturated = RewardInput {
            progress: 250.0,
            throttle: 20.0,
            ..input()
        };
        assert_approx_eq!(BaselineReward.reward(&saturated), 4.0 + 5.0 + 3.0 + 0.5);
        let negative = RewardInput {
            progress: -10.0,
            throttle: -1.0,
            ..input()
        };
        assert_approx_eq!(BaselineReward.reward(&negative), 4.5);
    }

    #[test]
    fn never_negative() {
        let worst = RewardInput {
            on_track: false,
            distance_from_center: 1.0,
            distance_from_border_1: -1.0,
            progress: -100.0,
            throttle: -100.0,
        };
        assert_eq!(BaselineReward.reward(&worst), 0.0);
    }

    #[test]
    fn closures_are_reward_functions() {
        let flat = |_: &RewardInput| 1.0;
        assert_eq!(flat.reward(&input()), 1.0);
    }
}
