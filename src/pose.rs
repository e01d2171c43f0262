use crate::math::{euler_to_quaternion, Point3d, Quat, Vector3d};
use crate::track::Track;
use cgmath::Zero;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The direction in which laps are driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Anticlockwise,
    Clockwise,
}

/// The pose and velocity of the vehicle in world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3d,
    /// The orientation as an `(x, y, z, w)` rotation quaternion.
    pub orientation: Quat,
    pub linear_velocity: Vector3d,
    pub angular_velocity: Vector3d,
}

impl Pose {
    /// A stationary pose at the given position, heading `yaw` radians about the z-axis.
    pub fn stationary(position: Point3d, yaw: f64) -> Self {
        Self {
            position,
            orientation: euler_to_quaternion(0.0, 0.0, yaw),
            linear_velocity: Vector3d::zero(),
            angular_velocity: Vector3d::zero(),
        }
    }

    /// The orientation as an `[x, y, z, w]` array.
    pub fn orientation_xyzw(&self) -> [f64; 4] {
        let q = self.orientation;
        [q.v.x, q.v.y, q.v.z, q.s]
    }
}

/// The pose the vehicle is placed in at the start of an anticlockwise lap.
pub fn reset_pose(track: &Track) -> Pose {
    reset_pose_facing(track, Direction::Anticlockwise)
}

/// The pose the vehicle is placed in at the start of a lap in the given direction.
pub fn reset_pose_facing(track: &Track, direction: Direction) -> Pose {
    let entry = track.id().entry();
    let yaw = match direction {
        Direction::Anticlockwise => entry.start_yaw,
        Direction::Clockwise => entry.start_yaw + PI,
    };
    let [x, y] = entry.start;
    Pose::stationary(Point3d::new(x, y, 0.0), yaw)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::track::{lookup_track, TrackId};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn anticlockwise_is_identity() {
        for id in TrackId::ALL {
            let track = lookup_track(id.world_name()).unwrap();
            let pose = reset_pose(&track);
            assert_eq!(pose.orientation_xyzw(), [0.0, 0.0, 0.0, 1.0]);
            assert_eq!(pose.linear_velocity, Vector3d::zero());
            assert_eq!(pose.angular_velocity, Vector3d::zero());
            assert_eq!(pose.position.z, 0.0);
        }
    }

    #[test]
    fn clockwise_turns_around() {
        let track = lookup_track("hard_track").unwrap();
        let pose = reset_pose_facing(&track, Direction::Clockwise);
        let [x, y, z, w] = pose.orientation_xyzw();
        assert_approx_eq!(w, 0.0);
        assert_approx_eq!(x, 0.0);
        assert_approx_eq!(y, 0.0);
        assert_approx_eq!(z, 1.0);
    }

    #[test]
    fn start_positions() {
        let easy = reset_pose(&lookup_track("easy_track").unwrap());
        assert_eq!((easy.position.x, easy.position.y), (-1.44, -0.06));
        let hard = reset_pose(&lookup_track("hard_track").unwrap());
        assert_eq!((hard.position.x, hard.position.y), (1.75, 0.6));
        let loopy = reset_pose(&lookup_track("hard_loopy_track").unwrap());
        assert_eq!((loopy.position.x, loopy.position.y), (2.08, 0.3081));
    }
}
