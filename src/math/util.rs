use super::{Point2d, Quat};
use cgmath::prelude::*;

/// Converts a set of Euler angles, in radians, into a rotation quaternion.
///
/// # Parameters
/// * `roll` - Rotation about the x-axis
/// * `pitch` - Rotation about the y-axis
/// * `yaw` - Rotation about the z-axis
pub fn euler_to_quaternion(roll: f64, pitch: f64, yaw: f64) -> Quat {
    let (sy, cy) = (0.5 * yaw).sin_cos();
    let (sr, cr) = (0.5 * roll).sin_cos();
    let (sp, cp) = (0.5 * pitch).sin_cos();

    let w = cy * cr * cp + sy * sr * sp;
    let x = cy * sr * cp - sy * cr * sp;
    let y = cy * cr * sp + sy * sr * cp;
    let z = sy * cr * cp - cy * sr * sp;
    Quat::new(w, x, y, z)
}

/// The straight line distance between two points.
#[inline(always)]
pub fn distance(a: Point2d, b: Point2d) -> f64 {
    a.distance(b)
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn zero_angles_give_identity() {
        let q = euler_to_quaternion(0.0, 0.0, 0.0);
        assert_eq!(q, Quat::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn half_turn_about_z() {
        let q = euler_to_quaternion(0.0, 0.0, PI);
        assert_approx_eq!(q.s, 0.0);
        assert_approx_eq!(q.v.x, 0.0);
        assert_approx_eq!(q.v.y, 0.0);
        assert_approx_eq!(q.v.z, 1.0);
    }

    #[test]
    fn quaternions_are_unit_length() {
        for &(r, p, y) in &[(0.3, -0.2, 1.1), (FRAC_PI_2, 0.0, PI), (-1.0, 2.0, -3.0)] {
            assert_approx_eq!(euler_to_quaternion(r, p, y).magnitude(), 1.0);
        }
    }

    #[test]
    fn distance_is_euclidean() {
        let d = distance(Point2d::new(0.0, 0.0), Point2d::new(3.0, 4.0));
        assert_approx_eq!(d, 5.0);
    }
}
