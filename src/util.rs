//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use cgmath::num_traits::Float;

/// An interval on the real number line.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: Float> Interval<T> {
    pub fn lerp(&self, t: T) -> T {
        self.min + t * (self.max - self.min)
    }

    pub fn inv_lerp(&self, value: T) -> T {
        (value - self.min) / (self.max - self.min)
    }

    /// Linearly maps a value from this interval onto `target`.
    /// Values outside of this interval map to the nearest end of `target`,
    /// like `numpy.interp` does for a two-point table.
    pub fn remap_clamped(&self, value: T, target: Interval<T>) -> T {
        if value <= self.min {
            target.min
        } else if value >= self.max {
            target.max
        } else {
            target.lerp(self.inv_lerp(value))
        }
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

#[cfg(test)]
mod test {
    use super::Interval;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn remap_inside_bounds() {
        let from: Interval<f64> = Interval::new(0.0, 10.0);
        let to = Interval::new(0.0, 1.0);
        assert_approx_eq!(from.remap_clamped(5.0, to), 0.5);
        assert_approx_eq!(from.remap_clamped(2.5, to), 0.25);
    }

    #[test]
    fn remap_clamps_at_bounds() {
        let from = Interval::new(0.0, 100.0);
        let to = Interval::new(0.0, 1.0);
        assert_eq!(from.remap_clamped(-20.0, to), 0.0);
        assert_eq!(from.remap_clamped(150.0, to), 1.0);
        assert_eq!(from.remap_clamped(100.0, to), 1.0);
    }

    #[test]
    fn remap_onto_reversed_target() {
        let from: Interval<f64> = Interval::new(0.0, 4.0);
        let to = Interval::new(1.0, -1.0);
        assert_approx_eq!(from.remap_clamped(1.0, to), 0.5);
        assert_eq!(from.remap_clamped(9.0, to), -1.0);
    }
}
