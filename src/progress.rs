use crate::math::{distance, Point2d};
use crate::track::Track;

/// Finds the index of the waypoint closest to the given position.
/// Ties resolve to the lowest index.
pub fn find_closest_waypoint(track: &Track, pos: Point2d) -> usize {
    let mut closest = 0;
    let mut min_dist = f64::INFINITY;
    for (idx, waypoint) in track.waypoints().iter().enumerate() {
        let dist = distance(*waypoint, pos);
        if dist < min_dist {
            min_dist = dist;
            closest = idx;
        }
    }
    closest
}

/// Computes the progress made between two closest-waypoint snapshots,
/// as a percentage of the track length.
///
/// This is the chord distance between the two waypoints, so it does not
/// depend on the direction of travel nor on how many waypoints were skipped.
pub fn progress_delta(track: &Track, current: usize, previous: usize) -> f64 {
    let dist = distance(track.waypoint(current), track.waypoint(previous));
    100.0 * dist / track.length()
}

/// The result of a [ProgressTracker] update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressUpdate {
    /// The index of the waypoint closest to the vehicle.
    pub closest_waypoint: usize,
    /// The progress made since the previous update, in percent.
    pub delta: f64,
    /// The progress made since the start of the episode, in percent.
    pub total: f64,
}

/// Accumulates the progress made along a track over an episode.
#[derive(Clone, Debug, Default)]
pub struct ProgressTracker {
    /// The closest waypoint at the previous update.
    prev_closest: usize,
    /// The progress accumulated up to the previous update, in percent.
    prev_total: f64,
}

impl ProgressTracker {
    /// Creates a tracker at the first waypoint with no progress.
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts a new episode. Episodes always start from the first waypoint.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The closest waypoint at the previous update.
    pub fn prev_closest(&self) -> usize {
        self.prev_closest
    }

    /// The progress accumulated so far, in percent.
    pub fn total(&self) -> f64 {
        self.prev_total
    }

    /// Registers a new vehicle position.
    pub fn update(&mut self, track: &Track, pos: Point2d) -> ProgressUpdate {
        let closest_waypoint = find_closest_waypoint(track, pos);
        let delta = progress_delta(track, closest_waypoint, self.prev_closest);
        let total = self.prev_total + delta;
        self.prev_closest = closest_waypoint;
        self.prev_total = total;
        ProgressUpdate {
            closest_waypoint,
            delta,
            total,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::track::{lookup_track, TrackId};
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng};

    #[test]
    fn closest_is_exact_at_waypoints() {
        for id in TrackId::ALL {
            let track = lookup_track(id.world_name()).unwrap();
            for (idx, waypoint) in track.waypoints().iter().enumerate() {
                let found = find_closest_waypoint(&track, *waypoint);
                // Duplicated waypoints resolve to the first copy
                assert_eq!(track.waypoint(found), *waypoint);
                assert!(found <= idx);
            }
        }
    }

    #[test]
    fn closest_is_in_range() {
        let track = lookup_track("hard_loopy_track").unwrap();
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for _ in 0..100 {
            let pos = Point2d::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            assert!(find_closest_waypoint(&track, pos) < track.num_waypoints());
        }
    }

    #[test]
    fn ties_resolve_to_first() {
        let track = lookup_track("easy_track").unwrap();
        // Equidistant from both waypoints
        assert_eq!(find_closest_waypoint(&track, Point2d::new(0.0, 3.0)), 0);
        // Duplicated waypoints 1 and 2 on the speed track
        let track = lookup_track("hard_speed_track").unwrap();
        assert_eq!(find_closest_waypoint(&track, Point2d::new(2.5, 0.58)), 1);
    }

    #[test]
    fn delta_properties() {
        let track = lookup_track("medium_track").unwrap();
        for i in 0..track.num_waypoints() {
            assert_eq!(progress_delta(&track, i, i), 0.0);
            for j in 0..track.num_waypoints() {
                assert_approx_eq!(progress_delta(&track, i, j), progress_delta(&track, j, i));
            }
        }
    }

    #[test]
    fn easy_track_full_delta() {
        let track = lookup_track("easy_track").unwrap();
        // The only segment spans the whole track length
        assert_approx_eq!(progress_delta(&track, 1, 0), 100.0);
    }

    #[test]
    fn tracker_accumulates() {
        let track = lookup_track("medium_track").unwrap();
        let mut tracker = ProgressTracker::new();

        let first = tracker.update(&track, track.waypoint(0));
        assert_eq!(first.closest_waypoint, 0);
        assert_eq!(first.total, 0.0);

        let second = tracker.update(&track, track.waypoint(1));
        assert_eq!(second.closest_waypoint, 1);
        assert_approx_eq!(second.delta, progress_delta(&track, 1, 0));
        assert_approx_eq!(second.total, second.delta);

        let third = tracker.update(&track, track.waypoint(2));
        assert_approx_eq!(third.total, second.total + third.delta);
        assert!(third.total >= second.total);

        tracker.reset();
        assert_eq!(tracker.total(), 0.0);
        assert_eq!(tracker.prev_closest(), 0);
    }
}
