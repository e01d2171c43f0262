use super::{TelemetrySnapshot, TelemetrySource};
use crate::error::Result;
use crate::math::{Point2d, Vector2d};
use crate::observation::{Frame, PixelFormat};
use crate::track::Track;
use cgmath::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Duration;

/// A telemetry source which samples random frames and noisy positions
/// around the track, for running the environment without a simulator.
pub struct RandomTelemetry {
    /// The waypoints positions are sampled around.
    waypoints: Vec<Point2d>,
    /// The road width in m.
    road_width: f64,
    /// The lateral noise added to sampled positions.
    noise: Normal<f64>,
    /// The size of the generated frames.
    frame_size: (u32, u32),
    rng: StdRng,
}

impl RandomTelemetry {
    /// Creates a random source for the given track.
    ///
    /// # Parameters
    /// * `track` - The track to sample positions on
    /// * `frame_size` - The width and height of generated frames
    /// * `seed` - The random seed
    pub fn new(track: &Track, frame_size: (u32, u32), seed: u64) -> Self {
        let road_width = track.road_width();
        Self {
            waypoints: track.waypoints().to_vec(),
            road_width,
            noise: Normal::new(0.0, 0.5 * road_width).expect("Invalid standard deviation"),
            frame_size,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TelemetrySource for RandomTelemetry {
    fn telemetry(&mut self) -> TelemetrySnapshot {
        let idx = self.rng.gen_range(0..self.waypoints.len());
        let offset = Vector2d::new(
            self.noise.sample(&mut self.rng),
            self.noise.sample(&mut self.rng),
        );
        let pos = self.waypoints[idx] + offset;
        let distance_from_center = offset.magnitude();
        TelemetrySnapshot {
            on_track: distance_from_center <= self.road_width,
            progress: self.rng.gen_range(0.0..100.0),
            yaw: self.rng.gen_range(-PI..PI),
            x: pos.x,
            y: pos.y,
            z: 0.0,
            distance_from_center,
            distance_from_border_1: self.road_width - distance_from_center,
            distance_from_border_2: self.road_width + distance_from_center,
        }
    }

    fn discard_frame(&mut self) {}

    fn wait_for_frame(&mut self, _timeout: Duration) -> Result<Arc<Frame>> {
        let (width, height) = self.frame_size;
        let mut data = vec![0; 3 * width as usize * height as usize];
        self.rng.fill_bytes(&mut data);
        Ok(Arc::new(Frame::new(width, height, PixelFormat::Bgr8, data)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::track::lookup_track;

    #[test]
    fn samples_near_the_track() {
        let track = lookup_track("medium_track").unwrap();
        let mut source = RandomTelemetry::new(&track, (8, 6), 7);
        for _ in 0..200 {
            let telemetry = source.telemetry();
            assert!(telemetry.x.is_finite() && telemetry.y.is_finite());
            assert!((0.0..100.0).contains(&telemetry.progress));
            assert_eq!(
                telemetry.on_track,
                telemetry.distance_from_center <= track.road_width()
            );
        }
    }

    #[test]
    fn frames_have_requested_size() {
        let track = lookup_track("easy_track").unwrap();
        let mut source = RandomTelemetry::new(&track, (8, 6), 7);
        let frame = source.wait_for_frame(Duration::ZERO).unwrap();
        assert_eq!((frame.width, frame.height), (8, 6));
        assert_eq!(frame.data.len(), 8 * 6 * 3);
    }

    #[test]
    fn seeded_sources_agree() {
        let track = lookup_track("hard_track").unwrap();
        let mut a = RandomTelemetry::new(&track, (4, 4), 42);
        let mut b = RandomTelemetry::new(&track, (4, 4), 42);
        assert_eq!(a.telemetry(), b.telemetry());
    }
}
