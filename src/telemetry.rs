use crate::error::{EnvError, Result};
use crate::math::Point2d;
use crate::observation::Frame;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

pub use random::RandomTelemetry;

mod random;

/// The latest vehicle telemetry reported by the simulator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub on_track: bool,
    /// The lap progress reported by the simulator, in percent.
    pub progress: f64,
    /// The vehicle heading in radians.
    pub yaw: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub distance_from_center: f64,
    pub distance_from_border_1: f64,
    pub distance_from_border_2: f64,
}

impl TelemetrySnapshot {
    /// The vehicle's position in the track plane.
    pub fn position(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }
}

/// Provides vehicle telemetry and camera frames to the environment.
pub trait TelemetrySource {
    /// The most recent telemetry.
    fn telemetry(&mut self) -> TelemetrySnapshot;

    /// Forgets the latest camera frame, so the next wait blocks until a new one arrives.
    fn discard_frame(&mut self);

    /// Blocks until a camera frame is available, failing with
    /// [EnvError::TelemetryStale] if none arrives within `timeout`.
    fn wait_for_frame(&mut self, timeout: Duration) -> Result<Arc<Frame>>;
}

/// A telemetry source fed by callbacks from a simulator or vehicle.
///
/// Clones share the same state, so one clone can be handed to the
/// producer while the environment reads from another.
#[derive(Clone, Default)]
pub struct SensorFeed {
    shared: Arc<Shared>,
}

#[derive(Default)]
struct Shared {
    telemetry: Mutex<TelemetrySnapshot>,
    frame: Mutex<Option<Arc<Frame>>>,
    frame_ready: Condvar,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SensorFeed {
    /// Creates a feed with default telemetry and no frame.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the latest telemetry.
    pub fn push_telemetry(&self, telemetry: TelemetrySnapshot) {
        *lock(&self.shared.telemetry) = telemetry;
    }

    /// Replaces the latest camera frame and wakes any waiting reader.
    pub fn push_frame(&self, frame: Frame) {
        *lock(&self.shared.frame) = Some(Arc::new(frame));
        self.shared.frame_ready.notify_all();
    }
}

impl TelemetrySource for SensorFeed {
    fn telemetry(&mut self) -> TelemetrySnapshot {
        *lock(&self.shared.telemetry)
    }

    fn discard_frame(&mut self) {
        lock(&self.shared.frame).take();
    }

    fn wait_for_frame(&mut self, timeout: Duration) -> Result<Arc<Frame>> {
        let deadline = Instant::now() + timeout;
        let mut frame = lock(&self.shared.frame);
        loop {
            if let Some(latest) = frame.as_ref() {
                return Ok(latest.clone());
            }
            let now = Instant::now();
            if now >= deadline {
                log::warn!("No camera frame received within {:?}", timeout);
                return Err(EnvError::TelemetryStale(timeout));
            }
            frame = self
                .shared
                .frame_ready
                .wait_timeout(frame, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::observation::PixelFormat;
    use std::thread;

    fn frame() -> Frame {
        Frame::new(1, 1, PixelFormat::Bgr8, vec![1, 2, 3])
    }

    #[test]
    fn latest_telemetry_wins() {
        let mut feed = SensorFeed::new();
        feed.push_telemetry(TelemetrySnapshot {
            x: 1.0,
            ..Default::default()
        });
        feed.push_telemetry(TelemetrySnapshot {
            x: 2.0,
            on_track: true,
            ..Default::default()
        });
        let telemetry = feed.telemetry();
        assert_eq!(telemetry.x, 2.0);
        assert!(telemetry.on_track);
    }

    #[test]
    fn stale_frame_times_out() {
        let mut feed = SensorFeed::new();
        let timeout = Duration::from_millis(20);
        match feed.wait_for_frame(timeout) {
            Err(EnvError::TelemetryStale(t)) => assert_eq!(t, timeout),
            other => panic!("expected a stale telemetry error, got {:?}", other),
        }
    }

    #[test]
    fn frame_from_another_thread() {
        let mut feed = SensorFeed::new();
        let producer = feed.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            producer.push_frame(frame());
        });
        let received = feed.wait_for_frame(Duration::from_secs(5)).unwrap();
        assert_eq!(*received, frame());
        handle.join().unwrap();
    }

    #[test]
    fn discarded_frame_must_be_replaced() {
        let mut feed = SensorFeed::new();
        feed.push_frame(frame());
        assert!(feed.wait_for_frame(Duration::ZERO).is_ok());
        feed.discard_frame();
        assert!(feed.wait_for_frame(Duration::ZERO).is_err());
    }
}
