use crate::error::{EnvError, Result};
use crate::math::{distance, Point2d};
use itertools::Itertools;
use once_cell::sync::Lazy;
use std::fmt;

pub(crate) use table::TrackEntry;

mod table;

/// Identifies one of the supported tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackId {
    Easy,
    Medium,
    Hard,
    HardSpeed,
    HardLoopy,
}

/// World name prefixes, longest first, so that e.g. `hard_speed_track`
/// is never mistaken for `hard_track`.
static PREFIXES: Lazy<Vec<(&'static str, TrackId)>> = Lazy::new(|| {
    TrackId::ALL
        .iter()
        .map(|id| (id.world_name(), *id))
        .sorted_by_key(|(prefix, _)| std::cmp::Reverse(prefix.len()))
        .collect()
});

impl TrackId {
    /// All of the supported tracks.
    pub const ALL: [TrackId; 5] = [
        TrackId::Easy,
        TrackId::Medium,
        TrackId::Hard,
        TrackId::HardSpeed,
        TrackId::HardLoopy,
    ];

    /// The canonical world name of the track.
    pub fn world_name(&self) -> &'static str {
        match self {
            TrackId::Easy => "easy_track",
            TrackId::Medium => "medium_track",
            TrackId::Hard => "hard_track",
            TrackId::HardSpeed => "hard_speed_track",
            TrackId::HardLoopy => "hard_loopy_track",
        }
    }

    /// Recognises the track from a simulation world name.
    /// The name matches a track if it starts with that track's world name.
    pub fn from_world_name(name: &str) -> Result<TrackId> {
        PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, id)| *id)
            .ok_or_else(|| EnvError::UnknownTrack(name.to_owned()))
    }

    pub(crate) fn entry(&self) -> &'static TrackEntry {
        table::entry(*self)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.world_name())
    }
}

/// The immutable geometry of a track.
#[derive(Clone, Debug)]
pub struct Track {
    /// The track this geometry belongs to.
    id: TrackId,
    /// The centre line waypoints in lap order.
    waypoints: Vec<Point2d>,
    /// The road width in m.
    road_width: f64,
    /// The summed length of the segments between consecutive waypoints, in m.
    length: f64,
}

/// Looks up the track matching a simulation world name.
pub fn lookup_track(name: &str) -> Result<Track> {
    let id = TrackId::from_world_name(name)?;
    let entry = id.entry();
    let waypoints = entry
        .waypoints
        .iter()
        .map(|&[x, y]| Point2d::new(x, y))
        .collect();
    Track::new(id, waypoints, entry.road_width)
}

impl Track {
    /// Creates a track from its waypoints.
    ///
    /// The length excludes the closing segment from the last waypoint back to the first.
    pub fn new(id: TrackId, waypoints: Vec<Point2d>, road_width: f64) -> Result<Self> {
        if !road_width.is_finite() || road_width < 0.0 {
            return Err(EnvError::Config(format!(
                "road width of {} must be a non-negative number, got {}",
                id, road_width
            )));
        }
        let length: f64 = waypoints
            .iter()
            .tuple_windows()
            .map(|(a, b)| distance(*a, *b))
            .sum();
        if length <= 0.0 {
            return Err(EnvError::DegenerateTrack(id.world_name().to_owned()));
        }
        Ok(Self {
            id,
            waypoints,
            road_width,
            length,
        })
    }

    /// The track's ID.
    pub fn id(&self) -> TrackId {
        self.id
    }

    /// The waypoints along the centre line.
    pub fn waypoints(&self) -> &[Point2d] {
        &self.waypoints
    }

    /// The waypoint at the given index.
    pub fn waypoint(&self, idx: usize) -> Point2d {
        self.waypoints[idx]
    }

    /// The number of waypoints.
    pub fn num_waypoints(&self) -> usize {
        self.waypoints.len()
    }

    /// The road width in m.
    pub fn road_width(&self) -> f64 {
        self.road_width
    }

    /// The track length in m.
    pub fn length(&self) -> f64 {
        self.length
    }
}
