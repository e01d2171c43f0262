//! Baked geometry of the supported tracks.

use super::TrackId;

/// Static description of one track.
pub(crate) struct TrackEntry {
    /// The road width in m, used as the permitted deviation from the centre line.
    pub road_width: f64,
    /// The centre line waypoints in lap order.
    pub waypoints: &'static [[f64; 2]],
    /// The starting position of the vehicle.
    pub start: [f64; 2],
    /// The starting heading of the vehicle in radians, for an anticlockwise lap.
    pub start_yaw: f64,
}

pub(crate) fn entry(id: TrackId) -> &'static TrackEntry {
    match id {
        TrackId::Easy => &EASY,
        TrackId::Medium => &MEDIUM,
        TrackId::Hard => &HARD,
        TrackId::HardSpeed => &HARD_SPEED,
        TrackId::HardLoopy => &HARD_LOOPY,
    }
}

static EASY: TrackEntry = TrackEntry {
    road_width: 0.90,
    waypoints: &[[-1.08, -0.05], [1.08, -0.05]],
    start: [-1.44, -0.06],
    start_yaw: 0.0,
};

static MEDIUM: TrackEntry = TrackEntry {
    road_width: 0.50,
    waypoints: &[
        [-0.99, 2.25],
        [0.69, 2.26],
        [1.37, 1.67],
        [1.48, -1.54],
        [0.81, -2.44],
        [-1.25, -2.30],
        [-1.67, -1.64],
        [-1.73, 1.63],
    ],
    start: [-1.40, 2.13],
    start_yaw: 0.0,
};

static HARD: TrackEntry = TrackEntry {
    road_width: 0.44,
    waypoints: &[
        [1.5, 0.58],
        [5.5, 0.58],
        [5.6, 0.6],
        [5.7, 0.65],
        [5.8, 0.7],
        [5.9, 0.8],
        [6.0, 0.9],
        [6.08, 1.1],
        [6.1, 1.2],
        [6.1, 1.3],
        [6.1, 1.4],
        [6.07, 1.5],
        [6.05, 1.6],
        [6.0, 1.7],
        [5.9, 1.8],
        [5.75, 1.9],
        [5.6, 2.0],
        [4.2, 2.02],
        [4.0, 2.1],
        [2.6, 3.92],
        [2.4, 4.0],
        [1.2, 3.95],
        [1.1, 3.92],
        [1.0, 3.88],
        [0.8, 3.72],
        [0.6, 3.4],
        [0.58, 3.3],
        [0.57, 3.2],
        [1.0, 1.0],
        [1.25, 0.7],
    ],
    start: [1.75, 0.6],
    start_yaw: 0.0,
};

static HARD_SPEED: TrackEntry = TrackEntry {
    road_width: 0.44,
    waypoints: &[
        [1.8, 0.54],
        [2.5, 0.58],
        [2.5, 0.58],
        [3.5, 0.58],
        [5.4, 0.63],
        [5.7, 0.78],
        [5.9, 1.01],
        [6.03, 1.47],
        [5.76, 1.85],
        [5.30, 2.06],
        [4.73, 2.32],
        [4.23, 2.63],
        [3.58, 3.11],
        [2.80, 3.74],
        [2.35, 3.94],
        [1.27, 3.91],
        [0.77, 3.58],
        [0.64, 3.14],
        [0.82, 2.33],
        [0.92, 1.79],
        [1.04, 1.25],
        [1.17, 0.92],
        [1.5, 0.58],
    ],
    start: [1.8, 0.60],
    start_yaw: 0.0,
};

static HARD_LOOPY: TrackEntry = TrackEntry {
    road_width: 0.44,
    waypoints: &[
        [2.08, 0.3081],
        [2.547, 0.4787],
        [2.768, 0.7631],
        [2.863, 1.111],
        [2.863, 1.515],
        [2.863, 1.938],
        [2.863, 2.286],
        [2.863, 2.703],
        [2.919, 3.107],
        [3.172, 3.436],
        [3.589, 3.588],
        [4.025, 3.562],
        [4.379, 3.335],
        [4.562, 3.038],
        [4.607, 2.735],
        [4.613, 2.349],
        [4.613, 1.976],
        [4.613, 1.641],
        [4.613, 1.287],
        [4.6, 0.9456],
        [4.771, 0.636],
        [5.036, 0.4338],
        [5.409, 0.3074],
        [5.833, 0.4022],
        [6.13, 0.6992],
        [6.243, 1.034],
        [6.281, 1.388],
        [6.281, 1.862],
        [6.281, 2.26],
        [6.281, 2.651],
        [6.281, 3.125],
        [6.281, 3.553],
        [6.18, 3.868],
        [5.953, 4.134],
        [5.58, 4.241],
        [5.124, 4.241],
        [4.714, 4.241],
        [4.214, 4.241],
        [3.399, 4.241],
        [2.678, 4.241],
        [1.958, 4.241],
        [1.465, 4.14],
        [1.143, 3.85],
        [1.048, 3.395],
        [1.048, 2.933],
        [1.048, 2.415],
        [1.048, 1.922],
        [1.048, 1.473],
        [1.048, 1.037],
        [1.225, 0.658],
        [1.446, 0.4242],
        [1.851, 0.3081],
    ],
    start: [2.08, 0.3081],
    start_yaw: 0.0,
};
