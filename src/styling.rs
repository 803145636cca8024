use serde::Serialize;

/// One row of the depth ladder. `lower` is exclusive, `upper` inclusive;
/// `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthBand {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub color: &'static str,
    pub label: &'static str,
}

impl DepthBand {
    pub fn contains(&self, depth: f64) -> bool {
        let above_lower = self.lower.map_or(true, |lower| depth > lower);
        let within_upper = self.upper.map_or(true, |upper| !(depth > upper));
        above_lower && within_upper
    }
}

/// Depth bands ordered from deepest to shallowest, the order the ladder is
/// evaluated in. Contiguous and exhaustive over the real line.
pub static DEPTH_BANDS: [DepthBand; 6] = [
    DepthBand { lower: Some(90.0), upper: None, color: "#FF3F33", label: "90+" },
    DepthBand { lower: Some(70.0), upper: Some(90.0), color: "#FF8033", label: "70-90" },
    DepthBand { lower: Some(50.0), upper: Some(70.0), color: "#FFAC33", label: "50-70" },
    DepthBand { lower: Some(30.0), upper: Some(50.0), color: "#FFDA33", label: "30-50" },
    DepthBand { lower: Some(10.0), upper: Some(30.0), color: "#E9FF33", label: "10-30" },
    DepthBand { lower: None, upper: Some(10.0), color: "#93FF33", label: "-10-10" },
];

/// Marker radius in pixels for a magnitude. Not clamped.
pub fn marker_size(magnitude: f64) -> f64 {
    magnitude * 4.0
}

/// Band for a depth in km. Evaluated top-down with strict `>`, so a depth
/// sitting exactly on a threshold lands in the shallower band. NaN fails
/// every comparison and ends up in the last band.
pub fn band_for_depth(depth: f64) -> &'static DepthBand {
    DEPTH_BANDS
        .iter()
        .find(|band| band.contains(depth))
        .unwrap_or(&DEPTH_BANDS[DEPTH_BANDS.len() - 1])
}

/// Fill color for a depth in km.
pub fn depth_color(depth: f64) -> &'static str {
    band_for_depth(depth).color
}
