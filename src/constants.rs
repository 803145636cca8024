// Port configuration
pub const DEFAULT_PORT: u16 = 3001;

// Feeds
pub const EARTHQUAKE_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
pub const PLATES_FEED_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

// Initial view
pub const MAP_CENTER: [f64; 2] = [37.09, -95.71];
pub const DEFAULT_ZOOM: u8 = 3;
pub const MAX_ZOOM: u8 = 15;

// Earthquake markers
pub const MARKER_STROKE_COLOR: &str = "black";
pub const MARKER_STROKE_WEIGHT: f64 = 0.5;
pub const MARKER_FILL_OPACITY: f64 = 0.8;

// Overlay names, as shown in the layer control
pub const EARTHQUAKE_OVERLAY_NAME: &str = "Earthquakes";
pub const PLATES_OVERLAY_NAME: &str = "Tectonic Plates";

pub const CONFIG_FILE_NAME: &str = "quakemap.ini";
