use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{
    EARTHQUAKE_OVERLAY_NAME, MARKER_FILL_OPACITY, MARKER_STROKE_COLOR, MARKER_STROKE_WEIGHT,
};
use crate::earthquake::Earthquake;
use crate::styling::{depth_color, marker_size};

// Leaflet path options, serialized under the names `L.circleMarker` expects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: f64,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledMarker {
    pub id: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub style: MarkerStyle,
    pub popup: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EarthquakeLayer {
    pub name: &'static str,
    pub markers: Vec<StyledMarker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathStyle {
    pub color: &'static str,
    pub weight: f64,
}

/// Plate boundaries are drawn with one fixed style, no per-feature logic.
pub const PLATE_STYLE: PathStyle = PathStyle {
    color: "orange",
    weight: 2.0,
};

const UNKNOWN: &str = "unknown";

pub fn marker_style(quake: &Earthquake) -> MarkerStyle {
    MarkerStyle {
        // events without a magnitude still get a (zero-radius) marker
        radius: marker_size(quake.magnitude.unwrap_or(0.0)),
        fill_color: depth_color(quake.depth_km),
        color: MARKER_STROKE_COLOR,
        weight: MARKER_STROKE_WEIGHT,
        fill_opacity: MARKER_FILL_OPACITY,
    }
}

pub fn render_marker(quake: &Earthquake) -> StyledMarker {
    StyledMarker {
        id: quake.id.clone(),
        lat: quake.lat,
        lng: quake.lng,
        style: marker_style(quake),
        popup: popup_html(quake),
    }
}

pub fn render_layer(quakes: &[Earthquake]) -> EarthquakeLayer {
    EarthquakeLayer {
        name: EARTHQUAKE_OVERLAY_NAME,
        markers: quakes.iter().map(render_marker).collect(),
    }
}

pub fn popup_html(quake: &Earthquake) -> String {
    let place = quake
        .place
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "Unknown location".to_string());
    format!(
        "<h3>Location: {}</h3><p>Magnitude: {}</p><p>Depth: {} km</p><p>Time: {}</p>",
        place,
        quake.magnitude.map_or_else(|| UNKNOWN.to_string(), format_number),
        format_number(quake.depth_km),
        quake.time_ms.map_or_else(|| UNKNOWN.to_string(), format_event_time)
    )
}

// Negative zero prints as `0`
fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Epoch milliseconds as e.g. `Thu Oct 16 2025 07:35:02 UTC`.
pub fn format_event_time(time_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(time_ms) {
        Some(dt) => dt.format("%a %b %d %Y %H:%M:%S UTC").to_string(),
        None => time_ms.to_string(),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Earthquake {
        Earthquake {
            id: Some("ci40000001".into()),
            lng: -117.5,
            lat: 35.7,
            depth_km: 45.0,
            magnitude: Some(5.0),
            place: Some("10 km SW of Ridgecrest, CA".into()),
            time_ms: Some(0),
        }
    }

    #[test]
    fn sample_feature_style() {
        let marker = render_marker(&sample());
        assert_eq!(marker.style.radius, 20.0);
        assert_eq!(marker.style.fill_color, "#FFDA33");
        assert_eq!(marker.style.color, "black");
        assert_eq!(marker.style.weight, 0.5);
        assert_eq!(marker.style.fill_opacity, 0.8);
        assert_eq!((marker.lat, marker.lng), (35.7, -117.5));
    }

    #[test]
    fn popup_lists_place_magnitude_depth_time() {
        let popup = popup_html(&sample());
        assert_eq!(
            popup,
            "<h3>Location: 10 km SW of Ridgecrest, CA</h3><p>Magnitude: 5</p>\
             <p>Depth: 45 km</p><p>Time: Thu Jan 01 1970 00:00:00 UTC</p>"
        );
    }

    #[test]
    fn popup_escapes_place_and_handles_missing() {
        let mut quake = sample();
        quake.place = Some("<b>Tom & Jerry</b>".into());
        assert!(popup_html(&quake).contains("Location: &lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"));

        quake.place = None;
        assert!(popup_html(&quake).contains("Location: Unknown location"));
    }

    #[test]
    fn missing_magnitude_and_time_show_unknown() {
        let mut quake = sample();
        quake.magnitude = None;
        quake.time_ms = None;
        let popup = popup_html(&quake);
        assert!(popup.contains("<p>Magnitude: unknown</p>"), "{popup}");
        assert!(popup.contains("<p>Time: unknown</p>"), "{popup}");
        assert!(!popup.contains("1970"));
        assert_eq!(marker_style(&quake).radius, 0.0);
    }

    #[test]
    fn negative_zero_magnitude_prints_as_zero() {
        let mut quake = sample();
        quake.magnitude = Some(-0.0);
        quake.depth_km = -0.0;
        let popup = popup_html(&quake);
        assert!(popup.contains("<p>Magnitude: 0</p>"), "{popup}");
        assert!(popup.contains("<p>Depth: 0 km</p>"), "{popup}");
    }

    #[test]
    fn event_time_formatting() {
        assert_eq!(format_event_time(1_760_600_102_000), "Thu Oct 16 2025 07:35:02 UTC");
        assert_eq!(format_event_time(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn style_serializes_with_leaflet_names() {
        let json = serde_json::to_value(marker_style(&sample())).unwrap();
        assert_eq!(json["fillColor"], "#FFDA33");
        assert_eq!(json["fillOpacity"], 0.8);
        assert_eq!(json["radius"], 20.0);
    }

    #[test]
    fn layer_keeps_feed_order() {
        let mut deep = sample();
        deep.depth_km = 95.0;
        deep.magnitude = Some(-0.5);
        let layer = render_layer(&[sample(), deep]);
        assert_eq!(layer.markers.len(), 2);
        assert_eq!(layer.markers[1].style.fill_color, "#FF3F33");
        assert_eq!(layer.markers[1].style.radius, -2.0);
    }
}
