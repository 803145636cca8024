use geojson::{feature::Id, Feature, Value};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("feature has no geometry")]
    MissingGeometry,
    #[error("expected Point geometry, found {0}")]
    NotAPoint(&'static str),
    #[error("point has {0} coordinates, expected longitude, latitude and depth")]
    MissingDepth(usize),
    #[error("property `{0}` has the wrong type")]
    BadProperty(&'static str),
}

/// One earthquake record from the USGS summary feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Earthquake {
    pub id: Option<String>,
    pub lng: f64,
    pub lat: f64,
    pub depth_km: f64,
    /// `None` when the feed publishes `mag: null`
    pub magnitude: Option<f64>,
    pub place: Option<String>,
    pub time_ms: Option<i64>,
}

impl Earthquake {
    pub fn from_feature(feature: &Feature) -> Result<Self, FeatureError> {
        let geometry = feature.geometry.as_ref().ok_or(FeatureError::MissingGeometry)?;
        let coords = match &geometry.value {
            Value::Point(coords) => coords,
            other => return Err(FeatureError::NotAPoint(geometry_name(other))),
        };
        if coords.len() < 3 {
            return Err(FeatureError::MissingDepth(coords.len()));
        }

        let magnitude = match feature.property("mag") {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => Some(value.as_f64().ok_or(FeatureError::BadProperty("mag"))?),
        };
        let place = match feature.property("place") {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => Some(
                value
                    .as_str()
                    .ok_or(FeatureError::BadProperty("place"))?
                    .to_string(),
            ),
        };
        let time_ms = match feature.property("time") {
            None | Some(serde_json::Value::Null) => None,
            Some(value) => Some(
                value
                    .as_i64()
                    .or_else(|| value.as_f64().map(|t| t as i64))
                    .ok_or(FeatureError::BadProperty("time"))?,
            ),
        };
        let id = feature.id.as_ref().map(|id| match id {
            Id::String(s) => s.clone(),
            Id::Number(n) => n.to_string(),
        });

        Ok(Earthquake {
            id,
            lng: coords[0],
            lat: coords[1],
            depth_km: coords[2],
            magnitude,
            place,
            time_ms,
        })
    }
}

fn geometry_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}
