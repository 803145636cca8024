use anyhow::{Context, Result};
use geojson::GeoJson;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::earthquake::Earthquake;
use crate::layers::MapVariant;
use crate::render::{render_layer, EarthquakeLayer};
use crate::settings::Settings;

/// Where a GeoJSON document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            FeedSource::Url(source.to_string())
        } else {
            FeedSource::File(PathBuf::from(source))
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => f.write_str(url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Single GET or file read. No retries.
pub async fn fetch_document(client: &reqwest::Client, source: &FeedSource) -> Result<String> {
    let body = match source {
        FeedSource::Url(url) => client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", url))?
            .error_for_status()
            .with_context(|| format!("Feed {} returned an error status", url))?
            .text()
            .await
            .with_context(|| format!("Failed to read body from {}", url))?,
        FeedSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read feed file {}", path.display()))?,
    };
    debug!(source = %source, bytes = body.len(), "fetched feed document");
    Ok(body)
}

pub async fn fetch_geojson(client: &reqwest::Client, source: &FeedSource) -> Result<GeoJson> {
    let body = fetch_document(client, source).await?;
    body.parse::<GeoJson>()
        .with_context(|| format!("{} is not valid GeoJSON", source))
}

/// Decodes every usable earthquake; features that don't decode are logged
/// and dropped.
pub fn earthquakes_from_geojson(geojson: &GeoJson) -> Result<Vec<Earthquake>> {
    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features.iter().collect::<Vec<_>>(),
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => anyhow::bail!("earthquake feed is a bare geometry, expected features"),
    };

    let mut quakes = Vec::with_capacity(features.len());
    for (index, feature) in features.into_iter().enumerate() {
        match Earthquake::from_feature(feature) {
            Ok(quake) => quakes.push(quake),
            Err(e) => warn!(index, error = %e, "skipping earthquake feature"),
        }
    }
    Ok(quakes)
}

fn feature_count(geojson: &GeoJson) -> usize {
    match geojson {
        GeoJson::FeatureCollection(collection) => collection.features.len(),
        GeoJson::Feature(_) => 1,
        GeoJson::Geometry(_) => 0,
    }
}

/// Data behind the overlays, loaded once at startup.
#[derive(Debug, Clone)]
pub struct MapData {
    pub variant: MapVariant,
    pub earthquakes: EarthquakeLayer,
    pub plates: Option<GeoJson>,
}

impl MapData {
    pub fn new(variant: MapVariant, quakes: &[Earthquake], plates: Option<GeoJson>) -> Self {
        Self {
            variant,
            earthquakes: render_layer(quakes),
            plates,
        }
    }

    pub fn plate_feature_count(&self) -> usize {
        self.plates.as_ref().map_or(0, feature_count)
    }
}

/// Plates are loaded before earthquakes when the variant shows them.
pub async fn load_map_data(client: &reqwest::Client, settings: &Settings) -> Result<MapData> {
    let plates = if settings.variant.includes_plates() {
        let source = FeedSource::parse(&settings.plates_feed);
        info!(source = %source, "loading tectonic plate boundaries");
        let plates = fetch_geojson(client, &source)
            .await
            .context("Failed to load tectonic plate feed")?;
        info!(features = feature_count(&plates), "plate boundaries loaded");
        Some(plates)
    } else {
        None
    };

    let source = FeedSource::parse(&settings.earthquake_feed);
    info!(source = %source, "loading earthquakes");
    let geojson = fetch_geojson(client, &source)
        .await
        .context("Failed to load earthquake feed")?;
    let quakes = earthquakes_from_geojson(&geojson)?;
    info!(
        earthquakes = quakes.len(),
        skipped = feature_count(&geojson) - quakes.len(),
        "earthquakes loaded"
    );

    Ok(MapData::new(settings.variant, &quakes, plates))
}
