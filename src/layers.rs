use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_ZOOM, EARTHQUAKE_OVERLAY_NAME, MAP_CENTER, MAX_ZOOM, PLATES_OVERLAY_NAME,
};
use crate::legend::Legend;

/// Which map gets assembled: grayscale + earthquakes only, or the full
/// three-basemap view with plate boundaries and a layer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapVariant {
    Basic,
    #[default]
    Tectonic,
}

impl MapVariant {
    pub fn includes_plates(self) -> bool {
        matches!(self, MapVariant::Tectonic)
    }
}

impl fmt::Display for MapVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapVariant::Basic => f.write_str("basic"),
            MapVariant::Tectonic => f.write_str("tectonic"),
        }
    }
}

impl FromStr for MapVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "1" => Ok(MapVariant::Basic),
            "tectonic" | "2" => Ok(MapVariant::Tectonic),
            other => anyhow::bail!("unknown map variant `{}` (expected basic or tectonic)", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
}

pub const SATELLITE: TileLayer = TileLayer {
    name: "Satellite",
    url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
    attribution: "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community",
};

pub const GRAYSCALE: TileLayer = TileLayer {
    name: "Grayscale",
    url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
    attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>",
};

pub const OUTDOOR: TileLayer = TileLayer {
    name: "Outdoor",
    url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Physical_Map/MapServer/tile/{z}/{y}/{x}",
    attribution: "Tiles &copy; Esri &mdash; Source: US National Park Service",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Earthquakes,
    Plates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub name: &'static str,
    pub kind: OverlayKind,
    /// API path the page loads the layer data from
    pub endpoint: &'static str,
}

pub const EARTHQUAKE_OVERLAY: Overlay = Overlay {
    name: EARTHQUAKE_OVERLAY_NAME,
    kind: OverlayKind::Earthquakes,
    endpoint: "/api/earthquakes",
};

pub const PLATES_OVERLAY: Overlay = Overlay {
    name: PLATES_OVERLAY_NAME,
    kind: OverlayKind::Plates,
    endpoint: "/api/plates",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerControl {
    pub base_layers: Vec<&'static str>,
    pub overlays: Vec<&'static str>,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center: [f64; 2],
    pub zoom: u8,
    pub max_zoom: u8,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: MAP_CENTER,
            zoom: DEFAULT_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

/// Everything the page needs to build the Leaflet map, minus the layer data.
#[derive(Debug, Clone, Serialize)]
pub struct MapConfig {
    pub variant: MapVariant,
    pub options: MapOptions,
    pub base_layers: Vec<TileLayer>,
    /// Name of the base layer shown on load
    pub active_base: &'static str,
    pub overlays: Vec<Overlay>,
    pub layer_control: Option<LayerControl>,
    pub legend: Legend,
}

impl MapConfig {
    pub fn for_variant(variant: MapVariant) -> Self {
        let (base_layers, overlays) = match variant {
            MapVariant::Basic => (vec![GRAYSCALE], vec![EARTHQUAKE_OVERLAY]),
            MapVariant::Tectonic => (
                vec![SATELLITE, GRAYSCALE, OUTDOOR],
                vec![EARTHQUAKE_OVERLAY, PLATES_OVERLAY],
            ),
        };

        let layer_control = match variant {
            MapVariant::Basic => None,
            MapVariant::Tectonic => Some(LayerControl {
                base_layers: base_layers.iter().map(|l| l.name).collect(),
                overlays: overlays.iter().map(|o| o.name).collect(),
                collapsed: false,
            }),
        };

        let active_base = base_layers[0].name;

        MapConfig {
            variant,
            options: MapOptions::default(),
            base_layers,
            active_base,
            overlays,
            layer_control,
            legend: Legend::default(),
        }
    }
}
