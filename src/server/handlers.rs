use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use rust_embed::RustEmbed;
use serde::Serialize;

use crate::layers::MapConfig;
use crate::render::{EarthquakeLayer, PathStyle, PLATE_STYLE};

use super::state::AppState;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Asset;

fn embedded(path: &str, content_type: &'static str) -> Response {
    match Asset::get(path) {
        Some(file) => ([(header::CONTENT_TYPE, content_type)], file.data.into_owned()).into_response(),
        None => {
            tracing::error!(path, "embedded asset missing");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub async fn index_html() -> Response {
    embedded("index.html", "text/html; charset=utf-8")
}

pub async fn style_css() -> Response {
    embedded("style.css", "text/css")
}

pub async fn script_js() -> Response {
    embedded("script.js", "application/javascript")
}

pub async fn get_map_config(State(state): State<AppState>) -> Json<MapConfig> {
    Json(state.config.as_ref().clone())
}

pub async fn get_earthquakes(State(state): State<AppState>) -> Json<EarthquakeLayer> {
    Json(state.data.earthquakes.clone())
}

#[derive(Serialize)]
pub struct PlatesResponse<'a> {
    pub style: PathStyle,
    pub data: &'a geojson::GeoJson,
}

pub async fn get_plates(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let plates = state.data.plates.as_ref().ok_or(StatusCode::NOT_FOUND)?;
    let body = PlatesResponse {
        style: PLATE_STYLE,
        data: plates,
    };
    Ok(Json(body).into_response())
}

pub async fn get_legend(State(state): State<AppState>) -> Html<String> {
    Html(state.legend_html.to_string())
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub variant: String,
    pub earthquakes: usize,
    pub plates: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        variant: state.data.variant.to_string(),
        earthquakes: state.data.earthquakes.markers.len(),
        plates: state.data.plate_feature_count(),
    })
}
