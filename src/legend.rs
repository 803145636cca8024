use serde::Serialize;

use crate::styling::{DepthBand, DEPTH_BANDS};

const GRADIENT_HEIGHT_PX: u32 = 120;

/// Depth legend shown in a map corner. Independent of the loaded data.
#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub position: &'static str,
    pub title: &'static str,
    pub bands: &'static [DepthBand],
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            position: "bottomright",
            title: "Depth (km)",
            bands: &DEPTH_BANDS,
        }
    }
}

impl Legend {
    /// HTML fragment for the legend control: a vertical gradient with the
    /// shallowest color on top, labels running shallow to deep beside it.
    pub fn render_html(&self) -> String {
        // `to top` lists colors bottom-up, so deepest first puts it at the bottom
        let gradient = self
            .bands
            .iter()
            .map(|band| band.color)
            .collect::<Vec<_>>()
            .join(", ");
        let labels: String = self
            .bands
            .iter()
            .rev()
            .map(|band| format!("<span>{}</span>", band.label))
            .collect();

        format!(
            r#"<div class="legend-panel">
  <div class="legend-title">{title}</div>
  <div style="display: flex; align-items: center;">
    <div class="legend-gradient" style="height: {h}px; width: 20px; background: linear-gradient(to top, {gradient});"></div>
    <div class="legend-labels" style="display: flex; flex-direction: column; justify-content: space-between; height: {h}px; margin-left: 8px;">{labels}</div>
  </div>
</div>"#,
            title = self.title,
            h = GRADIENT_HEIGHT_PX,
            gradient = gradient,
            labels = labels,
        )
    }
}
