use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod constants;
mod earthquake;
mod feed;
mod layers;
mod legend;
mod render;
mod server;
mod settings;
mod styling;
mod utils;

use server::{start_server, AppState};
use settings::Settings;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quakemap=info,tower_http=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    info!("QuakeMap v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load().context("Failed to load settings")?;
    info!(
        variant = %settings.variant,
        port = settings.port,
        "settings loaded from {}",
        Settings::config_path().display()
    );

    let client = reqwest::Client::builder()
        .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let data = feed::load_map_data(&client, &settings).await?;
    let state = AppState::new(data);

    let url = utils::local_url(settings.port);
    if settings.auto_open_browser {
        if let Err(e) = utils::open_browser(&url) {
            warn!(error = %e, "could not open browser, visit {} manually", url);
        }
    } else {
        info!("open {} in a browser to view the map", url);
    }

    start_server(state, settings.port).await?;

    Ok(())
}
