use std::path::Path;
use std::sync::Arc;

use vitalflow_core::location::LocationDirectory;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitalflow_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// District/upazila lookup. `None` when the asset files are unavailable,
    /// in which case location fields are only checked for presence.
    pub locations: Option<Arc<LocationDirectory>>,
}

/// Load the location directory from `districts.json` and `upazilas.json`.
///
/// Missing or malformed files are logged and yield `None`; the server still
/// starts so the rest of the API stays available.
pub fn load_locations(assets_dir: &Path) -> Option<LocationDirectory> {
    let read = |name: &str| {
        let path = assets_dir.join(name);
        std::fs::read_to_string(&path)
            .map_err(|e| tracing::warn!(path = %path.display(), error = %e, "Location asset unavailable"))
            .ok()
    };

    let districts = read("districts.json")?;
    let upazilas = read("upazilas.json")?;

    match LocationDirectory::from_json(&districts, &upazilas) {
        Ok(directory) => {
            tracing::info!(
                districts = directory.districts().len(),
                "Location directory loaded"
            );
            Some(directory)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Location assets are malformed; skipping location checks");
            None
        }
    }
}
