//! Runtime configuration, resolved once at startup and handed to the app.

pub const DEFAULT_ENDPOINT: &str = "https://example.com/api/injuries";
pub const DEFAULT_DIAGRAM_PATH: &str = "assets/body_diagram.png";

#[cfg(not(target_arch = "wasm32"))]
const ENDPOINT_VAR: &str = "INJURY_TRACKER_ENDPOINT";
#[cfg(not(target_arch = "wasm32"))]
const DIAGRAM_VAR: &str = "INJURY_TRACKER_DIAGRAM";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Where new records are POSTed.
    pub endpoint: String,
    /// Reference image drawn under the clickable regions.
    pub diagram_path: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            diagram_path: DEFAULT_DIAGRAM_PATH.to_owned(),
        }
    }
}

impl TrackerConfig {
    /// Reads `INJURY_TRACKER_ENDPOINT` and `INJURY_TRACKER_DIAGRAM`, after loading a `.env`
    /// file if one is present. Unset or blank variables fall back to the defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };
        Self {
            endpoint: pick(ENDPOINT_VAR, DEFAULT_ENDPOINT),
            diagram_path: pick(DIAGRAM_VAR, DEFAULT_DIAGRAM_PATH),
        }
    }
}
