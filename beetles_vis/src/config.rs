//! Viewer configuration: JSON file in the OS config dir, overridden by
//! env vars, overridden by CLI args.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// `host:port` of the simulation daemon.
    pub endpoint: String,
    /// On-page offset of the rendering surface.
    pub origin_x: f32,
    pub origin_y: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            endpoint: beetles_ui::DEFAULT_ENDPOINT.to_string(),
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl ViewConfig {
    pub fn load() -> Self {
        let mut config = Self::from_file().unwrap_or_default();

        if let Ok(v) = env::var("BEETLES_ENDPOINT") {
            config.endpoint = v;
        }

        let mut args = env::args().skip(1);
        while let Some(a) = args.next() {
            match a.as_str() {
                "--endpoint" => {
                    if let Some(v) = args.next() {
                        config.endpoint = v;
                    }
                }
                "--origin-x" => {
                    if let Some(v) = args.next() {
                        config.origin_x = v.parse().unwrap_or(config.origin_x);
                    }
                }
                "--origin-y" => {
                    if let Some(v) = args.next() {
                        config.origin_y = v.parse().unwrap_or(config.origin_y);
                    }
                }
                other => {
                    warn!(arg = other, "ignoring unknown argument");
                }
            }
        }

        config
    }

    fn from_file() -> Option<Self> {
        let path = Self::config_file()?;
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    fn config_file() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("beetles").join("viewer.json"))
    }
}
