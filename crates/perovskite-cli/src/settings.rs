// src/settings.rs

use directories::ProjectDirs;
use perovskite_core::reference::{DEFAULT_BASE_URL, DEFAULT_DATA_DIR};
use perovskite_core::Origin;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Where the reference tables come from.
///
/// Stored as JSON, e.g. `~/.config/perovskite/settings.json`:
///
/// ```json
/// { "origin": "local", "data_dir": "Data_ions" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub origin: Origin,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_base_url")]
    pub online_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            origin: Origin::Local,
            data_dir: default_data_dir(),
            online_base_url: default_base_url(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist and parse. Without one, the standard OS
    /// location is tried and defaults are used when it is absent or broken.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        let path = Self::default_path();
        if !path.exists() {
            log::debug!("no settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        match Self::read(&path) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self, String> {
        let file =
            File::open(path).map_err(|e| format!("Error opening settings {:?}: {}", path, e))?;
        let settings: Settings = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("Error parsing settings {:?}: {}", path, e))?;
        log::debug!("settings loaded from {:?}", path);
        Ok(settings)
    }

    fn default_path() -> PathBuf {
        if let Some(proj) = ProjectDirs::from("org", "FAIRmat", "perovskite") {
            proj.config_dir().join("settings.json")
        } else {
            PathBuf::from("settings.json")
        }
    }
}
