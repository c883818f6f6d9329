use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::brush::{BrushSize, BrushSizes, DEFAULT_PALETTE};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "KIDS_DRAWING_CONFIG";

const APP_DIR: &str = "kids_drawing";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where and how exported drawings are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File names are `<file_prefix>_<unix millis>.png`
    pub file_prefix: String,
    /// Overrides the platform cache directory
    pub cache_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: "KidsDrawingApp".to_owned(),
            cache_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old configs
pub struct AppConfig {
    pub title: String,
    pub brush_sizes: BrushSizes,
    pub default_brush: BrushSize,
    /// Palette swatches as `#RRGGBB` or `#AARRGGBB`
    pub palette: Vec<String>,
    pub default_palette_index: usize,
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Kids Drawing App".to_owned(),
            brush_sizes: BrushSizes::default(),
            default_brush: BrushSize::Medium,
            palette: DEFAULT_PALETTE.iter().map(|tag| (*tag).to_owned()).collect(),
            default_palette_index: 1,
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.brush_sizes = config.brush_sizes.sanitized();
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// `$KIDS_DRAWING_CONFIG`, or `config.json` in the user's config directory.
    pub fn default_path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json")),
        }
    }

    /// Loads the user's config. A missing file means defaults; a broken one is
    /// logged and ignored.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    /// Directory exported drawings are written to.
    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.export
            .cache_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join(APP_DIR)))
    }
}
