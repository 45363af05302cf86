use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const DEFAULT_DIR_NAME: &str = ".fit_intake";
const PROFILE_DIR: &str = "profile";

/// Stores user-configurable preferences for the onboarding app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Show the product tour before completing onboarding.
    #[serde(default = "Config::default_show_preview")]
    pub show_preview: bool,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the stored profile. Defaults to `<data dir>/profile`.
    pub profile_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_preview: Self::default_show_preview(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            profile_root: None,
        }
    }
}

impl Config {
    pub fn default_show_preview() -> bool {
        true
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Default application data directory, `~/.fit_intake`.
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_profile_root(&self, data_dir: &Path) -> PathBuf {
        match &self.profile_root {
            Some(path) => path.clone(),
            None => data_dir.join(PROFILE_DIR),
        }
    }
}
