use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use tracing::{debug, warn};

use crate::domain::{pricing::DEFAULT_REGION, CompanyInfo};

const APP_QUALIFIER: &str = "cz";
const APP_ORG: &str = "MeverikSolution";
const APP_NAME: &str = "RealityCalculator";
const PREFERENCES_FILE: &str = "preferences.json";

/// User settings that outlive a session. Projects themselves are never
/// written here; they only leave memory through an explicit export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Company block pre-filled into every new project.
    pub default_company: CompanyInfo,
    /// Region used to price the trend chart.
    pub chart_region: String,
    /// Where exports and reports are written; the download dir if unset.
    pub export_dir: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_company: CompanyInfo::default(),
            chart_region: DEFAULT_REGION.to_string(),
            export_dir: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

fn preferences_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(PREFERENCES_FILE))
}

/// Fallback output directory when neither a configured nor a download
/// directory exists.
pub fn app_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn load_preferences() -> Option<Preferences> {
    load_preferences_from(&preferences_file()?)
}

pub fn load_preferences_from(path: &Path) -> Option<Preferences> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(preferences) => {
            debug!(path = %path.display(), "loaded preferences");
            Some(preferences)
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "ignoring unreadable preferences");
            None
        }
    }
}

pub fn save_preferences(preferences: &Preferences) -> Result<(), PersistSaveError> {
    let path = preferences_file().ok_or(PersistSaveError::StorageUnavailable)?;
    save_preferences_to(&path, preferences)
}

pub fn save_preferences_to(path: &Path, preferences: &Preferences) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(preferences)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
