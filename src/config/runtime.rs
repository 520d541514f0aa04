use super::settings::IdentifySettings;
use crate::grid::GridGeometry;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one PNG per stored artifact.
    pub dir: PathBuf,
    #[serde(default)]
    pub json_out: Option<PathBuf>,
    /// Overlay render of labels, outlines and gridlines.
    #[serde(default)]
    pub debug_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub grid_path: PathBuf,
    /// 16-bit label PNG published under `settings.guide_objects_name`.
    #[serde(default)]
    pub guide_path: Option<PathBuf>,
    pub settings: IdentifySettings,
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn load_grid(path: &Path) -> Result<GridGeometry, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read grid {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse grid {}: {e}", path.display()))
}
