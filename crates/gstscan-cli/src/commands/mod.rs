pub mod batch;
pub mod config;
pub mod models;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use gstscan_core::models::config::GstScanConfig;
use gstscan_core::{create_engine, PureOcrEngine};

/// Default location of the JSON config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gstscan")
        .join("config.json")
}

/// Shared model directory under the user data dir.
pub fn data_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gstscan")
        .join("models")
}

/// Load the config named by `--config`, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<GstScanConfig> {
    if let Some(path) = config_path {
        return Ok(GstScanConfig::load(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(GstScanConfig::load(&path)?)
    } else {
        Ok(GstScanConfig::default())
    }
}

/// Pick the model directory: explicit flag, then the configured directory,
/// then the user data dir.
pub fn resolve_model_dir(config: &GstScanConfig, override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if config.ocr.model_dir.exists() {
        return config.ocr.model_dir.clone();
    }
    data_model_dir()
}

/// Load the OCR engine from the resolved model directory.
pub fn load_engine(
    config: &mut GstScanConfig,
    override_dir: Option<&Path>,
) -> anyhow::Result<PureOcrEngine> {
    config.ocr.model_dir = resolve_model_dir(config, override_dir);
    debug!("Using OCR models from {}", config.ocr.model_dir.display());

    create_engine(&config.ocr).map_err(|e| {
        anyhow::anyhow!(
            "{}\n\nRun 'gstscan models status' to see which model files are expected.",
            e
        )
    })
}
