use crate::analysis::types::MeshSize;
use crate::config::AnalyzerConfig;
use color_eyre::eyre::{Context, Result};
use log::info;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<AnalyzerConfig> {
    info!("Loading configuration from: {:?}", config_path);

    // Open the configuration file
    let file = File::open(config_path)
        .with_context(|| format!("Failed to open configuration file {}", config_path.display()))?;

    // Parse the YAML content
    let config: AnalyzerConfig = serde_yaml::from_reader(file)
        .with_context(|| format!("Failed to parse configuration file {}", config_path.display()))?;

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

/// Load the configuration file when one is given, defaults otherwise
pub fn load_or_default(config_path: Option<&Path>) -> Result<AnalyzerConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => {
            info!("No configuration file given, using defaults");
            Ok(AnalyzerConfig::default())
        }
    }
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct AnalyzerCliOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub default_mesh_size: Option<MeshSize>,
    pub threads: Option<usize>,
    pub no_json: bool,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut AnalyzerConfig, overrides: &AnalyzerCliOverrides) -> Result<()> {
    if let Some(dir) = &overrides.input_dir {
        info!("Input directory override: {}", dir.display());
        config.input.directory = dir.clone();
    }

    if let Some(dir) = &overrides.output_dir {
        info!("Output directory override: {}", dir.display());
        config.output.directory = Some(dir.clone());
    }

    if let Some(mesh) = overrides.default_mesh_size {
        info!("Default mesh size override: {}", mesh);
        config.input.default_mesh_size = mesh;
    }

    if let Some(threads) = overrides.threads {
        config.general.threads = threads;
    }

    if overrides.no_json {
        config.output.json_file = None;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}
