use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::types::MeshSize;

/// Top-level configuration structure that mirrors the YAML configuration.
///
/// Every section is optional in the file; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub general: GeneralConfig,
}

/// Where the simulator logs are and how to read them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory holding the simulator output files
    pub directory: PathBuf,
    /// Glob pattern, relative to `directory`, selecting the log files
    pub pattern: String,
    /// Mesh size assumed when neither file name nor content states one
    pub default_mesh_size: MeshSize,
}

/// Where the reports go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// (Optional) Output directory; defaults to the input directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    pub csv_file: String,
    pub report_file: String,
    /// (Optional) JSON report file name; `null` disables the JSON report
    pub json_file: Option<String>,
}

/// Shared general configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Parsing worker threads, 0 lets rayon decide
    pub threads: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("test_outputs"),
            pattern: "test_*.txt".to_string(),
            default_mesh_size: MeshSize::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            csv_file: "compiled_results.csv".to_string(),
            report_file: "summary_report.txt".to_string(),
            json_file: Some("analysis_report.json".to_string()),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid input configuration: {0}")]
    InvalidInput(String),
    #[error("Invalid output configuration: {0}")]
    InvalidOutput(String),
}

impl AnalyzerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.input.directory.as_os_str().is_empty() {
            return Err(ValidationError::InvalidInput(
                "directory cannot be empty".to_string(),
            ));
        }
        if self.input.pattern.trim().is_empty() {
            return Err(ValidationError::InvalidInput(
                "pattern cannot be empty".to_string(),
            ));
        }

        Self::validate_file_name("csv_file", &self.output.csv_file)?;
        Self::validate_file_name("report_file", &self.output.report_file)?;
        if let Some(json_file) = &self.output.json_file {
            Self::validate_file_name("json_file", json_file)?;
        }

        let names = [
            Some(&self.output.csv_file),
            Some(&self.output.report_file),
            self.output.json_file.as_ref(),
        ];
        let names: Vec<&String> = names.into_iter().flatten().collect();
        for (i, name) in names.iter().enumerate() {
            if names[i + 1..].contains(name) {
                return Err(ValidationError::InvalidOutput(format!(
                    "output file '{}' is used for more than one report",
                    name
                )));
            }
        }

        Ok(())
    }

    fn validate_file_name(field: &str, name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidOutput(format!("{} cannot be empty", field)));
        }
        if Path::new(name).components().count() != 1 {
            return Err(ValidationError::InvalidOutput(format!(
                "{} must be a plain file name, got '{}'",
                field, name
            )));
        }
        Ok(())
    }

    /// Directory the reports are written to
    pub fn output_dir(&self) -> &Path {
        self.output
            .directory
            .as_deref()
            .unwrap_or(self.input.directory.as_path())
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.csv_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.report_file)
    }

    pub fn json_path(&self) -> Option<PathBuf> {
        self.output
            .json_file
            .as_ref()
            .map(|name| self.output_dir().join(name))
    }
}
