//! Input log discovery.

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};

/// Errors that end a run before any file is parsed
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Input directory not found: {path}")]
    InputDirMissing { path: String },

    #[error("No files matching '{pattern}' found in {dir}")]
    NoMatchingFiles { dir: String, pattern: String },

    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Resolve a glob pattern relative to a directory, escaping the directory part
pub fn resolve_glob(dir: &Path, pattern: &str) -> String {
    let escaped_dir = Pattern::escape(&dir.to_string_lossy());
    Path::new(&escaped_dir).join(pattern).to_string_lossy().into_owned()
}

/// Find the log files in `dir` matching `pattern`, sorted by path.
///
/// Directories matching the pattern are ignored. Entries that cannot be
/// read while walking are dropped with a warning.
pub fn discover_logs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !dir.is_dir() {
        return Err(DiscoveryError::InputDirMissing {
            path: dir.display().to_string(),
        });
    }

    let full_pattern = resolve_glob(dir, pattern);
    let entries = glob(&full_pattern).map_err(|e| DiscoveryError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Cannot access {}: {}", e.path().display(), e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();

    if paths.is_empty() {
        return Err(DiscoveryError::NoMatchingFiles {
            dir: dir.display().to_string(),
            pattern: pattern.to_string(),
        });
    }

    paths.sort();
    log::info!("Found {} log files in {}", paths.len(), dir.display());
    for (i, path) in paths.iter().enumerate() {
        log::debug!("  {}. {}", i + 1, path.display());
    }

    Ok(paths)
}
