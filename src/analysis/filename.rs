//! Run identity recovered from a log file name.
//!
//! Two naming schemes are produced by the test scripts:
//! `test_<algo>_<W>x<H>_<rate>pct_<suffix>.txt` and the older
//! `test_<algo>_<rate>pct_<suffix>.txt`. Both may embed a
//! `YYYY-MM-DD_HH-MM-SS` timestamp somewhere in the suffix.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::{Captures, Regex};

use super::types::{MeshSize, SkipReason, TIMESTAMP_FORMAT};

/// Naming schemes, in the order they are tried.
///
/// `WithMesh` must come first: the looser `WithoutMesh` pattern would
/// otherwise read `test_XY_4x4_30pct_...` as algorithm `XY_4x4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameGrammar {
    WithMesh,
    WithoutMesh,
}

impl FilenameGrammar {
    pub const PRIORITY: [FilenameGrammar; 2] = [FilenameGrammar::WithMesh, FilenameGrammar::WithoutMesh];

    fn pattern(self) -> &'static Regex {
        match self {
            FilenameGrammar::WithMesh => &PATTERNS.with_mesh,
            FilenameGrammar::WithoutMesh => &PATTERNS.without_mesh,
        }
    }

    /// Apply this grammar alone. Returns `Ok(None)` when the name does not fit.
    ///
    /// A number too large for its field is an error, same as in the log
    /// content. A mesh with a zero dimension is dropped so the content or the
    /// default supplies it.
    pub fn apply(self, file_name: &str) -> Result<Option<FilenameInfo>, SkipReason> {
        let Some(caps) = self.pattern().captures(file_name) else {
            return Ok(None);
        };
        let mut info = FilenameInfo {
            grammar: Some(self),
            ..FilenameInfo::with_timestamp(file_name)
        };

        match self {
            FilenameGrammar::WithMesh => {
                info.algorithm = Some(caps[1].to_string());
                info.mesh_size = mesh_from_captures(file_name, &caps, 2, 3)?;
                info.injection_rate = Some(parse_token("injection rate", &caps[4])?);
            }
            FilenameGrammar::WithoutMesh => {
                info.algorithm = Some(caps[1].to_string());
                info.injection_rate = Some(parse_token("injection rate", &caps[2])?);
            }
        }

        Ok(Some(info))
    }
}

/// Identity fields a file name carried. Every field is optional; the
/// content scan fills whatever is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilenameInfo {
    pub grammar: Option<FilenameGrammar>,
    pub algorithm: Option<String>,
    pub mesh_size: Option<MeshSize>,
    pub injection_rate: Option<u32>,
    /// Timestamp token exactly as it appears in the name
    pub timestamp: Option<String>,
    /// The token as a date, `None` when it is not a real calendar date
    pub started_at: Option<NaiveDateTime>,
}

impl FilenameInfo {
    fn with_timestamp(file_name: &str) -> Self {
        let token = find_timestamp(file_name);
        Self {
            timestamp: token.map(str::to_string),
            started_at: token.and_then(parse_timestamp),
            ..Self::default()
        }
    }
}

struct FilenamePatterns {
    with_mesh: Regex,
    without_mesh: Regex,
    timestamp: Regex,
}

static PATTERNS: LazyLock<FilenamePatterns> = LazyLock::new(|| FilenamePatterns {
    with_mesh: Regex::new(r"^test_(\w+)_(\d+)x(\d+)_(\d+)pct_.*\.txt$")
        .expect("Invalid with_mesh regex"),
    without_mesh: Regex::new(r"^test_(\w+)_(\d+)pct_.*\.txt$")
        .expect("Invalid without_mesh regex"),
    timestamp: Regex::new(r"(\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2})")
        .expect("Invalid timestamp regex"),
});

fn parse_token<T: FromStr>(field: &'static str, value: &str) -> Result<T, SkipReason> {
    value.parse().map_err(|_| SkipReason::MalformedFileName {
        field,
        value: value.to_string(),
    })
}

fn mesh_from_captures(
    file_name: &str,
    caps: &Captures<'_>,
    w: usize,
    h: usize,
) -> Result<Option<MeshSize>, SkipReason> {
    let width: u32 = parse_token("mesh width", &caps[w])?;
    let height: u32 = parse_token("mesh height", &caps[h])?;
    if width == 0 || height == 0 {
        log::debug!("{}: ignoring mesh size {}x{} in file name", file_name, width, height);
        return Ok(None);
    }
    Ok(Some(MeshSize::new(width, height)))
}

/// Find the `YYYY-MM-DD_HH-MM-SS` token in a file name, by shape only
pub fn find_timestamp(file_name: &str) -> Option<&str> {
    PATTERNS
        .timestamp
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Read a timestamp token as a date. An impossible date (month 13, ...)
/// yields `None`.
pub fn parse_timestamp(token: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(token, TIMESTAMP_FORMAT).ok()
}

/// Try every grammar in priority order.
///
/// A name matching none of them still yields its timestamp.
pub fn parse_filename(file_name: &str) -> Result<FilenameInfo, SkipReason> {
    for grammar in FilenameGrammar::PRIORITY {
        if let Some(info) = grammar.apply(file_name)? {
            return Ok(info);
        }
    }
    Ok(FilenameInfo::with_timestamp(file_name))
}
