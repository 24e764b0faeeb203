//! Manifest files: one path per line, blank lines and `#` comments ignored.

use std::fs;
use std::path::{Path, PathBuf};

use crate::AppError;

pub(crate) fn load_manifest(path: &Path) -> Result<Vec<PathBuf>, AppError> {
    let contents = fs::read_to_string(path).map_err(|source| AppError::ReadManifest {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_manifest(&contents))
}

fn parse_manifest(contents: &str) -> Vec<PathBuf> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}
