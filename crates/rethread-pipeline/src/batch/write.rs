//! Atomic file replacement.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Replaces the contents of `path` with `content`.
///
/// Symlinks are followed: the file they point at is replaced and the link is
/// kept. The text is written to a temporary file next to that file and
/// renamed over it, so readers see either the old or the new file. The
/// target's permissions are carried over.
pub(super) fn replace_file(path: &Path, content: &str) -> io::Result<()> {
    let target = fs::canonicalize(path)?;
    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(&target)?.permissions();

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.as_file().set_permissions(permissions)?;

    temp_file.persist(&target).map_err(|err| err.error)?;
    Ok(())
}
