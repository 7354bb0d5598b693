use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a config or manifest file, replacing invalid UTF-8 with the replacement character.
///
/// Config files written by editors on some platforms carry stray bytes; a lossy
/// read lets the parser report a real syntax error instead of an IO error.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Whether `path` names an existing regular file that can be opened for reading.
#[must_use]
pub fn is_readable_file(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => File::open(path).is_ok(),
        _ => false,
    }
}

/// Write `bytes` to `path` through a sibling temp file that is persisted over it.
///
/// The target holds either the old or the new contents, never a partial write.
/// The temp file is removed if any step fails.
///
/// # Errors
/// Returns an error if the temp file cannot be created, written or persisted.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    // Same directory keeps the final rename on one filesystem
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
