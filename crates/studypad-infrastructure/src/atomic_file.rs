//! Atomic file writes.
//!
//! Updates are all-or-nothing via tmp file + fsync + atomic rename. There is
//! no file locking: concurrent writers from another process are
//! last-writer-wins, which the storage contracts document as intended.

use std::fs::{self, File};
use std::io::{self, Write as IoWrite};
use std::path::Path;

/// Writes `contents` to `path` atomically, creating parent directories as
/// needed.
///
/// The data is first written to a sibling `.tmp` file, flushed to disk, and
/// then renamed over the destination, so readers observe either the old or
/// the new content, never a mix.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp = File::create(&tmp_path)?;
    tmp.write_all(contents)?;
    tmp.sync_all()?;
    drop(tmp);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("value.json");

        write_atomic(&path, b"first").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"first");

        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn leaves_no_tmp_file_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("value.json");
        write_atomic(&path, b"data").unwrap();
        assert!(!path.with_extension("tmp").exists());
    }
}
