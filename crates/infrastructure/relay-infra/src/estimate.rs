use relay_core::{round2, TransferUnit};
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Size contribution of one entry found while walking a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySize {
    Present(u64),
    /// Removed between enumeration and the metadata read.
    Vanished,
    /// Exists but could not be read (permissions, I/O).
    Inaccessible,
}

impl EntrySize {
    pub fn bytes(self) -> u64 {
        match self {
            EntrySize::Present(n) => n,
            EntrySize::Vanished | EntrySize::Inaccessible => 0,
        }
    }
}

fn measure(path: &Path) -> EntrySize {
    match std::fs::metadata(path) {
        Ok(meta) => EntrySize::Present(meta.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => EntrySize::Vanished,
        Err(e) => {
            debug!("not counting {}: {}", path.display(), e);
            EntrySize::Inaccessible
        }
    }
}

/// Expected transfer size of `path` in `unit`.
///
/// Directories are walked recursively and the total is rounded to a whole unit;
/// single files are rounded to 2 decimals. Only a failure on `path` itself is
/// an error; anything unreadable below it counts as zero.
pub fn estimate(path: &Path, unit: TransferUnit) -> io::Result<f64> {
    if path.is_dir() {
        let mut total = 0u64;
        for entry in WalkDir::new(path).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };
            total = total.saturating_add(measure(entry.path()).bytes());
        }
        Ok((total as f64 / unit.multiplier()).round())
    } else {
        let len = std::fs::metadata(path)?.len();
        Ok(round2(len as f64 / unit.multiplier()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanished_entries_contribute_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone.bin");
        assert_eq!(measure(&gone), EntrySize::Vanished);
        assert_eq!(EntrySize::Vanished.bytes(), 0);
        assert_eq!(EntrySize::Inaccessible.bytes(), 0);
    }

    #[test]
    fn single_file_rounds_to_two_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.bin");
        std::fs::write(&file, vec![0u8; 1_234_567]).unwrap();
        assert_eq!(estimate(&file, TransferUnit::Bytes).unwrap(), 1_234_567.0);
        assert_eq!(estimate(&file, TransferUnit::Megabytes).unwrap(), 1.23);
    }
}
