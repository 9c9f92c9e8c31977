//! Locates the metadata and raw files of a recording inside one directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::image_pipeline::common::error::{MrawError, Result};
use crate::image_pipeline::metadata::types::MetadataEncoding;

/// Files making up one recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingFiles {
    pub metadata: PathBuf,
    pub encoding: MetadataEncoding,
    pub raw: PathBuf,
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Scans `dir` (not recursively) for a `.cih`/`.cihx` metadata file and a
/// `.mraw` raw file. When several candidates exist the first in path order wins.
pub fn discover<P: AsRef<Path>>(dir: P) -> Result<RecordingFiles> {
    let dir = dir.as_ref();

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    let metadata = entries
        .iter()
        .find_map(|path| MetadataEncoding::from_path(path).map(|enc| (path.clone(), enc)));
    let raw = entries.iter().find(|path| has_extension(path, "mraw")).cloned();

    let (metadata, encoding) = metadata.ok_or_else(|| {
        MrawError::MissingFile(format!("no .cih or .cihx file in {}", dir.display()))
    })?;
    let raw = raw.ok_or_else(|| {
        MrawError::MissingFile(format!("no .mraw file in {}", dir.display()))
    })?;

    debug!(
        metadata = %metadata.display(),
        raw = %raw.display(),
        ?encoding,
        "Discovered recording files"
    );

    Ok(RecordingFiles { metadata, encoding, raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovers_files_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rec.CIHX"), b"").unwrap();
        std::fs::write(dir.path().join("rec.MRAW"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let files = discover(dir.path()).unwrap();
        assert_eq!(files.encoding, MetadataEncoding::Cihx);
        assert_eq!(files.metadata, dir.path().join("rec.CIHX"));
        assert_eq!(files.raw, dir.path().join("rec.MRAW"));
    }

    #[test]
    fn test_first_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.cih"), b"").unwrap();
        std::fs::write(dir.path().join("a.cihx"), b"").unwrap();
        std::fs::write(dir.path().join("z.mraw"), b"").unwrap();
        std::fs::write(dir.path().join("y.mraw"), b"").unwrap();

        let files = discover(dir.path()).unwrap();
        assert_eq!(files.metadata, dir.path().join("a.cihx"));
        assert_eq!(files.raw, dir.path().join("y.mraw"));
    }

    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rec.mraw"), b"").unwrap();
        assert!(matches!(discover(dir.path()), Err(MrawError::MissingFile(_))));

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rec.cih"), b"").unwrap();
        assert!(matches!(discover(dir.path()), Err(MrawError::MissingFile(_))));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, MrawError::IoError(_)));
    }
}
