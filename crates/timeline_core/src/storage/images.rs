//! Image import into a project's picture folder.
//!
//! # Invariants
//! - An existing picture is never overwritten by a different file.
//! - Re-importing a byte-identical file reuses the existing copy.

use super::{StorageError, StorageResult, PICTURES_DIR_NAME};
use log::{debug, info};
use std::ffi::OsStr;
use std::fs;
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};

const MAX_NAME_SUFFIX: u32 = 10_000;

pub(super) fn import_into(pictures_dir: &Path, source: &Path) -> StorageResult<String> {
    let import_error = |cause: IoError| StorageError::ImageImport {
        file: source.to_path_buf(),
        source: cause,
    };

    let metadata = fs::metadata(source).map_err(import_error)?;
    if !metadata.is_file() {
        return Err(import_error(IoError::new(
            ErrorKind::InvalidInput,
            "source is not a regular file",
        )));
    }
    // The stored path goes into the JSON document, so the name must be
    // UTF-8 before anything is written.
    let file_name = match source.file_name() {
        Some(name) => name.to_str().ok_or_else(|| {
            import_error(IoError::new(ErrorKind::InvalidData, "file name is not UTF-8"))
        })?,
        None => {
            return Err(import_error(IoError::new(
                ErrorKind::InvalidInput,
                "source has no file name",
            )))
        }
    };

    fs::create_dir_all(pictures_dir).map_err(import_error)?;
    let source_bytes = fs::read(source).map_err(import_error)?;

    let (destination, stored_name) = pick_destination(pictures_dir, file_name, &source_bytes)
        .ok_or_else(|| import_error(IoError::new(ErrorKind::AlreadyExists, "no free file name")))?;

    if destination.exists() {
        debug!(
            "event=image_import module=storage status=reused path={}",
            destination.display()
        );
    } else {
        fs::write(&destination, &source_bytes).map_err(import_error)?;
        info!(
            "event=image_import module=storage status=ok bytes={} path={}",
            source_bytes.len(),
            destination.display()
        );
    }
    Ok(format!("{PICTURES_DIR_NAME}/{stored_name}"))
}

/// Finds `name`, `name-1`, `name-2`, ... that is either free or already
/// holds identical bytes.
fn pick_destination(dir: &Path, file_name: &str, bytes: &[u8]) -> Option<(PathBuf, String)> {
    let original = Path::new(file_name);
    let stem = original.file_stem().and_then(OsStr::to_str).unwrap_or("image");
    let extension = original.extension().and_then(OsStr::to_str);

    for suffix in 0..MAX_NAME_SUFFIX {
        let name = match (suffix, extension) {
            (0, _) => file_name.to_string(),
            (_, Some(ext)) => format!("{stem}-{suffix}.{ext}"),
            (_, None) => format!("{stem}-{suffix}"),
        };
        let candidate = dir.join(&name);
        match fs::read(&candidate) {
            Ok(existing) if existing == bytes => return Some((candidate, name)),
            Ok(_) => continue,
            Err(err) if err.kind() == ErrorKind::NotFound => return Some((candidate, name)),
            Err(_) => continue,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::import_into;
    use std::fs;

    #[test]
    fn clashing_names_get_numeric_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let pictures = dir.path().join("pictures");
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("map.png"), b"first").unwrap();
        fs::write(b.join("map.png"), b"second").unwrap();

        assert_eq!(import_into(&pictures, &a.join("map.png")).unwrap(), "pictures/map.png");
        assert_eq!(import_into(&pictures, &b.join("map.png")).unwrap(), "pictures/map-1.png");
        assert_eq!(import_into(&pictures, &a.join("map.png")).unwrap(), "pictures/map.png");
        assert_eq!(fs::read(pictures.join("map-1.png")).unwrap(), b"second");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_is_rejected_before_copying() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let pictures = dir.path().join("pictures");
        let source = dir.path().join(OsStr::from_bytes(b"caf\xe9.png"));
        fs::write(&source, b"bytes").unwrap();

        let err = import_into(&pictures, &source).unwrap_err();
        assert!(matches!(err, crate::storage::StorageError::ImageImport { .. }));
        let copied = fs::read_dir(&pictures).map(|entries| entries.count()).unwrap_or(0);
        assert_eq!(copied, 0);
    }
}
