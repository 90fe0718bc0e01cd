//! Active project pointer file.

use super::{io_error, StorageResult, ACTIVE_POINTER_FILE_NAME};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

fn pointer_path(root: &Path) -> PathBuf {
    root.join(ACTIVE_POINTER_FILE_NAME)
}

pub(super) fn read_pointer(root: &Path) -> Option<String> {
    let path = pointer_path(root);
    match fs::read_to_string(&path) {
        Ok(text) => {
            let name = text.trim();
            (!name.is_empty()).then(|| name.to_string())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!(
                "event=pointer_read module=storage status=error path={} error={}",
                path.display(),
                err
            );
            None
        }
    }
}

pub(super) fn write_pointer(root: &Path, name: &str) -> StorageResult<()> {
    fs::create_dir_all(root).map_err(io_error(root))?;
    let path = pointer_path(root);
    fs::write(&path, name).map_err(io_error(&path))
}

pub(super) fn clear_pointer(root: &Path) -> StorageResult<()> {
    let path = pointer_path(root);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(io_error(&path)(err)),
    }
}
