//! Zip packaging and owner-only file creation

use crate::ExportError;
use log::warn;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Create a new file readable only by the current user.
///
/// Never opens an existing file: earlier exports hold the only copy of their
/// keys.
pub(crate) fn create_private(path: &Path) -> Result<File, ExportError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => ExportError::AlreadyExists(path.to_path_buf()),
        _ => ExportError::io(path, e),
    })
}

/// Deflate `files` into a new archive at `archive`, each stored under its
/// bare file name. A partially written archive is removed on failure.
pub(crate) fn write_zip(archive: &Path, files: &[PathBuf]) -> Result<(), ExportError> {
    let file = create_private(archive)?;
    let result = fill_zip(file, files);
    if result.is_err() {
        if let Err(e) = std::fs::remove_file(archive) {
            warn!("Failed to remove partial archive {}: {}", archive.display(), e);
        }
    }
    result
}

fn fill_zip(file: File, files: &[PathBuf]) -> Result<(), ExportError> {
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o600);

    for path in files {
        let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
            ExportError::io(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "file name is not valid UTF-8"),
            )
        })?;
        zip.start_file(name, options)?;
        let mut input = File::open(path).map_err(|e| ExportError::io(path, e))?;
        io::copy(&mut input, &mut zip).map_err(|e| ExportError::io(path, e))?;
    }

    zip.finish()?;
    Ok(())
}
