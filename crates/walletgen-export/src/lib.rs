//! Walletgen Export
//!
//! Writes a generated batch to disk as a single zip archive.
//!
//! # Layout
//!
//! For a batch of `count` wallets per network generated on 19 October 2026:
//! - `{count}_wallets_19-10-2026.csv`: header plus one row per record
//! - `{count}_wallets_19-10-2026.txt`: the same rows as a fixed-width table
//! - `{count}_wallets_19-10-2026.zip`: both of the above, deflated
//!
//! The uncompressed files are removed once archived (or if archiving fails)
//! unless [`ExportConfig::keep_intermediate`] is set. All files are created
//! owner-readable only, and an export never overwrites an existing file: a
//! second batch with the same count on the same day fails with
//! [`ExportError::AlreadyExists`].
//!
//! # Example
//!
//! ```ignore
//! use walletgen_export::{export_batch, ExportConfig};
//!
//! let artifact = export_batch(&output.records, count, &ExportConfig::default())?;
//! println!("Saved to {}", artifact.archive.display());
//! ```

mod archive;
mod config;
pub mod render;

pub use config::{ExportConfig, ExportFormat};

use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walletgen_core::WalletRecord;

/// Errors from export operations
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: the batch produced no records")]
    EmptyBatch,

    #[error("No export formats configured")]
    NoFormats,

    #[error("{} already exists; move it away or choose another output directory", .0.display())]
    AlreadyExists(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl ExportError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What an export left on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// The zip archive
    pub archive: PathBuf,
    /// Uncompressed files still present (empty unless kept)
    pub kept: Vec<PathBuf>,
    /// Number of records written
    pub record_count: usize,
}

/// `{count}_wallets_{dd-mm-YYYY}`
pub fn base_name(count: u32, date: NaiveDate) -> String {
    format!("{}_wallets_{}", count, date.format("%d-%m-%Y"))
}

/// Export with today's local date in the file names.
pub fn export_batch(
    records: &[WalletRecord],
    count: u32,
    config: &ExportConfig,
) -> Result<ExportArtifact, ExportError> {
    export_batch_on(records, count, Local::now().date_naive(), config)
}

/// Export with an explicit date in the file names.
pub fn export_batch_on(
    records: &[WalletRecord],
    count: u32,
    date: NaiveDate,
    config: &ExportConfig,
) -> Result<ExportArtifact, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyBatch);
    }
    if config.formats.is_empty() {
        return Err(ExportError::NoFormats);
    }

    let dir = &config.output_dir;
    std::fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;

    let base = base_name(count, date);
    let archive_path = dir.join(format!("{}.zip", base));
    let targets = std::iter::once(archive_path.clone()).chain(
        config
            .formats
            .iter()
            .map(|format| dir.join(format!("{}.{}", base, format.extension()))),
    );
    for target in targets {
        if target.exists() {
            return Err(ExportError::AlreadyExists(target));
        }
    }

    let mut written = Vec::with_capacity(config.formats.len());
    let outcome = write_intermediates(records, config, &base, &mut written)
        .and_then(|()| archive::write_zip(&archive_path, &written));

    if outcome.is_err() || !config.keep_intermediate {
        remove_all(&written);
    }

    outcome?;
    info!(
        "Exported {} record(s) to {}",
        records.len(),
        archive_path.display()
    );
    Ok(ExportArtifact {
        archive: archive_path,
        kept: if config.keep_intermediate { written } else { Vec::new() },
        record_count: records.len(),
    })
}

fn write_intermediates(
    records: &[WalletRecord],
    config: &ExportConfig,
    base: &str,
    written: &mut Vec<PathBuf>,
) -> Result<(), ExportError> {
    for &format in &config.formats {
        let path = config
            .output_dir
            .join(format!("{}.{}", base, format.extension()));
        if written.contains(&path) {
            continue;
        }

        let file = archive::create_private(&path)?;
        written.push(path.clone());
        match format {
            ExportFormat::Csv => render::write_csv(records, file)?,
            ExportFormat::Txt => {
                let table = render::render_table(records);
                let mut file = file;
                file.write_all(table.as_bytes())
                    .and_then(|()| file.flush())
                    .map_err(|e| ExportError::io(&path, e))?;
            }
        }
        debug!("Wrote {}", path.display());
    }
    Ok(())
}

fn remove_all(paths: &[PathBuf]) {
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => debug!("Removed {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
        }
    }
}
