//! Writes exported images to a directory.

use crate::{AppResult, io_error};
use chrono::{DateTime, Utc};
use inkslate_render::{ExportFormat, ExportedImage};
use std::path::{Path, PathBuf};

/// `whiteboard-<ISO-8601 timestamp with ':' and '.' replaced by '-'>.<ext>`
pub fn export_filename(timestamp: DateTime<Utc>, format: ExportFormat) -> String {
    format!(
        "whiteboard-{}.{}",
        timestamp.format("%Y-%m-%dT%H-%M-%S-%3fZ"),
        format.extension()
    )
}

#[derive(Debug, Clone)]
pub struct FileExportSink {
    dir: PathBuf,
}

impl FileExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `image` under a timestamped name and return its path.
    pub fn write(&self, image: &ExportedImage, timestamp: DateTime<Utc>) -> AppResult<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.dir.join(export_filename(timestamp, image.format));
        std::fs::write(&path, &image.bytes).map_err(io_error(&path))?;
        log::info!(
            "saved {} ({}x{}, {} bytes)",
            path.display(),
            image.width,
            image.height,
            image.bytes.len()
        );
        Ok(path)
    }
}
