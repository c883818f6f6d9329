//! PNG export: flatten the view, encode it and write it to the cache
//! directory, all on a worker thread.

use futures::channel::oneshot;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::raster::{self, RasterError, ViewSnapshot};
use crate::util::time;

pub const PNG_MIME: &str = "image/png";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cache directory not available")]
    CacheDirUnavailable,
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
    #[error("Export worker stopped before reporting a result")]
    WorkerLost,
}

impl ExportError {
    /// Text shown to the user in a toast.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::CacheDirUnavailable => "Cache directory not available!",
            _ => "Something went wrong while saving the file.",
        }
    }
}

pub type ExportResult = Result<PathBuf, ExportError>;

pub fn export_file_name(prefix: &str, millis: u128) -> String {
    format!("{}_{}.png", prefix, millis)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encodes `image` and writes it into `dir` under a timestamped name.
///
/// On failure nothing is left behind: a partially written file is removed.
pub fn write_png(image: &RgbaImage, dir: &Path, prefix: &str) -> ExportResult {
    let bytes = encode_png(image)?;
    std::fs::create_dir_all(dir)?;

    let path = dir.join(export_file_name(prefix, time::timestamp_millis()));
    if let Err(err) = std::fs::write(&path, &bytes) {
        if path.exists() {
            if let Err(cleanup) = std::fs::remove_file(&path) {
                log::warn!("Could not remove partial export {}: {}", path.display(), cleanup);
            }
        }
        return Err(err.into());
    }

    log::info!("Saved drawing to {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// A PNG export running on its own thread.
#[derive(Debug)]
pub struct ExportJob {
    receiver: oneshot::Receiver<ExportResult>,
}

impl ExportJob {
    /// Flattens `snapshot` and writes it as a PNG into `dir` off the UI thread.
    pub fn spawn(
        snapshot: ViewSnapshot,
        dir: Option<PathBuf>,
        prefix: String,
    ) -> Result<Self, ExportError> {
        let dir = dir.ok_or(ExportError::CacheDirUnavailable)?;
        let (sender, receiver) = oneshot::channel();

        std::thread::Builder::new()
            .name("png-export".to_owned())
            .spawn(move || {
                let result = raster::flatten(&snapshot)
                    .map_err(ExportError::from)
                    .and_then(|image| write_png(&image, &dir, &prefix));
                if let Err(err) = &result {
                    log::error!("Export failed: {}", err);
                }
                // The UI may already be gone; nothing to do then.
                let _ = sender.send(result);
            })?;

        Ok(Self { receiver })
    }

    /// Non-blocking check for the worker's result.
    pub fn poll(&mut self) -> Option<ExportResult> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(ExportError::WorkerLost)),
        }
    }
}

/// `Idle → Exporting → Done | Failed`
#[derive(Debug, Default)]
pub enum ExportState {
    #[default]
    Idle,
    Exporting(ExportJob),
    Done(PathBuf),
    Failed(String),
}

impl ExportState {
    pub fn is_exporting(&self) -> bool {
        matches!(self, ExportState::Exporting(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportState::Idle => "Idle",
            ExportState::Exporting(_) => "Exporting",
            ExportState::Done(_) => "Done",
            ExportState::Failed(_) => "Failed",
        }
    }
}
