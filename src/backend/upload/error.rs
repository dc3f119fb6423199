/**
 * Upload Errors
 */

use thiserror::Error;

/// Failures in the image pipeline
#[derive(Debug, Error)]
pub enum UploadError {
    /// The uploaded bytes are not a readable image
    #[error("Invalid image file: {0}")]
    Decode(#[source] image::ImageError),

    /// Re-encoding the resized image failed
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// Writing or removing the file failed
    #[error("Image storage failed: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking resize task panicked or was cancelled
    #[error("Image task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl UploadError {
    /// True when the client sent something we cannot process
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
