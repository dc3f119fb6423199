/**
 * Image Store
 *
 * Validates upload filenames, resizes accepted images to a fixed square and
 * writes them under the static images directory with a random name.
 */

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::error::UploadError;

/// Length of the random part of a stored filename
pub const GENERATED_NAME_LEN: usize = 20;

/// Image types accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageExtension {
    Png,
    Jpg,
}

impl ImageExtension {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpg => ImageFormat::Jpeg,
        }
    }

    /// Check a client filename against the allowed set
    ///
    /// The extension is everything after the last `.`, compared
    /// case-insensitively. A name without a `.` is rejected.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            _ => None,
        }
    }
}

/// Where uploaded images live and how they are addressed
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    size: u32,
    public_base_url: String,
}

impl ImageStore {
    /// # Arguments
    /// * `dir` - Directory the images are written to
    /// * `size` - Edge length of the stored square images
    /// * `public_base_url` - Prefix for returned URLs, without a trailing slash
    pub fn new(dir: impl Into<PathBuf>, size: u32, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            size,
            public_base_url: public_base_url.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Public URL of a stored image
    pub fn url_for(&self, name: &str) -> String {
        format!("{}/static/images/{}", self.public_base_url, name)
    }

    /// Random lowercase-hex filename with the given extension
    pub fn generate_filename(ext: ImageExtension) -> String {
        let mut name = Uuid::new_v4().simple().to_string();
        name.truncate(GENERATED_NAME_LEN);
        format!("{}.{}", name, ext.as_str())
    }

    /// Decode, resize and store an uploaded image
    ///
    /// The format is guessed from the bytes; the output format follows `ext`.
    ///
    /// # Returns
    /// The generated filename (not the full path)
    ///
    /// # Errors
    /// * `UploadError::Decode` - The bytes are not an image
    /// * `UploadError::Io` - The file could not be written
    pub async fn save(&self, bytes: Vec<u8>, ext: ImageExtension) -> Result<String, UploadError> {
        let size = self.size;
        let encoded =
            tokio::task::spawn_blocking(move || resize_and_encode(&bytes, size, ext)).await??;

        tokio::fs::create_dir_all(&self.dir).await?;

        let name = Self::generate_filename(ext);
        tokio::fs::write(self.path_for(&name), encoded).await?;

        tracing::debug!("Stored image {} ({}x{})", name, size, size);
        Ok(name)
    }

    /// Delete a stored image, logging instead of failing
    pub async fn remove(&self, name: &str) {
        if let Err(e) = tokio::fs::remove_file(self.path_for(name)).await {
            tracing::warn!("Failed to remove image {}: {}", name, e);
        }
    }
}

fn resize_and_encode(bytes: &[u8], size: u32, ext: ImageExtension) -> Result<Vec<u8>, UploadError> {
    let img = image::load_from_memory(bytes).map_err(UploadError::Decode)?;
    let resized = img.resize_exact(size, size, FilterType::Lanczos3);

    // JPEG has no alpha channel
    let resized = match ext {
        ImageExtension::Jpg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        ImageExtension::Png => resized,
    };

    let mut out = Cursor::new(Vec::new());
    resized
        .write_to(&mut out, ext.format())
        .map_err(UploadError::Encode)?;
    Ok(out.into_inner())
}
