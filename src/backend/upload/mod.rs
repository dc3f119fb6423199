//! Upload Module
//!
//! Image uploads for business logos and product photos.
//!
//! # Pipeline
//!
//! 1. Check the client filename's extension (`png` or `jpg`)
//! 2. Resolve the target record and check the caller owns it
//! 3. Decode, resize to a fixed square, re-encode and write with a random name
//! 4. Store the filename on the record; remove the file if that fails
//!
//! Decoding and resizing run on the blocking thread pool.

pub mod error;
pub mod handlers;
pub mod storage;

pub use error::UploadError;
pub use handlers::{upload_business_logo, upload_product_image, UploadResponse};
pub use storage::{ImageExtension, ImageStore};
