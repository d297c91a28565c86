//! Oil Core - aspect-fit image resizing
//!
//! This crate resizes a JPEG or PNG stream to fit inside a bounding box and
//! re-encodes it in the same format. A resize is an [`ImageJob`]: building
//! one detects the format and reads the header, and [`ImageJob::emit`] does
//! the decode, resample and encode and hands the bytes to a callback, once.
//!
//! # Module Structure
//!
//! - `decode` - seekable stream cache, format detection, decoder binding
//! - `fit` - aspect-preserving output dimensions
//! - `resample` - smooth resampling and alpha flattening
//! - `encode` - JPEG and PNG encoders
//! - `job` - the run-once job lifecycle
//!
//! # Usage
//!
//! ```ignore
//! use oil_core::ImageJob;
//!
//! let input = std::io::stdin().lock();
//! let mut job = ImageJob::new(input, 200, 200)?;
//! job.emit(|bytes| {
//!     use std::io::Write;
//!     std::io::stdout().write_all(&bytes).unwrap();
//! })?;
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod fit;
pub mod job;
pub mod options;
pub mod resample;

#[cfg(test)]
mod testing;

pub use decode::ImageFormat;
pub use error::{ErrorKind, OilError};
pub use fit::fit;
pub use job::{resize_bytes, ImageJob, JobState};
pub use options::{FilterType, PngCompression, ResizeOptions};
