//! Format detection for resize jobs.
//!
//! This module provides functionality for:
//! - Wrapping a forward-only stream in a seekable in-memory cache
//! - Probing the stream's signature to pick a decoder (JPEG or PNG)
//! - Reading native dimensions from the header before any pixel data
//!
//! # Architecture
//!
//! Detection happens once, when a job is constructed. The decoder it returns
//! stays bound to the cached input, so the later full decode continues from
//! where the header parse stopped and never re-probes the stream.
//!
//! # Examples
//!
//! ```ignore
//! use oil_core::decode::detect;
//!
//! let file = std::fs::File::open("photo.jpg").unwrap();
//! let decoder = detect(file, 8192).unwrap();
//! println!("{} image, {:?}", decoder.format(), decoder.dimensions());
//! ```

mod detect;
mod input;
mod types;

pub use detect::{detect, SourceDecoder};
pub use input::CachedInput;
pub use types::ImageFormat;
