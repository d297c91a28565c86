//! Error taxonomy for resize jobs.
//!
//! Every failure a job can report is one of six kinds. Construction can fail
//! with `InvalidArgument`, `UnrecognizedFormat`, `IoFailure` or `Processing`;
//! emission can fail with any of them except `InvalidArgument` and
//! `UnrecognizedFormat`.

use std::io;

use thiserror::Error;

use crate::encode::EncodeError;

/// Discriminant of an [`OilError`], for hosts that classify failures without
/// inspecting the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    UnrecognizedFormat,
    IoFailure,
    NotInitialized,
    AlreadyEmitted,
    Processing,
}

/// Errors reported by [`ImageJob`](crate::ImageJob) and the pipeline stages.
#[derive(Debug, Error)]
pub enum OilError {
    /// A requested or reported dimension was below one pixel.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No registered decoder claimed the input stream.
    #[error("Unrecognized image format")]
    UnrecognizedFormat,

    /// The underlying stream failed while being read.
    #[error("I/O failure: {0}")]
    IoFailure(#[source] io::Error),

    /// The terminal operation was called on a job that holds no decoder.
    #[error("Job is not initialized")]
    NotInitialized,

    /// The terminal operation was called a second time.
    #[error("Output has already been emitted")]
    AlreadyEmitted,

    /// Decoding, resampling or encoding failed after the format was detected.
    #[error("Processing failed: {0}")]
    Processing(String),
}

impl OilError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            OilError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            OilError::UnrecognizedFormat => ErrorKind::UnrecognizedFormat,
            OilError::IoFailure(_) => ErrorKind::IoFailure,
            OilError::NotInitialized => ErrorKind::NotInitialized,
            OilError::AlreadyEmitted => ErrorKind::AlreadyEmitted,
            OilError::Processing(_) => ErrorKind::Processing,
        }
    }

    /// True for failures caused by misuse of the API rather than by the input.
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidArgument | ErrorKind::NotInitialized | ErrorKind::AlreadyEmitted
        )
    }
}

impl From<io::Error> for OilError {
    fn from(err: io::Error) -> Self {
        OilError::IoFailure(err)
    }
}

impl From<image::ImageError> for OilError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => OilError::IoFailure(e),
            other => OilError::Processing(other.to_string()),
        }
    }
}

impl From<EncodeError> for OilError {
    fn from(err: EncodeError) -> Self {
        OilError::Processing(err.to_string())
    }
}
