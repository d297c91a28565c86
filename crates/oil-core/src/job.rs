//! The resize job: one input stream, one bounding box, one emission.
//!
//! A job does all of its fallible header work when it is built: the format is
//! detected, native dimensions are read and the output size is fitted. The
//! pixel work happens in [`ImageJob::emit`], which can succeed at most once.
//!
//! # Lifecycle
//!
//! ```text
//! new() --ok--> Ready --emit ok--> Emitted
//!                 |
//!                 +--emit err--> Failed
//! ```
//!
//! `emit` takes `&mut self`, so two threads can never race on the run-once
//! check for a single job. Separate jobs share nothing and can run on
//! separate threads.

use std::io::Read;

use image::Limits;

use crate::decode::{detect, CachedInput, ImageFormat, SourceDecoder};
use crate::encode::encode_rgb;
use crate::fit::fit;
use crate::options::ResizeOptions;
use crate::resample::{resample, resample_footprint};
use crate::OilError;

/// Where a job is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// The job does not hold a decoder. Only observable if a previous
    /// emission unwound before it finished.
    Uninitialized,
    /// Constructed and waiting for `emit`.
    Ready,
    /// Output was delivered to the consumer.
    Emitted,
    /// Emission was attempted and failed; the input is spent.
    Failed,
}

enum Stage<R: Read> {
    Uninitialized,
    Ready(SourceDecoder<CachedInput<R>>),
    Emitted,
    Failed,
}

/// A single resize of one encoded image into a bounding box.
///
/// # Example
///
/// ```ignore
/// use oil_core::ImageJob;
///
/// let file = std::fs::File::open("photo.jpg")?;
/// let mut job = ImageJob::new(file, 320, 240)?;
/// println!("source is {}x{}", job.native_width(), job.native_height());
///
/// job.emit(|bytes| std::fs::write("thumb.jpg", bytes).unwrap())?;
/// ```
pub struct ImageJob<R: Read> {
    stage: Stage<R>,
    format: ImageFormat,
    native_width: u32,
    native_height: u32,
    requested_width: u32,
    requested_height: u32,
    final_width: u32,
    final_height: u32,
    options: ResizeOptions,
}

impl<R: Read> ImageJob<R> {
    /// Bind `stream` and prepare to fit it into `requested_width` x
    /// `requested_height`, using default options.
    ///
    /// # Errors
    ///
    /// - `OilError::InvalidArgument` if either requested dimension is zero
    ///   (checked before the stream is touched)
    /// - `OilError::UnrecognizedFormat` if the stream is not JPEG or PNG
    /// - `OilError::IoFailure` if the stream fails while the header is read
    /// - `OilError::Processing` if a JPEG or PNG header is corrupt, or if the
    ///   fitted output is too large to resample within the decoder's
    ///   allocation limit
    pub fn new(stream: R, requested_width: u32, requested_height: u32) -> Result<Self, OilError> {
        Self::with_options(
            stream,
            requested_width,
            requested_height,
            ResizeOptions::default(),
        )
    }

    /// Like [`ImageJob::new`], with explicit options.
    pub fn with_options(
        stream: R,
        requested_width: u32,
        requested_height: u32,
        options: ResizeOptions,
    ) -> Result<Self, OilError> {
        if requested_width == 0 || requested_height == 0 {
            return Err(OilError::InvalidArgument(format!(
                "dimensions must be > 0, got {}x{}",
                requested_width, requested_height
            )));
        }

        let decoder = detect(stream, options.buffer_size)?;
        let format = decoder.format();
        let (native_width, native_height) = decoder.dimensions();
        let (final_width, final_height) =
            fit(native_width, native_height, requested_width, requested_height).map_err(
                |_| {
                    OilError::Processing(format!(
                        "decoder reported empty image {}x{}",
                        native_width, native_height
                    ))
                },
            )?;

        let footprint = resample_footprint(native_width, final_width, final_height);
        if let Some(max_alloc) = Limits::default().max_alloc {
            if footprint > max_alloc {
                return Err(OilError::Processing(format!(
                    "resizing {}x{} to {}x{} needs {} bytes, over the {} byte limit",
                    native_width, native_height, final_width, final_height, footprint, max_alloc
                )));
            }
        }

        tracing::debug!(
            %format,
            native_width,
            native_height,
            requested_width,
            requested_height,
            final_width,
            final_height,
            "resize job ready"
        );

        Ok(Self {
            stage: Stage::Ready(decoder),
            format,
            native_width,
            native_height,
            requested_width,
            requested_height,
            final_width,
            final_height,
            options,
        })
    }

    /// Decode, resample and encode, then hand the encoded bytes to `consumer`.
    ///
    /// The consumer is called exactly once on success and never on failure.
    /// Whatever the outcome, the job is spent afterwards.
    ///
    /// # Errors
    ///
    /// - `OilError::AlreadyEmitted` if `emit` was already called
    /// - `OilError::NotInitialized` if the job holds no decoder
    /// - `OilError::IoFailure` if the stream fails during the pixel read
    /// - `OilError::Processing` if decoding, resampling or encoding fails
    pub fn emit<F>(&mut self, consumer: F) -> Result<(), OilError>
    where
        F: FnOnce(Vec<u8>),
    {
        let decoder = match std::mem::replace(&mut self.stage, Stage::Uninitialized) {
            Stage::Ready(decoder) => decoder,
            Stage::Uninitialized => return Err(OilError::NotInitialized),
            spent @ (Stage::Emitted | Stage::Failed) => {
                self.stage = spent;
                return Err(OilError::AlreadyEmitted);
            }
        };

        match self.render(decoder) {
            Ok(bytes) => {
                tracing::debug!(
                    format = %self.format,
                    width = self.final_width,
                    height = self.final_height,
                    bytes = bytes.len(),
                    "emitting resized image"
                );
                self.stage = Stage::Emitted;
                consumer(bytes);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "resize job failed");
                self.stage = Stage::Failed;
                Err(e)
            }
        }
    }

    /// Convenience wrapper around [`ImageJob::emit`] that returns the bytes.
    pub fn into_bytes(mut self) -> Result<Vec<u8>, OilError> {
        let mut output = Vec::new();
        self.emit(|bytes| output = bytes)?;
        Ok(output)
    }

    fn render(&self, decoder: SourceDecoder<CachedInput<R>>) -> Result<Vec<u8>, OilError> {
        let image = decoder.decode()?;
        let rgb = resample(
            image,
            self.final_width,
            self.final_height,
            self.options.filter,
            self.options.background,
        )?;
        Ok(encode_rgb(&rgb, self.format, &self.options)?)
    }

    /// Intrinsic width of the source image.
    pub fn native_width(&self) -> u32 {
        self.native_width
    }

    /// Intrinsic height of the source image.
    pub fn native_height(&self) -> u32 {
        self.native_height
    }

    /// Width of the bounding box passed at construction.
    pub fn requested_width(&self) -> u32 {
        self.requested_width
    }

    /// Height of the bounding box passed at construction.
    pub fn requested_height(&self) -> u32 {
        self.requested_height
    }

    /// Width of the emitted image.
    pub fn final_width(&self) -> u32 {
        self.final_width
    }

    /// Height of the emitted image.
    pub fn final_height(&self) -> u32 {
        self.final_height
    }

    /// Detected source format, which is also the output format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Options the job emits with.
    pub fn options(&self) -> &ResizeOptions {
        &self.options
    }

    /// Current lifecycle state.
    pub fn state(&self) -> JobState {
        match self.stage {
            Stage::Uninitialized => JobState::Uninitialized,
            Stage::Ready(_) => JobState::Ready,
            Stage::Emitted => JobState::Emitted,
            Stage::Failed => JobState::Failed,
        }
    }

    /// True once `emit` has run, whether it succeeded or not.
    pub fn is_emitted(&self) -> bool {
        matches!(self.stage, Stage::Emitted | Stage::Failed)
    }
}

impl<R: Read> std::fmt::Debug for ImageJob<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageJob")
            .field("state", &self.state())
            .field("format", &self.format)
            .field("native", &(self.native_width, self.native_height))
            .field("requested", &(self.requested_width, self.requested_height))
            .field("final", &(self.final_width, self.final_height))
            .finish()
    }
}

/// Resize an in-memory image into the given box and return the encoded bytes.
pub fn resize_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
    options: &ResizeOptions,
) -> Result<Vec<u8>, OilError> {
    ImageJob::with_options(bytes, width, height, options.clone())?.into_bytes()
}
