// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Camera capture controller.
//!
//! Manages the single live media stream used for document and selfie
//! capture. The lifecycle contract is strict: each `start` is followed
//! by exactly one `capture` or one `stop` before another `start` is
//! valid, the controller never holds more than one live stream, and
//! the stream is deterministically released on every path, error
//! paths included.

use platform::media::{
    CapturedFrame, MediaDevice, MediaStream, StreamConstraints, CAPTURE_JPEG_QUALITY,
};
use platform::Error as PlatformError;
use thiserror::Error;

/// Error type for the capture controller.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// `start` was called while a stream is live.
    #[error("a capture stream is already live")]
    StreamActive,

    /// `capture` was called with no live stream.
    #[error("no capture stream has been started")]
    NotStarted,

    /// The platform refused or lost the stream. Recoverable: the
    /// caller decides whether to re-prompt.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/**
 * Owns the live preview stream and produces still-image artifacts.
 *
 * The stream is owned exclusively and never aliased; dropping the
 * controller stops any stream still live.
 */
#[derive(Debug)]
pub struct CaptureController<S: MediaStream> {
    stream: Option<S>,
}

impl<S: MediaStream> CaptureController<S> {
    pub fn new() -> Self {
        Self { stream: None }
    }

    /// Whether a preview stream is currently live.
    pub fn is_previewing(&self) -> bool {
        self.stream.as_ref().is_some_and(MediaStream::is_live)
    }

    /**
     * Requests a user-facing stream and binds it as the live preview.
     *
     * On denial the error is surfaced unchanged; there is no retry
     * loop here. Starting while a stream is live is a sequencing
     * error.
     */
    pub fn start<D>(&mut self, device: &D, constraints: &StreamConstraints) -> Result<(), CaptureError>
    where
        D: MediaDevice<Stream = S>,
    {
        if self.is_previewing() {
            return Err(CaptureError::StreamActive);
        }

        self.stream = Some(device.open(constraints)?);
        tracing::debug!("capture preview started");
        Ok(())
    }

    /**
     * Snapshots the current frame, encoded at [`CAPTURE_JPEG_QUALITY`],
     * and hands the artifact to `consumer`.
     *
     * The stream is stopped before the consumer runs, so the hardware
     * is released even if the consumer panics, and a second capture
     * from the same `start` is impossible. A frame-grab failure also
     * stops the stream.
     */
    pub fn capture<F>(&mut self, consumer: F) -> Result<(), CaptureError>
    where
        F: FnOnce(CapturedFrame),
    {
        let mut stream = self.stream.take().ok_or(CaptureError::NotStarted)?;

        let grabbed = stream.grab_frame(CAPTURE_JPEG_QUALITY);
        stream.stop();

        let frame = grabbed?;
        tracing::debug!(width = frame.width, height = frame.height, "frame captured");
        consumer(frame);
        Ok(())
    }

    /**
     * Halts every track of the active stream and detaches it.
     *
     * Idempotent: calling `stop` with no live stream is a no-op. Safe
     * at any point after `start`, including mid-preview.
     */
    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!("capture preview stopped");
        }
    }
}

impl<S: MediaStream> Default for CaptureController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MediaStream> Drop for CaptureController<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
