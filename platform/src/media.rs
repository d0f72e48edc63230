// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Camera streams and captured frames.
//!
//! A [`MediaDevice`] opens at most one live [`MediaStream`] at a time
//! for the capture controller, which owns the stream exclusively until
//! it captures a frame or tears the stream down.

use crate::error::Error;

/// JPEG quality the capture controller requests when encoding a
/// captured frame, in [0, 1].
pub const CAPTURE_JPEG_QUALITY: f32 = 0.9;

/**
 * Preferred resolution when requesting a camera stream.
 *
 * The host may grant a different native resolution; captured frames
 * report the dimensions actually delivered.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConstraints {
    /// Preferred frame width in pixels.
    pub width: u32,

    /// Preferred frame height in pixels.
    pub height: u32,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/**
 * A still image captured from a live stream.
 *
 * The frame is JPEG-encoded at the quality requested by the caller
 * and sized to the native dimensions of the video frame it was taken
 * from. The artifact outlives the stream it came from.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    /// JPEG-encoded image bytes.
    pub jpeg: Vec<u8>,

    /// Native frame width in pixels.
    pub width: u32,

    /// Native frame height in pixels.
    pub height: u32,
}

/**
 * A live camera stream.
 *
 * Exactly one of these may be live per capture controller. `stop` must
 * be safe to call at any point after the stream was opened, including
 * on error paths, and must deterministically release the hardware.
 */
pub trait MediaStream {
    /// Snapshots the current video frame and encodes it as JPEG at
    /// `jpeg_quality`, in [0, 1].
    fn grab_frame(&self, jpeg_quality: f32) -> Result<CapturedFrame, Error>;

    /// Halts every track of the stream. Idempotent.
    fn stop(&mut self);

    /// Whether the stream still has live tracks.
    fn is_live(&self) -> bool;
}

/// A camera that can open user-facing video streams.
pub trait MediaDevice {
    /// The stream type this device produces.
    type Stream: MediaStream;

    /// Requests a user-facing stream at the preferred resolution.
    ///
    /// Fails with [`Error::PermissionDenied`] when the user declines
    /// the camera prompt; the caller decides whether to re-prompt.
    fn open(&self, constraints: &StreamConstraints) -> Result<Self::Stream, Error>;
}

/**
 * A deterministic camera for headless drivers and tests.
 *
 * Every opened stream delivers the same synthetic JPEG frame at the
 * requested resolution. Set `deny` to simulate the user declining the
 * camera prompt.
 */
#[derive(Debug, Clone, Default)]
pub struct SyntheticCamera {
    /// When true, `open` fails with a permission error.
    pub deny: bool,
}

/// A live stream produced by [`SyntheticCamera`].
#[derive(Debug)]
pub struct SyntheticStream {
    live: bool,
    width: u32,
    height: u32,
}

impl MediaDevice for SyntheticCamera {
    type Stream = SyntheticStream;

    fn open(&self, constraints: &StreamConstraints) -> Result<SyntheticStream, Error> {
        if self.deny {
            return Err(Error::PermissionDenied(
                "camera access was declined".to_string(),
            ));
        }

        Ok(SyntheticStream {
            live: true,
            width: constraints.width,
            height: constraints.height,
        })
    }
}

impl MediaStream for SyntheticStream {
    fn grab_frame(&self, jpeg_quality: f32) -> Result<CapturedFrame, Error> {
        if !self.live {
            return Err(Error::DeviceUnavailable(
                "stream already stopped".to_string(),
            ));
        }

        // Minimal well-formed JPEG byte stream: SOI marker, a comment
        // segment carrying the dimensions and requested quality, EOI
        // marker.
        let comment = format!("synthetic {}x{} q{jpeg_quality:.2}", self.width, self.height);
        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xFE];
        let len = (comment.len() + 2) as u16;
        jpeg.extend_from_slice(&len.to_be_bytes());
        jpeg.extend_from_slice(comment.as_bytes());
        jpeg.extend_from_slice(&[0xFF, 0xD9]);

        Ok(CapturedFrame {
            jpeg,
            width: self.width,
            height: self.height,
        })
    }

    fn stop(&mut self) {
        self.live = false;
    }

    fn is_live(&self) -> bool {
        self.live
    }
}
