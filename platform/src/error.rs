// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Error type for platform facilities.

use thiserror::Error;

/**
 * Error type for the platform crate.
 *
 * Every fallible interaction with the hosting environment reports one
 * of these variants. The pipeline decides, per its error taxonomy,
 * which of them are surfaced to the voter and which are absorbed with
 * a fallback value.
 */
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The user denied access to a device, typically the camera.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A requested device is missing or cannot be opened.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The session-scoped store rejected a read or write.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Canvas rendering failed; the fingerprint probe substitutes a sentinel.
    #[error("canvas rendering failed: {0}")]
    RenderingError(String),

    /// Encoding a captured frame to JPEG failed.
    #[error("frame encoding failed: {0}")]
    EncodingError(String),

    /// Reading device characteristics failed.
    #[error("device characteristics unavailable: {0}")]
    CollectionError(String),
}
