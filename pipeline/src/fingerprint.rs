// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Device fingerprint engine.
//!
//! Reduces an ordered list of browser-exposed characteristics to a
//! single stable digest used as a soft one-device-one-vote signal.
//! The digest is deterministic for a given browser session, computed
//! at most once per engine, and attached to both the registration and
//! ballot payloads. It is a best-effort signal, not a cryptographic
//! identity: failures degrade to a distinguishable fallback sentinel
//! and never halt the pipeline.

use platform::clock::Clock;
use platform::environment::{CanvasProbe, DeviceEnvironment, DeviceTraits};
use platform::Error as PlatformError;
use sha3::{Digest, Sha3_256};

/// Separator between fingerprint components; never appears in a value.
const COMPONENT_SEPARATOR: char = '|';

/// Substituted for characteristics the host does not expose.
const UNKNOWN_SENTINEL: &str = "unknown";

/// Substituted for the canvas component when rendering fails.
const CANVAS_FAILED_SENTINEL: &str = "canvas_unsupported";

/// Prefix of the low-entropy fallback identifier.
const FALLBACK_PREFIX: &str = "fp_fallback_";

/// The fixed canvas rendering probe. Any change here changes every
/// fingerprint, so treat it as part of the wire format.
const CANVAS_PROBE: CanvasProbe = CanvasProbe {
    width: 200,
    height: 50,
    text: "Agora voter integrity \u{1F5F3}",
    font: "14px Arial",
    fill_color: "#f60",
    text_color: "#069",
    text_origin: (2, 15),
};

/**
 * A computed device fingerprint.
 *
 * `Fallback` is the "fingerprint unavailable" sentinel produced when
 * collection or digesting fails. It is intentionally low-entropy and
 * non-unique; consumers must branch on the variant rather than
 * pattern-match the string.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceFingerprint {
    /// Sha3-256 digest of the ordered component list, lowercase hex.
    Device(String),

    /// Fallback identifier: fixed prefix plus the current timestamp.
    Fallback(String),
}

impl DeviceFingerprint {
    /// The string attached to submission payloads.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Device(digest) => digest,
            Self::Fallback(id) => id,
        }
    }

    /// Whether this is the "fingerprint unavailable" sentinel.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/**
 * Collects device characteristics and digests them once per session.
 *
 * The engine holds no durable store of its own: the fingerprint is
 * cached for the lifetime of the engine value and discarded with it.
 * One engine is constructed per page context and passed explicitly to
 * whatever needs the digest.
 */
#[derive(Debug, Default)]
pub struct FingerprintEngine {
    cached: Option<DeviceFingerprint>,
}

impl FingerprintEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /**
     * Returns the device fingerprint, computing it on first call and
     * reusing the cached value thereafter.
     *
     * Never fails: any collection or digesting error is logged and
     * replaced by the fallback sentinel.
     */
    pub fn fingerprint(
        &mut self,
        env: &dyn DeviceEnvironment,
        clock: &dyn Clock,
    ) -> &DeviceFingerprint {
        if self.cached.is_none() {
            let fingerprint = match Self::digest_components(env) {
                Ok(digest) => DeviceFingerprint::Device(digest),
                Err(error) => {
                    tracing::warn!(%error, "fingerprint collection failed, using fallback");
                    DeviceFingerprint::Fallback(format!(
                        "{FALLBACK_PREFIX}{}",
                        clock.unix_millis()
                    ))
                }
            };
            self.cached = Some(fingerprint);
        }

        // Populated just above on the first call.
        self.cached.as_ref().unwrap()
    }

    /// Collects the ordered component list and digests it.
    fn digest_components(env: &dyn DeviceEnvironment) -> Result<String, PlatformError> {
        let components = Self::collect_components(env)?;

        let joined = components
            .iter()
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(&COMPONENT_SEPARATOR.to_string());

        let digest = Sha3_256::digest(joined.as_bytes());
        Ok(hex::encode(digest))
    }

    /**
     * Collects the fixed, ordered component list.
     *
     * The order is part of the digest contract. Canvas failure is
     * probe-local: it substitutes a sentinel component rather than
     * failing the collection.
     */
    fn collect_components(
        env: &dyn DeviceEnvironment,
    ) -> Result<Vec<(&'static str, String)>, PlatformError> {
        let traits = env.collect()?;
        let canvas = env.render_canvas_probe(&CANVAS_PROBE).unwrap_or_else(|error| {
            tracing::warn!(%error, "canvas probe failed, substituting sentinel");
            CANVAS_FAILED_SENTINEL.to_string()
        });

        Ok(Self::order_components(&traits, canvas))
    }

    fn order_components(traits: &DeviceTraits, canvas: String) -> Vec<(&'static str, String)> {
        vec![
            ("user_agent", sanitize(&traits.user_agent)),
            ("language", sanitize(&traits.language)),
            ("color_depth", traits.color_depth.to_string()),
            ("pixel_ratio", traits.pixel_ratio.to_string()),
            (
                "screen_resolution",
                format!("{}x{}", traits.screen.0, traits.screen.1),
            ),
            (
                "timezone_offset",
                traits.timezone_offset_minutes.to_string(),
            ),
            ("session_storage", traits.session_storage.to_string()),
            ("local_storage", traits.local_storage.to_string()),
            ("platform", sanitize(&traits.platform)),
            (
                "hardware_concurrency",
                traits
                    .hardware_concurrency
                    .map_or_else(|| UNKNOWN_SENTINEL.to_string(), |n| n.to_string()),
            ),
            (
                "device_memory",
                traits
                    .device_memory_gb
                    .map_or_else(|| UNKNOWN_SENTINEL.to_string(), |n| n.to_string()),
            ),
            ("canvas", sanitize(&canvas)),
        ]
    }
}

/// Keeps the component separator out of collected values.
fn sanitize(value: &str) -> String {
    value.replace(COMPONENT_SEPARATOR, "_")
}
