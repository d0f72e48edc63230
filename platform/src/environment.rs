// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Access to the device and browser characteristics that feed the
//! fingerprint engine, plus the canvas rendering probe.

use crate::error::Error;

/**
 * One snapshot of the browser-exposed device characteristics.
 *
 * The fields mirror what a browser host can read without any
 * permission prompt. None of them is individually identifying; the
 * fingerprint engine reduces the full ordered set to a digest.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceTraits {
    /// Full user-agent string.
    pub user_agent: String,

    /// Primary language tag, e.g. `en-KE`.
    pub language: String,

    /// Screen color depth in bits.
    pub color_depth: u32,

    /// Device pixel ratio.
    pub pixel_ratio: f64,

    /// Screen resolution as (width, height) in CSS pixels.
    pub screen: (u32, u32),

    /// Timezone offset from UTC in minutes.
    pub timezone_offset_minutes: i32,

    /// Whether session-scoped storage is usable.
    pub session_storage: bool,

    /// Whether durable local storage is usable.
    pub local_storage: bool,

    /// Platform string, e.g. `Linux x86_64`.
    pub platform: String,

    /**
     * Logical core count, if the host exposes it.
     *
     * Browsers may hide this behind privacy settings; the engine
     * substitutes a sentinel when absent.
     */
    pub hardware_concurrency: Option<u32>,

    /// Device memory estimate in GiB, if the host exposes it.
    pub device_memory_gb: Option<f64>,
}

/**
 * The fixed drawing instructions for the canvas fingerprint probe.
 *
 * Rendering the same probe on the same device must produce the same
 * raster string; differences across devices come from font rasterizers
 * and graphics stacks, which is the signal the probe exists to capture.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasProbe {
    /// Offscreen surface width in pixels.
    pub width: u32,

    /// Offscreen surface height in pixels.
    pub height: u32,

    /// Text drawn onto the surface.
    pub text: &'static str,

    /// CSS font specification for the text.
    pub font: &'static str,

    /// Fill color for the background rectangle.
    pub fill_color: &'static str,

    /// Fill color for the text.
    pub text_color: &'static str,

    /// Text origin as (x, y) in pixels.
    pub text_origin: (u32, u32),
}

/**
 * Read access to the hosting device and browser.
 *
 * A browser host implements this against the real platform APIs; the
 * [`StaticEnvironment`] below is a deterministic stand-in for headless
 * drivers and tests.
 */
pub trait DeviceEnvironment {
    /// Reads the current device characteristics.
    ///
    /// Fails when the host denies access to the underlying APIs; the
    /// fingerprint engine treats any failure as "fingerprint
    /// unavailable" and falls back.
    fn collect(&self) -> Result<DeviceTraits, Error>;

    /// Renders the probe onto an offscreen surface and serializes the
    /// resulting raster to a string.
    ///
    /// The serialization must be deterministic for a given device.
    fn render_canvas_probe(&self, probe: &CanvasProbe) -> Result<String, Error>;
}

/**
 * A fixed, fully deterministic environment.
 *
 * Returns the same traits and the same canvas raster on every call,
 * which makes fingerprints reproducible across runs. The canvas
 * raster is derived from the probe and a configurable seed standing
 * in for the device's rasterizer identity.
 */
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    /// The traits reported by [`DeviceEnvironment::collect`].
    pub traits: DeviceTraits,

    /// Stands in for the rasterizer identity of the device.
    pub canvas_seed: String,

    /// When true, `collect` fails, exercising the fallback path.
    pub deny_collection: bool,

    /// When true, `render_canvas_probe` fails, exercising the probe sentinel.
    pub deny_canvas: bool,
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self {
            traits: DeviceTraits {
                user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36".to_string(),
                language: "en-KE".to_string(),
                color_depth: 24,
                pixel_ratio: 1.0,
                screen: (1920, 1080),
                timezone_offset_minutes: -180,
                session_storage: true,
                local_storage: true,
                platform: "Linux x86_64".to_string(),
                hardware_concurrency: Some(8),
                device_memory_gb: Some(8.0),
            },
            canvas_seed: "raster-default".to_string(),
            deny_collection: false,
            deny_canvas: false,
        }
    }
}

impl DeviceEnvironment for StaticEnvironment {
    fn collect(&self) -> Result<DeviceTraits, Error> {
        if self.deny_collection {
            return Err(Error::CollectionError(
                "device characteristics blocked by host".to_string(),
            ));
        }

        Ok(self.traits.clone())
    }

    fn render_canvas_probe(&self, probe: &CanvasProbe) -> Result<String, Error> {
        if self.deny_canvas {
            return Err(Error::RenderingError(
                "offscreen canvas not supported".to_string(),
            ));
        }

        // Deterministic stand-in for a raster dump: every probe field
        // participates, so probe changes change the output exactly as
        // a real raster would.
        Ok(format!(
            "{}x{}|{}|{}|{}|{}|{},{}|{}",
            probe.width,
            probe.height,
            probe.text,
            probe.font,
            probe.fill_color,
            probe.text_color,
            probe.text_origin.0,
            probe.text_origin.1,
            self.canvas_seed,
        ))
    }
}
