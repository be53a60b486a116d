//! Render context: viewport, camera distance and the directional light.
//!
//! The context is a plain value handed to every operation that may rebuild
//! a transform's cached matrix. Changing it never touches a transform
//! directly; each transform picks the new light up on its next rebuild or
//! reset.
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fixed::Fix;
use crate::geometry::Vector3;

/// Width of the default bitmap render target, in pixels.
pub const BITMAP_WIDTH: u16 = 256;
/// Height of the default bitmap render target, in pixels.
pub const BITMAP_HEIGHT: u16 = 160;

/// Default distance from the camera to the projection plane.
pub const DEFAULT_CAM_DISTANCE: Fix = Fix::from_int(20);

/// Output surface dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: BITMAP_WIDTH,
            height: BITMAP_HEIGHT,
        }
    }
}

/// Lighting and viewport configuration shared by every transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderContext {
    light_enabled: bool,
    light: Vector3,
    viewport: Viewport,
    cam_distance: Fix,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            light_enabled: false,
            light: Vector3::X,
            viewport: Viewport::default(),
            cam_distance: DEFAULT_CAM_DISTANCE,
        }
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::new();
        log::debug!(
            "render context reset (viewport {}x{})",
            self.viewport.width,
            self.viewport.height
        );
    }

    pub fn set_light_enabled(&mut self, enabled: bool) {
        self.light_enabled = enabled;
    }

    pub fn light_enabled(&self) -> bool {
        self.light_enabled
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_cam_distance(&mut self, value: Fix) {
        self.cam_distance = value;
    }

    pub fn cam_distance(&self) -> Fix {
        self.cam_distance
    }

    /// Set the world-space light direction.
    pub fn set_light_xyz(&mut self, x: Fix, y: Fix, z: Fix) {
        self.light = Vector3::new(x, y, z);
    }

    pub fn set_light(&mut self, value: &Vector3) {
        self.light = *value;
    }

    pub fn light(&self) -> Vector3 {
        self.light
    }

    /// Load a context from JSON. Missing fields keep their defaults;
    /// fixed-point values are raw 16.16 integers.
    pub fn from_json(json: &str) -> Result<Self> {
        let context: Self = serde_json::from_str(json)?;
        log::debug!(
            "loaded render context: light {} ({}, {}, {}), viewport {}x{}",
            if context.light_enabled { "on" } else { "off" },
            context.light.x,
            context.light.y,
            context.light.z,
            context.viewport.width,
            context.viewport.height
        );
        Ok(context)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}
