//! Shared configuration for Inspecta signature capture
//!
//! This crate is the single source of truth for the drawing surface's logical
//! resolution and the stroke style used by every signature widget (native
//! tests and the WASM canvas binding).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default logical surface width in pixels
pub const DEFAULT_WIDTH: u32 = 400;

/// Default logical surface height in pixels
pub const DEFAULT_HEIGHT: u32 = 150;

/// Default stroke width in logical pixels
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

/// Default ink color (opaque black)
pub const DEFAULT_STROKE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Background every surface is cleared to (opaque white)
pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },
    #[error("Invalid stroke width: {0}")]
    InvalidStrokeWidth(f32),
    #[error("Invalid stroke color component: {0}")]
    InvalidColor(f32),
}

/// Shape drawn at the ends of each rendered segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Round,
    Butt,
    Square,
}

/// Shape drawn where two segments of a stroke meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    #[default]
    Round,
    Bevel,
}

/// Ink style applied to every segment of every stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    /// RGBA color, components in 0..=1
    pub color: [f32; 4],
    /// Line width in logical pixels
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_STROKE_COLOR,
            width: DEFAULT_STROKE_WIDTH,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }
}

impl StrokeStyle {
    /// Half the line width
    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }
}

/// Logical resolution of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Backing raster width in pixels
    pub width: u32,
    /// Backing raster height in pixels
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl SurfaceConfig {
    /// Create a new surface config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Everything a signature widget needs at construction
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub surface: SurfaceConfig,
    pub style: StrokeStyle,
}

impl CaptureConfig {
    pub fn new(surface: SurfaceConfig, style: StrokeStyle) -> Self {
        Self { surface, style }
    }

    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the rasterizer cannot draw with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let SurfaceConfig { width, height } = self.surface;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidSurface { width, height });
        }
        if !self.style.width.is_finite() || self.style.width <= 0.0 {
            return Err(ConfigError::InvalidStrokeWidth(self.style.width));
        }
        if let Some(&c) = self
            .style
            .color
            .iter()
            .find(|c| !c.is_finite() || !(0.0..=1.0).contains(*c))
        {
            return Err(ConfigError::InvalidColor(c));
        }
        Ok(())
    }
}
