//! Rendering module
//!
//! The simulation only needs three operations from a backend: clear, fill a
//! convex polygon, and read the frame back as RGB bytes. Backends are picked
//! once at construction from a `Backend` value.

pub mod digits;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod raster;
pub mod scene;
pub mod shapes;
pub mod vertex;

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TennisError};

pub use raster::Rasterizer;
pub use scene::{Palette, compose};

/// RGBA color with components in [0, 1]. Fills ignore alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// From 8-bit channels
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Quantize to 8-bit RGB
    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Opaque RGBA array for vertex data
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

/// Drawing capability the scene compositor depends on
pub trait Renderer: Send {
    /// Clear the whole frame to a flat color
    fn reset(&mut self, color: Color);

    /// Fill the convex polygon described by `vertices` (in order, at least 3)
    fn draw_polygon(&mut self, vertices: &[Vec2], color: Color);

    /// Current frame as `height * width * 3` RGB bytes, row-major from the top
    fn get_image(&mut self) -> Vec<u8>;
}

/// Renderer backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Backend {
    /// CPU vector-graphics rasterizer
    #[default]
    Vector,
    /// Off-screen GPU renderer (cargo feature `gpu`)
    Gpu,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Vector => "vector",
            Backend::Gpu => "gpu",
        }
    }

    /// Whether this build can construct the backend
    pub fn is_installed(&self) -> bool {
        match self {
            Backend::Vector => true,
            Backend::Gpu => cfg!(feature = "gpu"),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = TennisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "vector" | "cpu" | "cairo" => Ok(Backend::Vector),
            "gpu" | "wgpu" | "opengl" => Ok(Backend::Gpu),
            _ => Err(TennisError::UnknownBackend(s.to_string())),
        }
    }
}

impl TryFrom<String> for Backend {
    type Error = TennisError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Backend> for String {
    fn from(backend: Backend) -> Self {
        backend.as_str().to_string()
    }
}

/// Construct a renderer for a `width` x `height` frame
pub fn build_renderer(backend: Backend, width: u32, height: u32) -> Result<Box<dyn Renderer>> {
    log::info!("Creating {} renderer ({}x{})", backend, width, height);
    match backend {
        Backend::Vector => Ok(Box::new(Rasterizer::new(width, height))),
        #[cfg(feature = "gpu")]
        Backend::Gpu => Ok(Box::new(gpu::GpuRenderer::new(width, height)?)),
        #[cfg(not(feature = "gpu"))]
        Backend::Gpu => Err(TennisError::BackendNotInstalled { backend }),
    }
}
