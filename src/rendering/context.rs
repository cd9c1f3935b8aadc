//! Drawing surface abstraction used by the compositor and overlays.

use std::ops::{Deref, DerefMut};

use tiny_skia::{ColorU8, Pixmap};

use crate::core::config::ImageFormat;
use crate::core::geo::{Point, Size};
use crate::rendering::style::{Color, LineCap, LineJoin};
use crate::{MapError, Result};

/// Stroke settings that persist on a surface between draw calls.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub stroke_color: Color,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    /// Empty for a solid line.
    pub line_dash: Vec<f32>,
    pub global_alpha: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            line_dash: Vec::new(),
            global_alpha: 1.0,
        }
    }
}

/// A decoded raster tile ready to be drawn.
#[derive(Debug, Clone)]
pub struct TileImage {
    pixmap: Pixmap,
}

impl TileImage {
    /// Decodes PNG or JPEG tile bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.as_raw())
    }

    /// Builds a tile from straight-alpha RGBA8 pixels.
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| MapError::Surface(format!("invalid tile size {width}x{height}")))?;
        if data.len() != (width as usize) * (height as usize) * 4 {
            return Err(MapError::Surface(format!(
                "expected {} bytes of RGBA for {width}x{height}, got {}",
                width as usize * height as usize * 4,
                data.len()
            )));
        }

        for (pixel, rgba) in pixmap.pixels_mut().iter_mut().zip(data.chunks_exact(4)) {
            *pixel = ColorU8::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3]).premultiply();
        }
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// A 2D raster canvas in logical pixel space.
///
/// Implementations own their stroke state; overlays change it only through
/// a [`StyleGuard`] so nothing leaks into later draws.
pub trait Surface {
    /// Logical size; physical pixels may be a multiple of this.
    fn size(&self) -> Size;

    fn state(&self) -> &DrawState;
    fn state_mut(&mut self) -> &mut DrawState;

    /// Pushes a copy of the current [`DrawState`].
    fn save(&mut self);
    /// Pops the last saved [`DrawState`]; no-op on an empty stack.
    fn restore(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    /// Draws `tile` with its top-left at (`x`, `y`), stretched to `size` pixels.
    fn draw_tile(&mut self, tile: &TileImage, x: i32, y: i32, size: u32);

    /// Strokes a connected polyline with the current state.
    fn stroke_polyline(&mut self, points: &[Point]);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Color, width: f32);

    /// Draws `text` horizontally centred on `x` with its baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f32, color: Color);

    fn encode(&self, format: ImageFormat, jpeg_quality: u8) -> Result<Vec<u8>>;
}

/// Saves the surface state on creation and restores it when dropped.
pub struct StyleGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> StyleGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for StyleGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for StyleGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for StyleGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// Canvas dash arrays repeat odd-length lists; negative or non-finite
/// entries make the whole pattern invalid, which means a solid line.
pub(crate) fn normalize_dash(pattern: &[f32]) -> Vec<f32> {
    if pattern.is_empty() || pattern.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Vec::new();
    }
    if pattern.iter().all(|v| *v == 0.0) {
        return Vec::new();
    }
    let mut dash = pattern.to_vec();
    if dash.len() % 2 == 1 {
        dash.extend_from_slice(pattern);
    }
    dash
}
