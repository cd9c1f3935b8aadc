//! `tiny-skia` backed implementation of [`Surface`].

use std::io::Cursor;
use std::sync::{Mutex, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use once_cell::sync::Lazy;
use tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, StrokeDash,
    Transform,
};

use crate::core::config::{ImageFormat, Scale};
use crate::core::geo::{Point, Size};
use crate::rendering::context::{normalize_dash, DrawState, Surface, TileImage};
use crate::rendering::style::Color;
use crate::{MapError, Result};

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

/// Font database loading is slow, so one system-font set is shared by every
/// surface and guarded for the short time a label is shaped.
static TEXT: Lazy<Mutex<(FontSystem, SwashCache)>> =
    Lazy::new(|| Mutex::new((FontSystem::new(), SwashCache::new())));

/// Raster surface backed by a `tiny_skia::Pixmap`.
pub struct SkiaSurface {
    size: Size,
    transform: Transform,
    pixmap: Pixmap,
    state: DrawState,
    state_stack: Vec<DrawState>,
}

impl SkiaSurface {
    /// Allocates a transparent surface of `size` logical pixels at `scale`.
    pub fn new(size: Size, scale: Scale) -> Result<Self> {
        let physical = size.scaled(scale.factor()).ok_or_else(|| {
            MapError::Surface(format!(
                "canvas size {}x{} at {}x overflows",
                size.width,
                size.height,
                scale.factor()
            ))
        })?;
        if physical.is_empty() || physical.width > MAX_DIMENSION || physical.height > MAX_DIMENSION
        {
            return Err(MapError::Surface(format!(
                "invalid canvas size {}x{}",
                physical.width, physical.height
            )));
        }

        let pixmap = Pixmap::new(physical.width, physical.height).ok_or_else(|| {
            MapError::Surface(format!(
                "failed to allocate {}x{} canvas",
                physical.width, physical.height
            ))
        })?;
        let factor = scale.factor() as f32;

        Ok(Self {
            size,
            transform: Transform::from_scale(factor, factor),
            pixmap,
            state: DrawState::default(),
            state_stack: Vec::new(),
        })
    }

    /// Physical width in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Physical height in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha colour of a physical pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(
            pixel.red(),
            pixel.green(),
            pixel.blue(),
            pixel.alpha(),
        ))
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint {
            anti_alias: true,
            ..Default::default()
        };
        paint.set_color(color.to_skia());
        paint
    }

    fn to_rgba_image(&self) -> Result<RgbaImage> {
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(self.pixmap.width(), self.pixmap.height(), data)
            .ok_or_else(|| MapError::Encode("pixel buffer does not match canvas size".into()))
    }
}

impl Surface for SkiaSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn state(&self) -> &DrawState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    fn save(&mut self) {
        self.state_stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) {
            let paint = Self::paint(color);
            self.pixmap.fill_rect(rect, &paint, self.transform, None);
        }
    }

    fn draw_tile(&mut self, tile: &TileImage, x: i32, y: i32, size: u32) {
        let sx = size as f32 / tile.width() as f32;
        let sy = size as f32 / tile.height() as f32;
        let transform = self
            .transform
            .pre_translate(x as f32, y as f32)
            .pre_scale(sx, sy);

        let quality = if transform.sx == 1.0 && transform.sy == 1.0 {
            FilterQuality::Nearest
        } else {
            FilterQuality::Bilinear
        };
        let paint = PixmapPaint {
            quality,
            ..Default::default()
        };

        self.pixmap
            .draw_pixmap(0, 0, tile.pixmap().as_ref(), &paint, transform, None);
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        let mut pb = PathBuilder::new();
        let mut iter = points.iter();
        let Some(first) = iter.next() else {
            return;
        };
        pb.move_to(first.x as f32, first.y as f32);
        for point in iter {
            pb.line_to(point.x as f32, point.y as f32);
        }
        let Some(path) = pb.finish() else {
            log::debug!("skipping degenerate polyline of {} points", points.len());
            return;
        };

        let state = &self.state;
        let dash = normalize_dash(&state.line_dash);
        let stroke = Stroke {
            width: state.line_width,
            line_cap: state.line_cap.into(),
            line_join: state.line_join.into(),
            dash: if dash.is_empty() {
                None
            } else {
                StrokeDash::new(dash, 0.0)
            },
            ..Default::default()
        };
        let paint = Self::paint(state.stroke_color.with_opacity(state.global_alpha));

        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform, None);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let circle = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32);
        if let Some(path) = circle {
            let paint = Self::paint(color);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
        }
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Color, width: f32) {
        let circle = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32);
        if let Some(path) = circle {
            let paint = Self::paint(color);
            let stroke = Stroke {
                width,
                ..Default::default()
            };
            self.pixmap
                .stroke_path(&path, &paint, &stroke, self.transform, None);
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f32, color: Color) {
        let mut guard = TEXT.lock().unwrap_or_else(PoisonError::into_inner);
        let (font_system, swash_cache) = &mut *guard;

        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut buffer = Buffer::new(font_system, metrics);
        let attrs = Attrs::new().family(Family::SansSerif);
        buffer.set_text(font_system, text, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(font_system, false);

        let mut text_width: f32 = 0.0;
        let mut baseline: Option<f32> = None;
        for run in buffer.layout_runs() {
            text_width = text_width.max(run.line_w);
            baseline.get_or_insert(run.line_y);
        }
        let Some(baseline) = baseline else {
            return;
        };

        let origin_x = x as f32 - text_width / 2.0;
        let origin_y = y as f32 - baseline;
        let text_color = cosmic_text::Color::rgba(color.r, color.g, color.b, color.a);
        let pixmap = &mut self.pixmap;
        let transform = self.transform;

        buffer.draw(font_system, swash_cache, text_color, |gx, gy, w, h, c| {
            if c.a() == 0 {
                return;
            }
            let Some(rect) = Rect::from_xywh(
                origin_x + gx as f32,
                origin_y + gy as f32,
                w as f32,
                h as f32,
            ) else {
                return;
            };
            let paint = Self::paint(Color::rgba(c.r(), c.g(), c.b(), c.a()));
            pixmap.fill_rect(rect, &paint, transform, None);
        });
    }

    fn encode(&self, format: ImageFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
        let image = DynamicImage::ImageRgba8(self.to_rgba_image()?);
        let mut buf = Cursor::new(Vec::new());

        let result = match format {
            ImageFormat::Png => image.write_to(&mut buf, ImageOutputFormat::Png),
            ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8())
                .write_to(&mut buf, ImageOutputFormat::Jpeg(jpeg_quality.clamp(1, 100))),
        };
        result.map_err(|e| MapError::Encode(format!("{}: {}", format.mime_type(), e)))?;

        Ok(buf.into_inner())
    }
}
