//! Shared fixtures: in-memory tile fetchers and a surface that records calls.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use image::{ImageOutputFormat, Rgba, RgbaImage};
use staticmap::prelude::*;
use staticmap::rendering::context::{DrawState, TileImage};

/// Encodes a 256x256 tile filled with one colour.
pub fn solid_tile_png(rgba: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(256, 256, Rgba(rgba));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageOutputFormat::Png)
        .expect("encode test tile");
    bytes.into_inner()
}

/// Serves the same solid tile for every coordinate.
pub struct SolidFetcher {
    png: Vec<u8>,
    pub calls: AtomicUsize,
}

impl SolidFetcher {
    pub fn new(rgba: [u8; 4]) -> Self {
        Self {
            png: solid_tile_png(rgba),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TileFetcher for SolidFetcher {
    async fn fetch(&self, _coord: TileCoord) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.png.clone())
    }
}

/// Every request fails as if the server answered 500.
pub struct FailingFetcher;

#[async_trait]
impl TileFetcher for FailingFetcher {
    async fn fetch(&self, coord: TileCoord) -> Result<Vec<u8>> {
        Err(MapError::HttpStatus {
            status: 500,
            url: format!("test://{}", coord),
        })
    }
}

/// Serves tiles for even x and fails odd x.
pub struct CheckerFetcher {
    png: Vec<u8>,
}

impl CheckerFetcher {
    pub fn new(rgba: [u8; 4]) -> Self {
        Self {
            png: solid_tile_png(rgba),
        }
    }
}

#[async_trait]
impl TileFetcher for CheckerFetcher {
    async fn fetch(&self, coord: TileCoord) -> Result<Vec<u8>> {
        if coord.x.rem_euclid(2) == 0 {
            Ok(self.png.clone())
        } else {
            Err(MapError::HttpStatus {
                status: 404,
                url: format!("test://{}", coord),
            })
        }
    }
}

/// Returns bytes that are not an image.
pub struct GarbageFetcher;

#[async_trait]
impl TileFetcher for GarbageFetcher {
    async fn fetch(&self, _coord: TileCoord) -> Result<Vec<u8>> {
        Ok(b"<html>rate limited</html>".to_vec())
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Tile {
        x: i32,
        y: i32,
        size: u32,
    },
    Polyline {
        points: Vec<Point>,
        state: DrawState,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Color,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        color: Color,
        width: f32,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font_size: f32,
        color: Color,
    },
}

/// Surface that draws nothing and remembers every call.
pub struct RecordingSurface {
    size: Size,
    state: DrawState,
    stack: Vec<DrawState>,
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            state: DrawState::default(),
            stack: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn polylines(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Polyline { .. }))
            .collect()
    }

    pub fn filled_circles(&self) -> Vec<(Point, f64, Color)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::FillCircle {
                    center,
                    radius,
                    color,
                } => Some((*center, *radius, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Surface for RecordingSurface {
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
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.calls.push(Call::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_tile(&mut self, _tile: &TileImage, x: i32, y: i32, size: u32) {
        self.calls.push(Call::Tile { x, y, size });
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        self.calls.push(Call::Polyline {
            points: points.to_vec(),
            state: self.state.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.calls.push(Call::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Color, width: f32) {
        self.calls.push(Call::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f32, color: Color) {
        self.calls.push(Call::Text {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
        });
    }

    fn encode(&self, _format: ImageFormat, _jpeg_quality: u8) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
