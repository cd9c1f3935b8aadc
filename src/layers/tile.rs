//! Tile compositing: which grid cells cover the canvas, and drawing the ones
//! that arrive.

use serde::{Deserialize, Serialize};

use crate::core::constants::{BACKGROUND_COLOR, TILE_SIZE};
use crate::core::geo::{tile_to_geo, LatLng, Size, TileCoord};
use crate::core::viewport::Viewport;
use crate::rendering::context::{Surface, TileImage};
use crate::rendering::style::Color;
use crate::tiles::loader::{TileLoader, TileResult};
use crate::Result;

/// Square block of tile cells centred on the tile under the map centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWindow {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
    pub zoom: u8,
}

impl TileWindow {
    /// Window wide enough for a canvas of `size` around `center`.
    ///
    /// The extent is `ceil(max(width, height) / 256) + 1` cells, split with
    /// the smaller half before the centre tile and the larger half after.
    pub fn around(center: &LatLng, zoom: u8, size: Size) -> Self {
        let center_tile = TileCoord::from_lat_lng(center, zoom);
        let longest = size.width.max(size.height) as i64;
        let tiles_needed = (longest + TILE_SIZE as i64 - 1) / TILE_SIZE as i64 + 1;
        let before = tiles_needed / 2;
        let after = tiles_needed - before;

        Self {
            min_x: center_tile.x - before,
            max_x: center_tile.x + after,
            min_y: center_tile.y - before,
            max_y: center_tile.y + after,
            zoom,
        }
    }

    /// Cells in row-major order (top row first, west to east).
    pub fn coords(&self) -> Vec<TileCoord> {
        let mut coords = Vec::with_capacity(self.len());
        for y in self.min_y..=self.max_y {
            for x in self.min_x..=self.max_x {
                coords.push(TileCoord::new(x, y, self.zoom));
            }
        }
        coords
    }

    pub fn len(&self) -> usize {
        let width = (self.max_x - self.min_x + 1).max(0) as usize;
        let height = (self.max_y - self.min_y + 1).max(0) as usize;
        width * height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What happened to one requested tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TileOutcome {
    /// Drawn with its top-left at `x`,`y` (logical pixels).
    Drawn { coord: TileCoord, x: i32, y: i32 },
    /// Fetch or decode failed; the background shows through.
    Failed { coord: TileCoord, error: String },
}

impl TileOutcome {
    pub fn coord(&self) -> TileCoord {
        match self {
            Self::Drawn { coord, .. } | Self::Failed { coord, .. } => *coord,
        }
    }

    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn { .. })
    }
}

/// Summary of one render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    /// One entry per requested tile, in draw order.
    pub tiles: Vec<TileOutcome>,
    pub paths_drawn: usize,
    pub markers_drawn: usize,
}

impl RenderReport {
    pub fn drawn_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_drawn()).count()
    }

    pub fn failed_tiles(&self) -> Vec<TileCoord> {
        self.tiles
            .iter()
            .filter(|t| !t.is_drawn())
            .map(TileOutcome::coord)
            .collect()
    }

    /// Whether every requested tile made it onto the canvas.
    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(TileOutcome::is_drawn)
    }
}

/// Base layer compositor built on a [`TileLoader`].
pub struct TileLayer<'a> {
    loader: &'a TileLoader,
}

impl<'a> TileLayer<'a> {
    pub fn new(loader: &'a TileLoader) -> Self {
        Self { loader }
    }

    /// Paints the background, then every tile of the window that loads.
    ///
    /// All downloads finish before the first draw, and drawing follows window
    /// order, so the result does not depend on network timing. Failed tiles
    /// are logged and recorded, never returned as errors.
    pub async fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
    ) -> Result<Vec<TileOutcome>> {
        let size = surface.size();
        surface.fill_rect(
            0.0,
            0.0,
            size.width as f64,
            size.height as f64,
            Color::parse(BACKGROUND_COLOR)?,
        );

        let window = TileWindow::around(&viewport.center, viewport.zoom, size);
        let results = self.loader.load_all(window.coords()).await;

        Ok(results
            .into_iter()
            .map(|result| draw_tile(surface, viewport, result))
            .collect())
    }
}

fn draw_tile<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    result: TileResult,
) -> TileOutcome {
    let TileResult { coord, data } = result;

    let image = match data.and_then(|bytes| TileImage::decode(&bytes)) {
        Ok(image) => image,
        Err(e) => {
            log::warn!("Failed to load tile {},{}: {}", coord.x, coord.y, e);
            return TileOutcome::Failed {
                coord,
                error: e.to_string(),
            };
        }
    };

    let top_left = tile_to_geo(coord.x, coord.y, coord.z);
    let position = viewport.project(&top_left, surface.size()).round();
    let (x, y) = (position.x as i32, position.y as i32);

    surface.draw_tile(&image, x, y, TILE_SIZE);
    TileOutcome::Drawn { coord, x, y }
}
