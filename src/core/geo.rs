use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::constants::TILE_SIZE;

/// Represents a geographical coordinate with latitude and longitude
///
/// Values are not range-checked: out-of-range coordinates flow through the
/// projection math unchanged. Latitudes of exactly ±90 hit the Mercator
/// singularity and yield non-finite pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether the coordinate lies within ±90 latitude and ±180 longitude.
    ///
    /// A caller-side check only; projection and rendering accept any value.
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Represents a point in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn round(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Output dimensions in logical (pre-scale) pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Both sides multiplied by `factor`, or `None` if either overflows.
    pub fn scaled(&self, factor: u32) -> Option<Size> {
        Some(Size::new(
            self.width.checked_mul(factor)?,
            self.height.checked_mul(factor)?,
        ))
    }
}

/// Represents a tile coordinate in the slippy map tile system
///
/// `x` and `y` are signed and unclamped: windows around the grid edge ask for
/// cells outside `[0, 2^z)` and let the transport reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: i64, y: i64, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Creates a tile coordinate from a LatLng and zoom level
    pub fn from_lat_lng(lat_lng: &LatLng, zoom: u8) -> Self {
        let lat_rad = lat_lng.lat.to_radians();
        let n = 2_f64.powi(zoom as i32);

        let x = ((lat_lng.lng + 180.0) / 360.0 * n).floor() as i64;
        let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor() as i64;

        Self::new(x, y, zoom)
    }

    /// Converts tile coordinate to LatLng (northwest corner)
    pub fn to_lat_lng(&self) -> LatLng {
        let n = 2_f64.powi(self.z as i32);
        let lng = self.x as f64 / n * 360.0 - 180.0;
        let lat_rad = (PI * (1.0 - 2.0 * self.y as f64 / n)).sinh().atan();

        LatLng::new(lat_rad.to_degrees(), lng)
    }

    /// Checks if the tile exists in the grid for its zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = 1_i64 << self.z;
        (0..max_coord).contains(&self.x) && (0..max_coord).contains(&self.y)
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Tile containing `lat_lng` at `zoom`.
pub fn geo_to_tile(lat_lng: &LatLng, zoom: u8) -> TileCoord {
    TileCoord::from_lat_lng(lat_lng, zoom)
}

/// Geographic position of the top-left corner of tile `x`,`y` at `zoom`.
pub fn tile_to_geo(x: i64, y: i64, zoom: u8) -> LatLng {
    TileCoord::new(x, y, zoom).to_lat_lng()
}

/// World pixel position of `lat_lng`; the whole world is `256 * 2^zoom` wide.
fn world_pixel(lat_lng: &LatLng, zoom: u8) -> Point {
    let world_width = TILE_SIZE as f64 * 2_f64.powi(zoom as i32);
    let world_height = world_width;

    let x = (lat_lng.lng + 180.0) * world_width / 360.0;
    let y = world_height / 2.0
        - world_width * ((90.0 + lat_lng.lat) * PI / 360.0).tan().ln() / (2.0 * PI);

    Point::new(x, y)
}

/// Projects `lat_lng` into canvas pixels for a map centred on `center`.
///
/// The canvas centre sits at `size / 2`. Tiles, paths and markers all go
/// through this function so they stay pixel-aligned.
pub fn geo_to_pixel(lat_lng: &LatLng, center: &LatLng, zoom: u8, size: Size) -> Point {
    let point = world_pixel(lat_lng, zoom);
    let origin = world_pixel(center, zoom);

    Point::new(
        point.x - origin.x + size.width as f64 / 2.0,
        point.y - origin.y + size.height as f64 / 2.0,
    )
}
