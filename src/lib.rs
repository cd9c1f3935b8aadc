//! # staticmap
//!
//! Server-side rendering of static map images.
//!
//! A [`StaticMap`] stitches Web-Mercator raster tiles into a single canvas,
//! draws polylines and point markers on top, and encodes the result as PNG or
//! JPEG. The view is either given explicitly (center and zoom) or fitted to a
//! geographic bounding box.
//!
//! ```no_run
//! use staticmap::prelude::*;
//!
//! # async fn demo() -> staticmap::Result<()> {
//! let png = StaticMapBuilder::new(800, 600)
//!     .with_center_and_zoom(LatLng::new(35.6762, 139.6503), 12)
//!     .with_marker(Marker::new(LatLng::new(35.6762, 139.6503)).with_label("Tokyo"))
//!     .build()?
//!     .render()
//!     .await?;
//! # let _ = png;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod tiles;
pub use crate::core::constants;

use std::time::Duration;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    builder::StaticMapBuilder,
    config::{ImageFormat, Scale, StaticMapOptions},
    geo::{LatLng, Point, Size, TileCoord},
    map::{RenderedMap, StaticMap},
    viewport::Viewport,
};

pub use crate::layers::{
    marker::{Marker, MarkerSize},
    tile::{RenderReport, TileOutcome},
    vector::Path,
};

pub use crate::rendering::{context::Surface, skia::SkiaSurface, style::Color};

pub use crate::tiles::loader::{HttpTileFetcher, TileFetcher, TileLoaderConfig};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported bounds: {0}")]
    UnsupportedBounds(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Tile {coord} timed out after {after:?}")]
    Timeout { coord: TileCoord, after: Duration },

    #[error("Tile decode error: {0}")]
    TileDecode(#[from] image::ImageError),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type alias for convenience
pub type Error = MapError;
