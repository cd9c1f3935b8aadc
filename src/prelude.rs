//! Prelude module for common staticmap types and traits
//!
//! `use staticmap::prelude::*;` brings in everything needed to describe and
//! render a map.

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

pub use crate::rendering::{
    context::{StyleGuard, Surface},
    style::{Color, LineCap, LineJoin},
};

pub use crate::tiles::{
    loader::{HttpTileFetcher, TileFetcher, TileLoaderConfig},
    source::{TileSource, UrlTemplateSource},
};

pub use crate::{MapError, Result};
