//! Fluent configuration for [`StaticMap`]
//!
//! `StaticMapBuilder` collects options one call at a time and validates them
//! all at once in [`build`](StaticMapBuilder::build).

use std::sync::Arc;

use crate::{
    core::{
        bounds::Bounds,
        config::{ImageFormat, Scale, StaticMapOptions},
        geo::{LatLng, Size},
        map::StaticMap,
    },
    layers::{marker::Marker, vector::Path},
    tiles::loader::{TileFetcher, TileLoaderConfig},
    Result,
};

/// Builder for creating and configuring StaticMap instances
#[derive(Debug, Clone)]
pub struct StaticMapBuilder {
    options: StaticMapOptions,
}

impl StaticMapBuilder {
    /// Create a new builder for a map of `width` x `height` logical pixels
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            options: StaticMapOptions::new(Size::new(width, height)),
        }
    }

    /// Start from an existing set of options (e.g. loaded from JSON)
    pub fn from_options(options: StaticMapOptions) -> Self {
        Self { options }
    }

    /// Set the center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: u8) -> Self {
        self.options.center = Some(center);
        self.options.zoom = Some(zoom);
        self
    }

    pub fn with_center(mut self, center: LatLng) -> Self {
        self.options.center = Some(center);
        self
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.options.zoom = Some(zoom);
        self
    }

    /// Fit the view to `bounds`; takes precedence over center and zoom
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.options.bounds = Some(bounds);
        self
    }

    /// Fit the view to the bounding box of every marker and path vertex.
    ///
    /// Does nothing when there are no overlays yet.
    pub fn fit_overlays(mut self) -> Self {
        let coords: Vec<LatLng> = self
            .options
            .markers
            .iter()
            .map(|m| m.coordinate)
            .chain(
                self.options
                    .paths
                    .iter()
                    .flat_map(|p| p.coordinates.iter().copied()),
            )
            .collect();

        if let Some(bounds) = Bounds::from_coordinates(&coords) {
            self.options.bounds = Some(bounds);
        }
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.options.size = Size::new(width, height);
        self
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.options.format = format;
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.options.scale = scale;
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.options.markers.push(marker);
        self
    }

    pub fn with_markers(mut self, markers: impl IntoIterator<Item = Marker>) -> Self {
        self.options.markers.extend(markers);
        self
    }

    pub fn with_path(mut self, path: Path) -> Self {
        self.options.paths.push(path);
        self
    }

    /// Set the tile server base URL or `{z}/{x}/{y}` template
    pub fn with_tile_server(mut self, server: impl Into<String>) -> Self {
        self.options.tile_server = server.into();
        self
    }

    /// Padding kept around fitted bounds, in logical pixels
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.options.padding = padding;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.options.jpeg_quality = quality;
        self
    }

    /// Configure tile download concurrency, retries and timeout
    pub fn with_loader_config(mut self, config: TileLoaderConfig) -> Self {
        self.options.loader = config;
        self
    }

    /// Configure tile retry behavior
    pub fn with_tile_retries(mut self, max_retries: usize, delay_ms: u64) -> Self {
        self.options.loader.max_retries = max_retries;
        self.options.loader.retry_delay = std::time::Duration::from_millis(delay_ms);
        self
    }

    pub fn options(&self) -> &StaticMapOptions {
        &self.options
    }

    pub fn into_options(self) -> StaticMapOptions {
        self.options
    }

    /// Validate the options and resolve the viewport
    pub fn build(self) -> Result<StaticMap> {
        StaticMap::new(self.options)
    }

    /// Like [`build`](Self::build) with tiles from `fetcher` instead of HTTP
    pub fn build_with_fetcher(self, fetcher: Arc<dyn TileFetcher>) -> Result<StaticMap> {
        StaticMap::with_fetcher(self.options, fetcher)
    }
}
