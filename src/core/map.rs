use std::sync::Arc;

use crate::core::config::StaticMapOptions;
use crate::core::constants::MAX_ZOOM;
use crate::core::geo::LatLng;
use crate::core::viewport::Viewport;
use crate::layers::marker::draw_markers;
use crate::layers::tile::{RenderReport, TileLayer};
use crate::layers::vector::draw_paths;
use crate::rendering::context::Surface;
use crate::rendering::skia::SkiaSurface;
use crate::tiles::loader::{HttpTileFetcher, TileFetcher, TileLoader};
use crate::{MapError, Result};

/// Encoded image plus what went into it
#[derive(Debug, Clone)]
pub struct RenderedMap {
    pub image: Vec<u8>,
    pub report: RenderReport,
}

/// A fully resolved static map, ready to render.
///
/// Construction validates the options and settles the viewport, so a
/// `StaticMap` that exists always knows its center and zoom. Rendering takes
/// `&self` and allocates a fresh surface each time, so one map can be
/// rendered any number of times.
pub struct StaticMap {
    options: StaticMapOptions,
    viewport: Viewport,
    loader: TileLoader,
}

impl StaticMap {
    /// Map whose tiles come from `options.tile_server` over HTTP.
    pub fn new(options: StaticMapOptions) -> Result<Self> {
        let fetcher = HttpTileFetcher::from_server(&options.tile_server);
        Self::with_fetcher(options, Arc::new(fetcher))
    }

    /// Map whose tiles come from an arbitrary fetcher.
    pub fn with_fetcher(options: StaticMapOptions, fetcher: Arc<dyn TileFetcher>) -> Result<Self> {
        let viewport = resolve_viewport(&options)?;
        log::debug!(
            "static map {}x{} resolved to center ({:.5}, {:.5}) zoom {}",
            options.size.width,
            options.size.height,
            viewport.center.lat,
            viewport.center.lng,
            viewport.zoom
        );

        let loader = TileLoader::new(fetcher, options.loader.clone());
        Ok(Self {
            options,
            viewport,
            loader,
        })
    }

    /// Center actually used for drawing (fitted when bounds were given).
    pub fn calculated_center(&self) -> LatLng {
        self.viewport.center
    }

    /// Zoom actually used for drawing (fitted when bounds were given).
    pub fn calculated_zoom(&self) -> u8 {
        self.viewport.zoom
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &StaticMapOptions {
        &self.options
    }

    /// Renders and encodes the map in the configured format.
    pub async fn render(&self) -> Result<Vec<u8>> {
        Ok(self.render_with_report().await?.image)
    }

    /// Like [`render`](Self::render), also returning per-tile outcomes.
    pub async fn render_with_report(&self) -> Result<RenderedMap> {
        let mut surface = SkiaSurface::new(self.options.size, self.options.scale)?;
        let report = self.render_to_surface(&mut surface).await?;
        let image = surface.encode(self.options.format, self.options.jpeg_quality)?;

        log::info!(
            "rendered {}x{}@{}x {} ({} bytes): {}/{} tiles, {} paths, {} markers",
            self.options.size.width,
            self.options.size.height,
            self.options.scale.factor(),
            self.options.format.extension(),
            image.len(),
            report.drawn_tiles(),
            report.tiles.len(),
            report.paths_drawn,
            report.markers_drawn
        );

        Ok(RenderedMap { image, report })
    }

    /// Draws tiles, then paths, then markers onto `surface`.
    pub async fn render_to_surface<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> Result<RenderReport> {
        let tiles = TileLayer::new(&self.loader)
            .render(surface, &self.viewport)
            .await?;
        let paths_drawn = draw_paths(surface, &self.options.paths, &self.viewport)?;
        let markers_drawn = draw_markers(surface, &self.options.markers, &self.viewport)?;

        Ok(RenderReport {
            tiles,
            paths_drawn,
            markers_drawn,
        })
    }
}

fn resolve_viewport(options: &StaticMapOptions) -> Result<Viewport> {
    if options.size.is_empty() {
        return Err(MapError::Config(format!(
            "size must be non-zero, got {}x{}",
            options.size.width, options.size.height
        )));
    }
    if !options.padding.is_finite() || options.padding < 0.0 {
        return Err(MapError::Config(format!(
            "padding must be a non-negative number, got {}",
            options.padding
        )));
    }
    if !(1..=100).contains(&options.jpeg_quality) {
        return Err(MapError::Config(format!(
            "jpeg quality must be between 1 and 100, got {}",
            options.jpeg_quality
        )));
    }
    for marker in &options.markers {
        marker.validate()?;
    }
    for path in &options.paths {
        path.validate()?;
    }

    if let Some(bounds) = &options.bounds {
        return Viewport::fit_bounds(bounds, options.size, options.padding);
    }

    match (options.center, options.zoom) {
        (Some(center), Some(zoom)) => {
            if zoom > MAX_ZOOM {
                return Err(MapError::Config(format!(
                    "zoom must be between 0 and {MAX_ZOOM}, got {zoom}"
                )));
            }
            Ok(Viewport::new(center, zoom))
        }
        _ => Err(MapError::Config(
            "center and zoom are required when bounds is not specified".to_string(),
        )),
    }
}
