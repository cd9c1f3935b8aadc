use crate::core::bounds::Bounds;
use crate::core::constants::{MAX_ZOOM, MIN_ZOOM};
use crate::core::geo::{geo_to_pixel, LatLng, Point, Size};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Resolved view of a static map: where it is centred and at which zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// Integer zoom level
    pub zoom: u8,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }

    /// Projects `lat_lng` into the canvas of `size` for this view.
    pub fn project(&self, lat_lng: &LatLng, size: Size) -> Point {
        geo_to_pixel(lat_lng, &self.center, self.zoom, size)
    }

    /// Largest integer zoom in `MIN_ZOOM..=MAX_ZOOM` at which `bounds` fits
    /// inside `size` with `padding` pixels kept free on every side.
    ///
    /// The search climbs from `MIN_ZOOM` and stops at the first zoom that no
    /// longer fits; when even `MIN_ZOOM` is too large it is returned anyway.
    pub fn fit_bounds(bounds: &Bounds, size: Size, padding: f64) -> Result<Self> {
        bounds.validate()?;

        let center = bounds.center();
        let mut zoom = MIN_ZOOM;

        for candidate in MIN_ZOOM..=MAX_ZOOM {
            let span = bounds_span(bounds, &center, candidate, size);
            let required_width = span.x + padding * 2.0;
            let required_height = span.y + padding * 2.0;

            if required_width <= size.width as f64 && required_height <= size.height as f64 {
                zoom = candidate;
            } else {
                break;
            }
        }

        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        log::debug!(
            "fitted bounds {:?} into {}x{} (padding {}) at zoom {}",
            bounds,
            size.width,
            size.height,
            padding,
            zoom
        );

        Ok(Self::new(center, zoom))
    }
}

/// Pixel width and height of `bounds` at `zoom`.
///
/// The vertical extent is measured along the centre meridian and the
/// horizontal extent along the centre parallel.
pub fn bounds_span(bounds: &Bounds, center: &LatLng, zoom: u8, size: Size) -> Point {
    let north = geo_to_pixel(&LatLng::new(bounds.north, center.lng), center, zoom, size);
    let south = geo_to_pixel(&LatLng::new(bounds.south, center.lng), center, zoom, size);
    let west = geo_to_pixel(&LatLng::new(center.lat, bounds.west), center, zoom, size);
    let east = geo_to_pixel(&LatLng::new(center.lat, bounds.east), center, zoom, size);

    Point::new((east.x - west.x).abs(), (north.y - south.y).abs())
}
