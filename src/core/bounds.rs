use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Geographic bounding box the caller wants fully visible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Creates bounds from individual edges
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Smallest bounds enclosing every coordinate, or `None` for an empty slice.
    pub fn from_coordinates(coords: &[LatLng]) -> Option<Self> {
        let first = coords.first()?;
        let mut bounds = Bounds::new(first.lat, first.lat, first.lng, first.lng);
        for coord in &coords[1..] {
            bounds.extend(coord);
        }
        Some(bounds)
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.north = self.north.max(point.lat);
        self.south = self.south.min(point.lat);
        self.east = self.east.max(point.lng);
        self.west = self.west.min(point.lng);
    }

    /// Arithmetic midpoint of the edges (not geodesic).
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.north + self.south) / 2.0,
            (self.east + self.west) / 2.0,
        )
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }

    /// Rejects boxes the solver cannot reason about.
    ///
    /// `north < south` and `west > east` (a box crossing the antimeridian) are
    /// undefined for the fit algorithm and refused rather than guessed at.
    pub fn validate(&self) -> Result<()> {
        if !(self.north.is_finite()
            && self.south.is_finite()
            && self.east.is_finite()
            && self.west.is_finite())
        {
            return Err(MapError::UnsupportedBounds(format!(
                "bounds must be finite: {self:?}"
            )));
        }
        if self.north < self.south {
            return Err(MapError::UnsupportedBounds(format!(
                "north ({}) is below south ({})",
                self.north, self.south
            )));
        }
        if self.west > self.east {
            return Err(MapError::UnsupportedBounds(format!(
                "west ({}) is east of east ({}); antimeridian crossing is not supported",
                self.west, self.east
            )));
        }
        Ok(())
    }
}
