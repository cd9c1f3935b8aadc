use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_PATH_COLOR, DEFAULT_PATH_OPACITY, DEFAULT_PATH_WIDTH};
use crate::core::geo::{LatLng, Point};
use crate::core::viewport::Viewport;
use crate::rendering::context::{StyleGuard, Surface};
use crate::rendering::style::{Color, LineCap, LineJoin};
use crate::Result;

fn default_path_color() -> String {
    DEFAULT_PATH_COLOR.to_string()
}

fn default_path_width() -> f32 {
    DEFAULT_PATH_WIDTH
}

fn default_path_opacity() -> f32 {
    DEFAULT_PATH_OPACITY
}

/// A polyline through geographic coordinates (a route, a course, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub coordinates: Vec<LatLng>,
    #[serde(default = "default_path_color")]
    pub color: String,
    #[serde(default = "default_path_width")]
    pub width: f32,
    /// 0.0 to 1.0
    #[serde(default = "default_path_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub line_cap: LineCap,
    #[serde(default)]
    pub line_join: LineJoin,
    /// Alternating dash/gap lengths; empty for a solid line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash_pattern: Vec<f32>,
}

impl Path {
    pub fn new(coordinates: Vec<LatLng>) -> Self {
        Self {
            coordinates,
            color: default_path_color(),
            width: default_path_width(),
            opacity: default_path_opacity(),
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            dash_pattern: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_line_cap(mut self, line_cap: LineCap) -> Self {
        self.line_cap = line_cap;
        self
    }

    pub fn with_line_join(mut self, line_join: LineJoin) -> Self {
        self.line_join = line_join;
        self
    }

    pub fn with_dash_pattern(mut self, dash_pattern: Vec<f32>) -> Self {
        self.dash_pattern = dash_pattern;
        self
    }

    /// Checks the colour before any drawing happens.
    pub fn validate(&self) -> Result<()> {
        Color::parse(&self.color).map(|_| ())
    }

    /// Strokes the path; returns `false` without touching the surface when
    /// there are fewer than two coordinates.
    ///
    /// Off-canvas vertices are kept so lines crossing the edge stay connected.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) -> Result<bool> {
        if self.coordinates.len() < 2 {
            return Ok(false);
        }

        let color = Color::parse(&self.color)?;
        let size = surface.size();
        let points: Vec<Point> = self
            .coordinates
            .iter()
            .map(|c| viewport.project(c, size))
            .collect();

        let mut surface = StyleGuard::new(surface);
        {
            let state = surface.state_mut();
            state.stroke_color = color;
            state.line_width = self.width;
            state.global_alpha = self.opacity;
            state.line_cap = self.line_cap;
            state.line_join = self.line_join;
            state.line_dash = self.dash_pattern.clone();
        }
        surface.stroke_polyline(&points);

        Ok(true)
    }
}

/// Draws every path in order and returns how many were stroked.
pub fn draw_paths<S: Surface + ?Sized>(
    surface: &mut S,
    paths: &[Path],
    viewport: &Viewport,
) -> Result<usize> {
    let mut drawn = 0;
    for path in paths {
        if path.draw(surface, viewport)? {
            drawn += 1;
        } else {
            log::debug!(
                "path with {} coordinate(s) skipped",
                path.coordinates.len()
            );
        }
    }
    Ok(drawn)
}
