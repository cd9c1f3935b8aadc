use serde::{Deserialize, Serialize};

use crate::core::constants::{
    DEFAULT_MARKER_COLOR, LABEL_COLOR, LABEL_FONT_SIZE, LABEL_OFFSET, MARKER_OUTLINE_COLOR,
    MARKER_OUTLINE_WIDTH,
};
use crate::core::geo::{LatLng, Point, Size};
use crate::core::viewport::Viewport;
use crate::rendering::context::Surface;
use crate::rendering::style::Color;
use crate::Result;

/// Marker diameter tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl MarkerSize {
    /// Diameter in logical pixels.
    pub fn diameter(&self) -> f64 {
        match self {
            Self::Small => 8.0,
            Self::Medium => 12.0,
            Self::Large => 16.0,
        }
    }
}

fn default_marker_color() -> String {
    DEFAULT_MARKER_COLOR.to_string()
}

/// A point marker: a filled circle with a white outline and optional label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub coordinate: LatLng,
    #[serde(default = "default_marker_color")]
    pub color: String,
    #[serde(default)]
    pub size: MarkerSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Marker {
    pub fn new(coordinate: LatLng) -> Self {
        Self {
            coordinate,
            color: default_marker_color(),
            size: MarkerSize::default(),
            label: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_size(mut self, size: MarkerSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Checks the colour before any drawing happens.
    pub fn validate(&self) -> Result<()> {
        Color::parse(&self.color).map(|_| ())
    }

    /// Draws the marker anchored at `anchor`: the circle sits just above the
    /// anchor and the label above the circle.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, anchor: Point) -> Result<()> {
        let color = Color::parse(&self.color)?;
        let diameter = self.size.diameter();
        let radius = diameter / 2.0;
        let center = Point::new(anchor.x, anchor.y - radius);

        surface.fill_circle(center, radius, color);
        surface.stroke_circle(
            center,
            radius,
            Color::parse(MARKER_OUTLINE_COLOR)?,
            MARKER_OUTLINE_WIDTH,
        );

        if let Some(label) = &self.label {
            surface.fill_text(
                label,
                anchor.x,
                anchor.y - diameter - LABEL_OFFSET,
                LABEL_FONT_SIZE,
                Color::parse(LABEL_COLOR)?,
            );
        }
        Ok(())
    }
}

/// Whether a projected marker is drawn: the canvas edges themselves count
/// as inside, anything beyond them is skipped.
pub fn is_visible(point: Point, size: Size) -> bool {
    !(point.x < 0.0
        || point.x > size.width as f64
        || point.y < 0.0
        || point.y > size.height as f64)
}

/// Draws every visible marker in order and returns how many were drawn.
pub fn draw_markers<S: Surface + ?Sized>(
    surface: &mut S,
    markers: &[Marker],
    viewport: &Viewport,
) -> Result<usize> {
    let size = surface.size();
    let mut drawn = 0;

    for marker in markers {
        let anchor = viewport.project(&marker.coordinate, size);
        if !is_visible(anchor, size) {
            log::debug!(
                "marker at {:?} projects off canvas ({:.1}, {:.1}), skipped",
                marker.coordinate,
                anchor.x,
                anchor.y
            );
            continue;
        }
        marker.draw(surface, anchor)?;
        drawn += 1;
    }

    Ok(drawn)
}
