//! Fixed numbers of the slippy-map grid and the renderer's drawing defaults.

/// Edge length of a raster tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Lowest zoom level the bounds solver will return.
pub const MIN_ZOOM: u8 = 1;

/// Highest zoom level accepted anywhere in the crate.
pub const MAX_ZOOM: u8 = 18;

/// Padding (logical pixels) kept around fitted bounds.
pub const DEFAULT_PADDING: f64 = 20.0;

/// Base URL of the public OpenStreetMap tile server.
pub const DEFAULT_TILE_SERVER: &str = "https://tile.openstreetmap.org";

/// Extension appended to tile URLs built from a bare base URL.
pub const DEFAULT_TILE_EXTENSION: &str = "png";

/// Neutral fill painted before any tile is drawn, so gaps stay visible.
pub const BACKGROUND_COLOR: &str = "#f0f0f0";

/// Marker defaults.
pub const DEFAULT_MARKER_COLOR: &str = "#FF0000";
pub const MARKER_OUTLINE_COLOR: &str = "#FFFFFF";
pub const MARKER_OUTLINE_WIDTH: f32 = 2.0;

/// Label text drawn above a marker.
pub const LABEL_COLOR: &str = "#000000";
pub const LABEL_FONT_SIZE: f32 = 12.0;
pub const LABEL_OFFSET: f64 = 5.0;

/// Path defaults.
pub const DEFAULT_PATH_COLOR: &str = "#0066FF";
pub const DEFAULT_PATH_WIDTH: f32 = 2.0;
pub const DEFAULT_PATH_OPACITY: f32 = 1.0;

/// JPEG quality used when the caller does not pick one.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;
