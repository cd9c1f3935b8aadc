pub mod marker;
pub mod tile;
pub mod vector;

pub use marker::{Marker, MarkerSize};
pub use tile::{RenderReport, TileLayer, TileOutcome, TileWindow};
pub use vector::Path;
