pub mod context;
pub mod skia;
pub mod style;

// Re-export main types
pub use context::{DrawState, StyleGuard, Surface, TileImage};
pub use skia::SkiaSurface;
pub use style::{Color, LineCap, LineJoin};
