pub mod loader;
pub mod source;

// Re-exports for convenience
pub use loader::{HttpTileFetcher, TileFetcher, TileLoader, TileLoaderConfig, TileResult};
pub use source::{TileSource, UrlTemplateSource};
