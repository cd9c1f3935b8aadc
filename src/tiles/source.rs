use crate::core::constants::{DEFAULT_TILE_EXTENSION, DEFAULT_TILE_SERVER};
use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// URL template with `{z}`, `{x}`, `{y}` and optional `{s}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplateSource {
    template: String,
    subdomains: Vec<String>,
}

impl UrlTemplateSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subdomains: Vec::new(),
        }
    }

    /// Accepts either a full template or a bare server base URL; a base URL
    /// gets `/{z}/{x}/{y}.png` appended.
    pub fn from_server(server: &str) -> Self {
        if server.contains("{z}") && server.contains("{x}") && server.contains("{y}") {
            Self::new(server)
        } else {
            Self::new(format!(
                "{}/{{z}}/{{x}}/{{y}}.{}",
                server.trim_end_matches('/'),
                DEFAULT_TILE_EXTENSION
            ))
        }
    }

    /// The public OpenStreetMap tile server.
    pub fn openstreetmap() -> Self {
        Self::from_server(DEFAULT_TILE_SERVER)
    }

    /// Subdomains substituted for `{s}`, rotated by tile position.
    pub fn with_subdomains<I, S>(mut self, subdomains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subdomains = subdomains.into_iter().map(Into::into).collect();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for UrlTemplateSource {
    fn default() -> Self {
        Self::openstreetmap()
    }
}

impl TileSource for UrlTemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        let mut url = self
            .template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string());

        if url.contains("{s}") {
            // Guard against empty subdomain list
            let sub = if self.subdomains.is_empty() {
                ""
            } else {
                let idx = (coord.x + coord.y).rem_euclid(self.subdomains.len() as i64) as usize;
                self.subdomains[idx].as_str()
            };
            url = url.replace("{s}", sub);
        }
        url
    }
}
