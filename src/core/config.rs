//! Construction-time options for a static map
//!
//! `StaticMapOptions` mirrors the JSON option object static map services
//! accept, so it can be built in code, through [`StaticMapBuilder`], or
//! loaded from a file.
//!
//! [`StaticMapBuilder`]: crate::core::builder::StaticMapBuilder

use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::core::bounds::Bounds;
use crate::core::constants::{DEFAULT_JPEG_QUALITY, DEFAULT_PADDING, DEFAULT_TILE_SERVER};
use crate::core::geo::{LatLng, Size};
use crate::layers::{marker::Marker, vector::Path};
use crate::tiles::loader::TileLoaderConfig;
use crate::Result;

/// Encoding of the rendered image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    #[default]
    #[serde(rename = "png")]
    Png,
    #[serde(rename = "jpg", alias = "jpeg")]
    Jpeg,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Output pixel density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Scale {
    #[default]
    Standard,
    /// Twice the physical pixels per logical pixel.
    HighDensity,
}

impl Scale {
    pub fn factor(&self) -> u32 {
        match self {
            Self::Standard => 1,
            Self::HighDensity => 2,
        }
    }
}

impl TryFrom<u8> for Scale {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Standard),
            2 => Ok(Self::HighDensity),
            other => Err(format!("scale must be 1 or 2, got {other}")),
        }
    }
}

impl From<Scale> for u8 {
    fn from(scale: Scale) -> u8 {
        scale.factor() as u8
    }
}

fn default_tile_server() -> String {
    DEFAULT_TILE_SERVER.to_string()
}

fn default_padding() -> f64 {
    DEFAULT_PADDING
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

/// Everything a [`StaticMap`](crate::core::map::StaticMap) needs to render.
///
/// Either `bounds` or both `center` and `zoom` must be present. When
/// `bounds` is given it wins and any explicit center/zoom is overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticMapOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LatLng>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    pub size: Size,
    #[serde(default)]
    pub format: ImageFormat,
    #[serde(default)]
    pub scale: Scale,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub paths: Vec<Path>,
    /// Base URL (`{base}/{z}/{x}/{y}.png`) or a `{z}/{x}/{y}` template.
    #[serde(default = "default_tile_server")]
    pub tile_server: String,
    /// Free space kept around fitted bounds; ignored without `bounds`.
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(skip)]
    pub loader: TileLoaderConfig,
}

impl StaticMapOptions {
    /// Options for a map of `size` with every other field at its default.
    pub fn new(size: Size) -> Self {
        Self {
            center: None,
            zoom: None,
            bounds: None,
            size,
            format: ImageFormat::default(),
            scale: Scale::default(),
            markers: Vec::new(),
            paths: Vec::new(),
            tile_server: default_tile_server(),
            padding: default_padding(),
            jpeg_quality: default_jpeg_quality(),
            loader: TileLoaderConfig::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<FsPath>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
