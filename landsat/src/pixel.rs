//! Multispectral pixel samples.
//!
//! Landsat 8/9 Collection 2 surface reflectance is delivered as
//! unsigned 16 bit integers per band. A window of samples around the
//! selected point is a [`PixelGrid`].

use crate::{BackendError, GeoPoint};
use log::warn;
use serde::{Deserialize, Serialize};

/// The six reflective bands we sample, in wavelength order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
}

impl Band {
    pub const ALL: [Band; 6] = [
        Band::B2,
        Band::B3,
        Band::B4,
        Band::B5,
        Band::B6,
        Band::B7,
    ];

    /// Field name used on the wire and in exported tables.
    pub fn name(self) -> &'static str {
        match self {
            Band::B2 => "B2",
            Band::B3 => "B3",
            Band::B4 => "B4",
            Band::B5 => "B5",
            Band::B6 => "B6",
            Band::B7 => "B7",
        }
    }

    /// Human readable channel name.
    pub fn label(self) -> &'static str {
        match self {
            Band::B2 => "Blue",
            Band::B3 => "Green",
            Band::B4 => "Red",
            Band::B5 => "NIR",
            Band::B6 => "SWIR1",
            Band::B7 => "SWIR2",
        }
    }

    /// Nominal center wavelength in micrometers.
    pub fn wavelength_um(self) -> f64 {
        match self {
            Band::B2 => 0.48,
            Band::B3 => 0.56,
            Band::B4 => 0.65,
            Band::B5 => 0.86,
            Band::B6 => 1.61,
            Band::B7 => 2.2,
        }
    }
}

/// Surface reflectance for one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSample {
    #[serde(rename = "B2")]
    b2: u16,
    #[serde(rename = "B3")]
    b3: u16,
    #[serde(rename = "B4")]
    b4: u16,
    #[serde(rename = "B5")]
    b5: u16,
    #[serde(rename = "B6")]
    b6: u16,
    #[serde(rename = "B7")]
    b7: u16,
}

impl PixelSample {
    /// Builds a sample from values in [`Band::ALL`] order.
    pub fn new([b2, b3, b4, b5, b6, b7]: [u16; 6]) -> Self {
        Self {
            b2,
            b3,
            b4,
            b5,
            b6,
            b7,
        }
    }

    pub fn get(&self, band: Band) -> u16 {
        match band {
            Band::B2 => self.b2,
            Band::B3 => self.b3,
            Band::B4 => self.b4,
            Band::B5 => self.b5,
            Band::B6 => self.b6,
            Band::B7 => self.b7,
        }
    }

    /// Returns values in [`Band::ALL`] order.
    pub fn values(&self) -> [u16; 6] {
        Band::ALL.map(|band| self.get(band))
    }
}

/// A non-empty, row-major window of samples.
///
/// The center sample is always at `len / 2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PixelSample>", into = "Vec<PixelSample>")]
pub struct PixelGrid(Vec<PixelSample>);

impl PixelGrid {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn center_index(&self) -> usize {
        self.0.len() / 2
    }

    pub fn center(&self) -> &PixelSample {
        &self.0[self.center_index()]
    }

    /// Width of the smallest square window holding every sample.
    pub fn side(&self) -> usize {
        let mut side = 1;
        while side * side < self.0.len() {
            side += 1;
        }
        side
    }

    pub fn samples(&self) -> &[PixelSample] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PixelSample> {
        self.0.iter()
    }
}

impl TryFrom<Vec<PixelSample>> for PixelGrid {
    type Error = BackendError;

    fn try_from(samples: Vec<PixelSample>) -> Result<Self, BackendError> {
        if samples.is_empty() {
            Err(BackendError::EmptyGrid)
        } else {
            Ok(Self(samples))
        }
    }
}

impl From<PixelGrid> for Vec<PixelSample> {
    fn from(PixelGrid(samples): PixelGrid) -> Self {
        samples
    }
}

/// Pixel payload as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PixelWindow {
    pub grid: PixelGrid,
    pub center_pixel: PixelSample,
}

/// Everything loaded for one scene at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDataset {
    pub scene_id: String,
    pub point: GeoPoint,
    pub grid: PixelGrid,
    pub center_pixel: PixelSample,
}

impl SceneDataset {
    pub fn new(scene_id: String, point: GeoPoint, window: PixelWindow) -> Self {
        let PixelWindow { grid, center_pixel } = window;
        if *grid.center() != center_pixel {
            warn!(
                "scene {scene_id}: center pixel differs from grid sample {}",
                grid.center_index()
            );
        }
        Self {
            scene_id,
            point,
            grid,
            center_pixel,
        }
    }
}
