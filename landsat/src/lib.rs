//! Landsat point explorer.
//!
//! Pick a point, search for Landsat 8/9 Collection 2 Level-2 scenes
//! covering it, load a window of surface reflectance pixels from one
//! scene, then chart, map and export them.
//!
//! # References
//!
//! 1. [Landsat Collection 2 Level-2 Science Products](https://www.usgs.gov/landsat-missions/landsat-collection-2-level-2-science-products)
//! 1. [Landsat 8-9 OLI/TIRS band designations](https://www.usgs.gov/faqs/what-are-band-designations-landsat-satellites)

mod backend;
mod catalog;
mod error;
mod export;
mod listener;
mod mosaic;
mod picker;
mod pixel;
mod point;
mod scene;
mod session;
mod spectral;
mod store;
mod surface;
#[cfg(test)]
mod testing;
mod ticket;

pub use crate::{
    backend::{HttpBackend, HttpBackendBuilder, SceneBackend, PIXELS_PATH, SEARCH_PATH},
    catalog::{SceneCatalog, SceneListing},
    error::{BackendError, LandsatError},
    export::{DelimitedFile, ExportScope, TabularExporter, CSV_MIME},
    mosaic::{cells, display_level, GridVisualizer, MosaicCell, Rgb},
    picker::CoordinatePicker,
    pixel::{Band, PixelGrid, PixelSample, PixelWindow, SceneDataset},
    point::GeoPoint,
    scene::SceneSummary,
    session::{Session, Surfaces},
    spectral::{SpectralSeries, SpectralVisualizer, SERIES_TITLE, Y_AXIS_TITLE},
    store::PixelSampleStore,
    surface::{ChartSurface, FileSink, MarkerLayer, MosaicSurface, Notifier, SceneListSurface},
    ticket::{Completion, Ticket},
};
pub use geo;
