//! Capabilities provided by the host environment.
//!
//! The pipeline never draws or writes anything itself. Map markers,
//! charts, the pixel mosaic, the scene list, file downloads and user
//! notices are all delegated to implementations of these traits.

use crate::{DelimitedFile, GeoPoint, MosaicCell, SceneListing, SpectralSeries};

/// The map's marker layer.
pub trait MarkerLayer {
    fn place(&mut self, point: GeoPoint);

    fn remove(&mut self);
}

/// A line chart with a labeled x axis.
pub trait ChartSurface {
    /// Replaces the displayed series and redraws.
    fn set_series(&mut self, series: &SpectralSeries);
}

/// A spatial mosaic of colored cells.
pub trait MosaicSurface {
    fn clear(&mut self);

    fn paint(&mut self, cell: &MosaicCell);

    /// Called once after every cell of a render has been painted.
    fn present(&mut self) {}
}

/// Shows the current scene search results.
pub trait SceneListSurface {
    fn show(&mut self, listing: &SceneListing);
}

/// Saves exported files, e.g. as a browser download.
pub trait FileSink {
    fn save(&mut self, file: &DelimitedFile) -> std::io::Result<()>;
}

/// Displays a message to the user.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

impl<T: MarkerLayer + ?Sized> MarkerLayer for Box<T> {
    fn place(&mut self, point: GeoPoint) {
        (**self).place(point);
    }

    fn remove(&mut self) {
        (**self).remove();
    }
}

impl<T: ChartSurface + ?Sized> ChartSurface for Box<T> {
    fn set_series(&mut self, series: &SpectralSeries) {
        (**self).set_series(series);
    }
}

impl<T: MosaicSurface + ?Sized> MosaicSurface for Box<T> {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn paint(&mut self, cell: &MosaicCell) {
        (**self).paint(cell);
    }

    fn present(&mut self) {
        (**self).present();
    }
}
