//! Wires the pipeline components to each other and to the host's
//! capabilities.

use crate::{
    ticket::Completion, ChartSurface, CoordinatePicker, ExportScope, FileSink, GeoPoint,
    GridVisualizer, LandsatError, MarkerLayer, MosaicSurface, Notifier, PixelSampleStore,
    SceneBackend, SceneCatalog, SceneDataset, SceneListSurface, SceneSummary, SpectralVisualizer,
    TabularExporter,
};
use log::{debug, info, warn};
use std::{cell::RefCell, future::Future, sync::Arc};

/// Host capabilities a [`Session`] renders into.
pub struct Surfaces {
    pub marker: Box<dyn MarkerLayer>,
    pub chart: Box<dyn ChartSurface>,
    pub mosaic: Box<dyn MosaicSurface>,
    pub scene_list: Box<dyn SceneListSurface>,
    pub files: Box<dyn FileSink>,
    pub notifier: Box<dyn Notifier>,
}

/// One user's exploration: a selected point, the scenes found there
/// and the pixels of the chosen scene.
///
/// Every failure is logged, shown through the [`Notifier`] and
/// returned, and leaves the session in its last good state.
pub struct Session<B> {
    backend: B,
    picker: RefCell<CoordinatePicker<Box<dyn MarkerLayer>>>,
    catalog: SceneCatalog,
    store: PixelSampleStore,
    exporter: TabularExporter,
    files: RefCell<Box<dyn FileSink>>,
    notifier: RefCell<Box<dyn Notifier>>,
}

impl<B: SceneBackend> Session<B> {
    pub fn new(backend: B, surfaces: Surfaces) -> Self {
        let Surfaces {
            marker,
            chart,
            mosaic,
            mut scene_list,
            files,
            notifier,
        } = surfaces;

        let catalog = SceneCatalog::default();
        scene_list.show(&catalog.listing());
        catalog.on_change(move |listing| scene_list.show(listing));

        let mut spectral = SpectralVisualizer::new(chart);
        let mut grid = GridVisualizer::new(mosaic);
        spectral.render(None);
        grid.render(None);
        let store = PixelSampleStore::default();
        store.on_change(move |dataset| {
            spectral.render(Some(&dataset.center_pixel));
            grid.render(Some(&dataset.grid));
        });

        Self {
            backend,
            picker: RefCell::new(CoordinatePicker::new(marker)),
            catalog,
            store,
            exporter: TabularExporter,
            files: RefCell::new(files),
            notifier: RefCell::new(notifier),
        }
    }

    /// Selects the point clicked on the map.
    pub fn click(&self, latitude: f64, longitude: f64) -> Result<GeoPoint, LandsatError> {
        let selected = self
            .picker
            .borrow_mut()
            .set_from_map_click(latitude, longitude);
        self.report(selected)
    }

    /// Selects the point typed into the coordinate fields.
    pub fn enter(&self, latitude: &str, longitude: &str) -> Result<GeoPoint, LandsatError> {
        let selected = self
            .picker
            .borrow_mut()
            .set_from_manual_input(latitude, longitude);
        self.report(selected)
    }

    /// Searches for scenes at the selected point.
    ///
    /// The request is issued when this method is called, so of two
    /// searches the one called last wins however they are polled.
    pub fn search(
        &self,
    ) -> impl Future<Output = Result<Completion<Vec<SceneSummary>>, LandsatError>> + '_ {
        let issued = self
            .require_point()
            .map(|point| self.catalog.search(&self.backend, point));
        async move {
            let searched = match issued {
                Ok(search) => search.await,
                Err(e) => Err(e),
            };
            self.report(searched)
        }
    }

    /// Loads a scene found by the latest search at the selected point.
    ///
    /// Issued when called, like [`Session::search`].
    pub fn select(
        &self,
        scene_id: &str,
    ) -> impl Future<Output = Result<Completion<Arc<SceneDataset>>, LandsatError>> + '_ {
        let issued = self
            .require_point()
            .map(|point| self.store.load(&self.backend, &self.catalog, point, scene_id));
        async move {
            let loaded = match issued {
                Ok(load) => load.await,
                Err(e) => Err(e),
            };
            self.report(loaded)
        }
    }

    /// Saves the loaded data through the [`FileSink`].
    ///
    /// Returns the saved file name, or `None` when nothing is loaded.
    pub fn export(&self, scope: ExportScope) -> Result<Option<&'static str>, LandsatError> {
        let dataset = self.store.current();
        let Some(file) = self.exporter.export(dataset.as_deref(), scope) else {
            debug!("nothing loaded, skipping {scope:?} export");
            return Ok(None);
        };
        let saved = self
            .files
            .borrow_mut()
            .save(&file)
            .map_err(LandsatError::from);
        self.report(saved)?;
        info!("exported {}", file.file_name);
        Ok(Some(file.file_name))
    }

    pub fn point(&self) -> Option<GeoPoint> {
        self.picker.borrow().point()
    }

    /// Returns the (latitude, longitude) input field contents.
    pub fn fields(&self) -> (String, String) {
        let picker = self.picker.borrow();
        let (latitude, longitude) = picker.fields();
        (latitude.to_owned(), longitude.to_owned())
    }

    /// Runs `listener` after every successful selection. It must not
    /// call back into the session.
    pub fn on_point_change(&self, listener: impl FnMut(&GeoPoint) + 'static) {
        self.picker.borrow().on_change(listener);
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &PixelSampleStore {
        &self.store
    }

    fn require_point(&self) -> Result<GeoPoint, LandsatError> {
        self.point().ok_or(LandsatError::NoPoint)
    }

    fn report<T>(&self, result: Result<T, LandsatError>) -> Result<T, LandsatError> {
        if let Err(e) = &result {
            warn!("{e}");
            self.notifier.borrow_mut().notify(&e.to_string());
        }
        result
    }
}
