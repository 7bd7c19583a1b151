//! Recording surfaces and scripted backends for unit tests.

use crate::{
    BackendError, ChartSurface, DelimitedFile, FileSink, GeoPoint, MarkerLayer, MosaicCell,
    MosaicSurface, Notifier, PixelGrid, PixelSample, PixelWindow, SceneBackend, SceneListSurface,
    SceneListing, SceneSummary, SpectralSeries,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    io,
    rc::Rc,
};
use tokio::sync::oneshot;

pub fn scene(id: &str, cloud_cover: f64) -> SceneSummary {
    SceneSummary {
        scene_id: id.to_owned(),
        date: Utc.with_ymd_and_hms(2023, 6, 14, 0, 0, 0).unwrap(),
        cloud_cover,
    }
}

/// A 3x3 window whose samples count up from `fill`.
pub fn window(fill: u16) -> PixelWindow {
    let samples: Vec<_> = (0..9u16).map(|i| PixelSample::new([fill + i; 6])).collect();
    let grid = PixelGrid::try_from(samples).unwrap();
    let center_pixel = *grid.center();
    PixelWindow { grid, center_pixel }
}

pub fn offline() -> BackendError {
    BackendError::Status {
        status: 503,
        message: "offline".to_owned(),
    }
}

#[derive(Default)]
struct MarkerState {
    shown: Option<GeoPoint>,
    placements: usize,
    alive: usize,
    max_alive: usize,
}

#[derive(Clone, Default)]
pub struct MarkerLog(Rc<RefCell<MarkerState>>);

impl MarkerLog {
    pub fn shown(&self) -> Option<GeoPoint> {
        self.0.borrow().shown
    }

    pub fn placements(&self) -> usize {
        self.0.borrow().placements
    }

    /// Most markers ever on the map at once.
    pub fn max_alive(&self) -> usize {
        self.0.borrow().max_alive
    }
}

impl MarkerLayer for MarkerLog {
    fn place(&mut self, point: GeoPoint) {
        let mut state = self.0.borrow_mut();
        state.shown = Some(point);
        state.placements += 1;
        state.alive += 1;
        state.max_alive = state.max_alive.max(state.alive);
    }

    fn remove(&mut self) {
        let mut state = self.0.borrow_mut();
        state.shown = None;
        state.alive = state.alive.saturating_sub(1);
    }
}

#[derive(Clone, Default)]
pub struct ChartLog(Rc<RefCell<Vec<SpectralSeries>>>);

impl ChartLog {
    pub fn last(&self) -> Option<SpectralSeries> {
        self.0.borrow().last().cloned()
    }

    pub fn renders(&self) -> usize {
        self.0.borrow().len()
    }
}

impl ChartSurface for ChartLog {
    fn set_series(&mut self, series: &SpectralSeries) {
        self.0.borrow_mut().push(series.clone());
    }
}

#[derive(Default)]
struct MosaicState {
    cells: Vec<MosaicCell>,
    presents: usize,
}

#[derive(Clone, Default)]
pub struct MosaicLog(Rc<RefCell<MosaicState>>);

impl MosaicLog {
    /// Cells painted since the last clear.
    pub fn cells(&self) -> Vec<MosaicCell> {
        self.0.borrow().cells.clone()
    }

    pub fn presents(&self) -> usize {
        self.0.borrow().presents
    }
}

impl MosaicSurface for MosaicLog {
    fn clear(&mut self) {
        self.0.borrow_mut().cells.clear();
    }

    fn paint(&mut self, cell: &MosaicCell) {
        self.0.borrow_mut().cells.push(*cell);
    }

    fn present(&mut self) {
        self.0.borrow_mut().presents += 1;
    }
}

#[derive(Clone, Default)]
pub struct SceneLog(Rc<RefCell<Vec<SceneListing>>>);

impl SceneLog {
    pub fn last(&self) -> Option<SceneListing> {
        self.0.borrow().last().cloned()
    }
}

impl SceneListSurface for SceneLog {
    fn show(&mut self, listing: &SceneListing) {
        self.0.borrow_mut().push(listing.clone());
    }
}

#[derive(Default)]
struct FileState {
    saved: Vec<DelimitedFile>,
    failing: bool,
}

#[derive(Clone, Default)]
pub struct FileLog(Rc<RefCell<FileState>>);

impl FileLog {
    pub fn saved(&self) -> Vec<DelimitedFile> {
        self.0.borrow().saved.clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.0.borrow_mut().failing = failing;
    }
}

impl FileSink for FileLog {
    fn save(&mut self, file: &DelimitedFile) -> io::Result<()> {
        let mut state = self.0.borrow_mut();
        if state.failing {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        state.saved.push(file.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct NoticeLog(Rc<RefCell<Vec<String>>>);

impl NoticeLog {
    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, message: &str) {
        self.0.borrow_mut().push(message.to_owned());
    }
}

/// Answers immediately from canned data.
#[derive(Default)]
pub struct FakeBackend {
    scenes: RefCell<Vec<SceneSummary>>,
    windows: RefCell<HashMap<String, PixelWindow>>,
    offline: Cell<bool>,
    searches: Cell<usize>,
    fetches: Cell<usize>,
}

impl FakeBackend {
    pub fn with_scenes(scenes: Vec<SceneSummary>) -> Self {
        let backend = Self::default();
        backend.set_scenes(scenes);
        backend
    }

    pub fn set_scenes(&self, scenes: Vec<SceneSummary>) {
        self.scenes.replace(scenes);
    }

    pub fn set_window(&self, scene_id: &str, window: PixelWindow) {
        self.windows.borrow_mut().insert(scene_id.to_owned(), window);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn searches(&self) -> usize {
        self.searches.get()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

#[async_trait(?Send)]
impl SceneBackend for FakeBackend {
    async fn search_scenes(&self, _point: GeoPoint) -> Result<Vec<SceneSummary>, BackendError> {
        self.searches.set(self.searches.get() + 1);
        if self.offline.get() {
            return Err(offline());
        }
        Ok(self.scenes.borrow().clone())
    }

    async fn fetch_pixels(
        &self,
        _point: GeoPoint,
        scene_id: &str,
    ) -> Result<PixelWindow, BackendError> {
        self.fetches.set(self.fetches.get() + 1);
        if self.offline.get() {
            return Err(offline());
        }
        self.windows
            .borrow()
            .get(scene_id)
            .cloned()
            .ok_or_else(|| BackendError::Status {
                status: 404,
                message: format!("no window for {scene_id}"),
            })
    }
}

type Gate<T> = oneshot::Receiver<Result<T, BackendError>>;

/// Holds every response until the test releases it, so responses can
/// be delivered in any order.
#[derive(Default)]
pub struct GatedBackend {
    searches: RefCell<Vec<(GeoPoint, Gate<Vec<SceneSummary>>)>>,
    pixels: RefCell<HashMap<String, Gate<PixelWindow>>>,
}

impl GatedBackend {
    /// Gates the next search at `point`.
    pub fn gate_search(
        &self,
        point: GeoPoint,
    ) -> oneshot::Sender<Result<Vec<SceneSummary>, BackendError>> {
        let (tx, rx) = oneshot::channel();
        self.searches.borrow_mut().push((point, rx));
        tx
    }

    pub fn gate_pixels(
        &self,
        scene_id: &str,
    ) -> oneshot::Sender<Result<PixelWindow, BackendError>> {
        let (tx, rx) = oneshot::channel();
        self.pixels.borrow_mut().insert(scene_id.to_owned(), rx);
        tx
    }
}

#[async_trait(?Send)]
impl SceneBackend for GatedBackend {
    async fn search_scenes(&self, point: GeoPoint) -> Result<Vec<SceneSummary>, BackendError> {
        let gate = {
            let mut searches = self.searches.borrow_mut();
            let idx = searches
                .iter()
                .position(|(gated, _)| *gated == point)
                .expect("search was not gated");
            searches.remove(idx).1
        };
        gate.await.unwrap()
    }

    async fn fetch_pixels(
        &self,
        _point: GeoPoint,
        scene_id: &str,
    ) -> Result<PixelWindow, BackendError> {
        let gate = self.pixels.borrow_mut().remove(scene_id);
        gate.expect("pixels were not gated").await.unwrap()
    }
}
