use crate::{
    listener::Listeners,
    ticket::{Completion, Sequencer},
    GeoPoint, LandsatError, SceneBackend, SceneCatalog, SceneDataset,
};
use log::{debug, info, warn};
use std::{cell::RefCell, future::Future, sync::Arc};

/// Holds the pixel data of the selected scene.
///
/// The dataset is only ever swapped whole, so the grid and center
/// pixel always belong to the same scene.
#[derive(Default)]
pub struct PixelSampleStore {
    sequence: Sequencer,
    dataset: RefCell<Option<Arc<SceneDataset>>>,
    listeners: Listeners<Arc<SceneDataset>>,
}

impl PixelSampleStore {
    /// Loads pixels of `scene_id` around `point`.
    ///
    /// `scene_id` must come from the latest search `catalog` made at
    /// `point`, otherwise this fails with
    /// [`LandsatError::StaleScene`] without contacting the backend.
    ///
    /// The request is issued when this method is called. Only the
    /// most recently issued load may replace the held dataset; an
    /// older one resolves to [`Completion::Superseded`] whether it
    /// succeeded or not. So does a load whose scene is no longer in
    /// the catalog at `point` once the response arrives, e.g. because
    /// a search at another point completed meanwhile.
    pub fn load<'a, B>(
        &'a self,
        backend: &'a B,
        catalog: &'a SceneCatalog,
        point: GeoPoint,
        scene_id: &str,
    ) -> impl Future<Output = Result<Completion<Arc<SceneDataset>>, LandsatError>> + 'a
    where
        B: SceneBackend + ?Sized,
    {
        let scene_id = scene_id.to_owned();
        let ticket = catalog
            .contains(point, &scene_id)
            .then(|| self.sequence.issue());
        async move {
            let Some(ticket) = ticket else {
                warn!("refusing to load {scene_id}, not found at {point}");
                return Err(LandsatError::StaleScene(scene_id));
            };
            debug!("load {ticket}: {scene_id} at {point}");
            let response = backend.fetch_pixels(point, &scene_id).await;
            if !self.sequence.is_latest(ticket) {
                debug!("load {ticket} superseded");
                return Ok(Completion::Superseded);
            }
            if !catalog.contains(point, &scene_id) {
                debug!("load {ticket} outdated by a newer search");
                return Ok(Completion::Superseded);
            }
            let window = response.map_err(|e| {
                warn!("load {ticket} failed: {e}");
                LandsatError::LoadFailed(e)
            })?;
            let dataset = Arc::new(SceneDataset::new(scene_id, point, window));
            info!(
                "loaded {} samples of {}",
                dataset.grid.len(),
                dataset.scene_id
            );
            self.dataset.replace(Some(dataset.clone()));
            self.listeners.notify(&dataset);
            Ok(Completion::Applied(dataset))
        }
    }

    pub fn current(&self) -> Option<Arc<SceneDataset>> {
        self.dataset.borrow().clone()
    }

    pub fn on_change(&self, listener: impl FnMut(&Arc<SceneDataset>) + 'static) {
        self.listeners.push(listener);
    }
}
