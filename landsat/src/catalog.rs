use crate::{
    listener::Listeners,
    ticket::{Completion, Sequencer},
    GeoPoint, LandsatError, SceneBackend, SceneSummary,
};
use log::{debug, info, warn};
use std::{cell::RefCell, future::Future};

/// What the scene list should currently show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SceneListing {
    /// No search has completed yet.
    #[default]
    NotSearched,

    /// The last search found nothing at `point`.
    Empty { point: GeoPoint },

    /// Scenes at `point`, in the order the backend returned them.
    Found {
        point: GeoPoint,
        scenes: Vec<SceneSummary>,
    },
}

impl SceneListing {
    fn from_search(point: GeoPoint, scenes: Vec<SceneSummary>) -> Self {
        if scenes.is_empty() {
            SceneListing::Empty { point }
        } else {
            SceneListing::Found { point, scenes }
        }
    }

    pub fn scenes(&self) -> &[SceneSummary] {
        match self {
            SceneListing::Found { scenes, .. } => scenes,
            SceneListing::NotSearched | SceneListing::Empty { .. } => &[],
        }
    }

    /// The point the listed scenes were searched for.
    pub fn point(&self) -> Option<GeoPoint> {
        match self {
            SceneListing::NotSearched => None,
            SceneListing::Empty { point } | SceneListing::Found { point, .. } => Some(*point),
        }
    }
}

/// Holds the scenes found by the most recent search.
#[derive(Default)]
pub struct SceneCatalog {
    sequence: Sequencer,
    listing: RefCell<SceneListing>,
    listeners: Listeners<SceneListing>,
}

impl SceneCatalog {
    /// Searches for scenes covering `point`.
    ///
    /// The request is issued when this method is called. If another
    /// search is issued before the response arrives, the response is
    /// discarded and the returned future resolves to
    /// [`Completion::Superseded`]. On failure the held scenes are
    /// left as they were.
    pub fn search<'a, B>(
        &'a self,
        backend: &'a B,
        point: GeoPoint,
    ) -> impl Future<Output = Result<Completion<Vec<SceneSummary>>, LandsatError>> + 'a
    where
        B: SceneBackend + ?Sized,
    {
        let ticket = self.sequence.issue();
        async move {
            debug!("search {ticket} at {point}");
            let response = backend.search_scenes(point).await;
            if !self.sequence.is_latest(ticket) {
                debug!("search {ticket} superseded");
                return Ok(Completion::Superseded);
            }
            let scenes = response.map_err(|e| {
                warn!("search {ticket} failed: {e}");
                LandsatError::SearchFailed(e)
            })?;
            info!("found {} scenes at {point}", scenes.len());
            self.listing
                .replace(SceneListing::from_search(point, scenes.clone()));
            self.listeners.notify(&self.listing.borrow());
            Ok(Completion::Applied(scenes))
        }
    }

    /// Returns a copy of the current listing.
    pub fn listing(&self) -> SceneListing {
        self.listing.borrow().clone()
    }

    /// Whether `scene_id` was returned by the latest search at `point`.
    pub fn contains(&self, point: GeoPoint, scene_id: &str) -> bool {
        let listing = self.listing.borrow();
        listing.point() == Some(point)
            && listing
                .scenes()
                .iter()
                .any(|scene| scene.scene_id == scene_id)
    }

    pub fn on_change(&self, listener: impl FnMut(&SceneListing) + 'static) {
        self.listeners.push(listener);
    }
}
