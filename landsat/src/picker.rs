use crate::{listener::Listeners, GeoPoint, LandsatError, MarkerLayer};
use log::debug;

/// Owns the selected point and keeps the map marker and the
/// coordinate input fields in agreement with it.
pub struct CoordinatePicker<M> {
    point: Option<GeoPoint>,

    /// Latitude input field contents.
    latitude_text: String,

    /// Longitude input field contents.
    longitude_text: String,

    marker: M,

    /// Whether `marker` currently shows a point.
    marker_placed: bool,

    listeners: Listeners<GeoPoint>,
}

impl<M: MarkerLayer> CoordinatePicker<M> {
    pub fn new(marker: M) -> Self {
        Self {
            point: None,
            latitude_text: String::new(),
            longitude_text: String::new(),
            marker,
            marker_placed: false,
            listeners: Listeners::default(),
        }
    }

    /// Selects the point the user clicked on the map and rewrites the
    /// input fields to match.
    pub fn set_from_map_click(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> Result<GeoPoint, LandsatError> {
        let point = GeoPoint::new(latitude, longitude)?;
        self.latitude_text = format!("{latitude:.6}");
        self.longitude_text = format!("{longitude:.6}");
        self.commit(point);
        Ok(point)
    }

    /// Selects the point typed into the input fields and moves the
    /// marker to match.
    ///
    /// On error nothing changes.
    pub fn set_from_manual_input(
        &mut self,
        latitude: &str,
        longitude: &str,
    ) -> Result<GeoPoint, LandsatError> {
        let point = GeoPoint::parse(latitude, longitude)?;
        self.latitude_text = latitude.trim().to_owned();
        self.longitude_text = longitude.trim().to_owned();
        self.commit(point);
        Ok(point)
    }

    pub fn on_change(&self, listener: impl FnMut(&GeoPoint) + 'static) {
        self.listeners.push(listener);
    }

    pub fn point(&self) -> Option<GeoPoint> {
        self.point
    }

    /// Returns the (latitude, longitude) input field contents.
    pub fn fields(&self) -> (&str, &str) {
        (&self.latitude_text, &self.longitude_text)
    }

    pub fn marker(&self) -> &M {
        &self.marker
    }

    fn commit(&mut self, point: GeoPoint) {
        if self.marker_placed {
            self.marker.remove();
        }
        self.marker.place(point);
        self.marker_placed = true;
        self.point = Some(point);
        debug!("selected {point}");
        self.listeners.notify(&point);
    }
}
