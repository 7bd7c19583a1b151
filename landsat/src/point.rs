use crate::LandsatError;
use geo::geometry::Point;
use std::{fmt, ops::RangeInclusive, str::FromStr};

const LATITUDE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE: RangeInclusive<f64> = -180.0..=180.0;

/// A validated geographic location in decimal degrees.
///
/// Stored as a `geo` point, so `x` is longitude and `y` is latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint(Point<f64>);

impl GeoPoint {
    /// Returns a point if both components are finite and within
    /// `[-90, 90]` and `[-180, 180]` respectively.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LandsatError> {
        check("latitude", latitude, &LATITUDE)?;
        check("longitude", longitude, &LONGITUDE)?;
        Ok(Self(Point::new(longitude, latitude)))
    }

    /// Parses a point from free-form text fields.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, LandsatError> {
        let latitude = parse_degrees("latitude", latitude)?;
        let longitude = parse_degrees("longitude", longitude)?;
        Self::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.0.y()
    }

    pub fn longitude(&self) -> f64 {
        self.0.x()
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(GeoPoint(point): GeoPoint) -> Self {
        point
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude(), self.longitude())
    }
}

fn parse_degrees(name: &str, text: &str) -> Result<f64, LandsatError> {
    f64::from_str(text.trim())
        .map_err(|_| LandsatError::InvalidCoordinate(format!("{name} {text:?} is not a number")))
}

fn check(name: &str, value: f64, range: &RangeInclusive<f64>) -> Result<(), LandsatError> {
    if !value.is_finite() {
        return Err(LandsatError::InvalidCoordinate(format!(
            "{name} {value} is not finite"
        )));
    }
    if !range.contains(&value) {
        return Err(LandsatError::InvalidCoordinate(format!(
            "{name} {value} is outside [{}, {}]",
            range.start(),
            range.end()
        )));
    }
    Ok(())
}
