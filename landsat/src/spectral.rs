use crate::{Band, ChartSurface, PixelSample};

pub const SERIES_TITLE: &str = "Spectral Signature";
pub const Y_AXIS_TITLE: &str = "Surface Reflectance";

/// One line of a spectral signature chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectralSeries {
    /// X axis labels, always the six bands in wavelength order.
    pub labels: [&'static str; 6],

    /// Y values, either empty or one per label.
    pub values: Vec<u16>,
}

impl SpectralSeries {
    pub fn from_sample(sample: Option<&PixelSample>) -> Self {
        Self {
            labels: Band::ALL.map(Band::label),
            values: sample.map_or_else(Vec::new, |sample| sample.values().to_vec()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest value in the series, zero when empty.
    pub fn peak(&self) -> u16 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Returns `(label, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (&'static str, u16)> + '_ {
        self.labels.iter().copied().zip(self.values.iter().copied())
    }
}

/// Draws the center pixel's reflectance per band.
pub struct SpectralVisualizer<C> {
    chart: C,
}

impl<C: ChartSurface> SpectralVisualizer<C> {
    pub fn new(chart: C) -> Self {
        Self { chart }
    }

    /// Replaces the chart's series. `None` draws an empty chart.
    pub fn render(&mut self, sample: Option<&PixelSample>) {
        self.chart.set_series(&SpectralSeries::from_sample(sample));
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }
}
