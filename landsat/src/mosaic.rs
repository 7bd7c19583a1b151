use crate::{Band, MosaicSurface, PixelGrid, PixelSample};
use std::fmt;

/// Largest raw reflectance value.
const NATIVE_MAX: f64 = 65535.0;

/// Largest display channel value.
const DISPLAY_MAX: f64 = 255.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// True color approximation: red, green and blue come from B4, B3
    /// and B2.
    pub fn from_sample(sample: &PixelSample) -> Self {
        let level = |band| display_level(f64::from(sample.get(band)));
        Self {
            r: level(Band::B4),
            g: level(Band::B3),
            b: level(Band::B2),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Linearly maps reflectance onto `[0, 255]`, clamping anything
/// outside the native range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn display_level(reflectance: f64) -> u8 {
    let scaled = (reflectance / NATIVE_MAX * DISPLAY_MAX).round();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, DISPLAY_MAX) as u8
}

/// One drawn cell of the mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicCell {
    /// Position in the grid's sample sequence.
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub color: Rgb,
    /// Set on the center cell only.
    pub selected: bool,
}

/// Lays `grid` out row-major in its square window.
pub fn cells(grid: &PixelGrid) -> Vec<MosaicCell> {
    let side = grid.side();
    let center = grid.center_index();
    grid.iter()
        .enumerate()
        .map(|(index, sample)| MosaicCell {
            index,
            row: index / side,
            col: index % side,
            color: Rgb::from_sample(sample),
            selected: index == center,
        })
        .collect()
}

/// Draws a pixel grid as colored cells with the center highlighted.
pub struct GridVisualizer<S> {
    surface: S,
}

impl<S: MosaicSurface> GridVisualizer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Clears the surface and paints `grid`, if any.
    pub fn render(&mut self, grid: Option<&PixelGrid>) {
        self.surface.clear();
        for cell in grid.map(cells).unwrap_or_default() {
            self.surface.paint(&cell);
        }
        self.surface.present();
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
