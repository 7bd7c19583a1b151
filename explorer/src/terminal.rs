//! Surfaces drawing to the terminal and writing to disk.

use landsat::{
    Band, ChartSurface, DelimitedFile, FileSink, GeoPoint, MarkerLayer, MosaicCell, MosaicSurface,
    Notifier, SceneListSurface, SceneListing, SpectralSeries, SERIES_TITLE, Y_AXIS_TITLE,
};
use log::{debug, info, warn};
use std::{
    fmt::Write as _,
    fs,
    io::{self, Write},
    path::PathBuf,
};
use textplots::{Chart, Plot, Shape};

pub const NO_SCENES: &str = "No scenes found for this location";

/// Prints the selected point.
pub struct TerminalMarker {
    pub echo: bool,
}

impl MarkerLayer for TerminalMarker {
    fn place(&mut self, point: GeoPoint) {
        debug!("marker placed at {point}");
        if self.echo {
            println!("point {point}");
        }
    }

    fn remove(&mut self) {
        debug!("marker removed");
    }
}

/// Braille line chart via `textplots`.
pub struct TextChart;

impl ChartSurface for TextChart {
    fn set_series(&mut self, series: &SpectralSeries) {
        if series.is_empty() {
            return;
        }
        let points: Vec<(f32, f32)> = (0u8..)
            .zip(series.values.iter())
            .map(|(idx, value)| (f32::from(idx), f32::from(*value)))
            .collect();
        let x_max = points.last().map_or(0.0, |(x, _)| *x);
        println!("{SERIES_TITLE} ({Y_AXIS_TITLE})");
        Chart::new(120, 60, 0.0, x_max)
            .lineplot(&Shape::Lines(&points))
            .display();
        println!("{}", legend(series));
    }
}

/// One `label (wavelength)=value` entry per band.
fn legend(series: &SpectralSeries) -> String {
    series
        .points()
        .zip(Band::ALL)
        .map(|((label, value), band)| format!("{label} ({} µm)={value}", band.wavelength_um()))
        .collect::<Vec<_>>()
        .join("  ")
}

/// True color blocks, two columns per cell, with the center cell
/// marked.
#[derive(Default)]
pub struct AnsiMosaic {
    cells: Vec<MosaicCell>,
}

impl AnsiMosaic {
    fn to_ansi(&self) -> String {
        let mut out = String::new();
        let mut row = 0;
        for cell in &self.cells {
            if cell.row != row {
                out.push('\n');
                row = cell.row;
            }
            let glyph = if cell.selected { "[]" } else { "  " };
            let color = cell.color;
            let _ = write!(
                out,
                "\x1b[48;2;{};{};{}m{glyph}\x1b[0m",
                color.r, color.g, color.b
            );
        }
        out
    }
}

impl MosaicSurface for AnsiMosaic {
    fn clear(&mut self) {
        self.cells.clear();
    }

    fn paint(&mut self, cell: &MosaicCell) {
        self.cells.push(*cell);
    }

    fn present(&mut self) {
        if !self.cells.is_empty() {
            println!("{}", self.to_ansi());
        }
    }
}

/// Prints search results as numbered lines or as JSON.
pub struct ScenePrinter {
    pub json: bool,
}

impl ScenePrinter {
    fn write_listing(&self, out: &mut impl Write, listing: &SceneListing) -> io::Result<()> {
        match listing {
            SceneListing::NotSearched => (),
            _ if self.json => {
                serde_json::to_writer(&mut *out, listing.scenes())?;
                writeln!(out)?;
            }
            SceneListing::Empty { .. } => writeln!(out, "{NO_SCENES}")?,
            SceneListing::Found { scenes, .. } => {
                for (i, scene) in scenes.iter().enumerate() {
                    writeln!(out, "{:3}: {scene}", i + 1)?;
                }
            }
        }
        Ok(())
    }
}

impl SceneListSurface for ScenePrinter {
    fn show(&mut self, listing: &SceneListing) {
        if let Err(e) = self.write_listing(&mut io::stdout().lock(), listing) {
            warn!("unable to print scenes, {e}");
        }
    }
}

/// Writes exports into a directory.
pub struct DirectorySink {
    pub dir: PathBuf,
}

impl FileSink for DirectorySink {
    fn save(&mut self, file: &DelimitedFile) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file.file_name);
        fs::write(&path, file.as_bytes())?;
        info!("wrote {}", path.display());
        Ok(())
    }
}

/// Prints notices to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Drops notices. One-shot commands report failures through their
/// exit status instead.
pub struct Silent;

impl Notifier for Silent {
    fn notify(&mut self, _message: &str) {}
}
