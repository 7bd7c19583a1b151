use crate::{Band, PixelSample, SceneDataset};
use std::{fmt::Write, str::FromStr};

pub const CSV_MIME: &str = "text/csv;charset=utf-8";

const DELIMITER: char = ',';

/// Which part of a dataset to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// Every sample of the pixel grid.
    Grid,
    /// Only the center pixel.
    Center,
}

impl ExportScope {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportScope::Grid => "landsat_grid_data.csv",
            ExportScope::Center => "landsat_center_pixel.csv",
        }
    }
}

impl FromStr for ExportScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "grid" => Ok(ExportScope::Grid),
            "center" => Ok(ExportScope::Center),
            other => Err(format!("unknown export scope {other:?}, expected grid or center")),
        }
    }
}

/// A generated file ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedFile {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

impl DelimitedFile {
    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }
}

/// Serializes pixel data as comma separated values.
///
/// Values are never quoted; every cell is a `u16`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TabularExporter;

impl TabularExporter {
    /// Returns `None` when there is nothing loaded to export.
    pub fn export(
        &self,
        dataset: Option<&SceneDataset>,
        scope: ExportScope,
    ) -> Option<DelimitedFile> {
        let dataset = dataset?;
        let rows = match scope {
            ExportScope::Grid => dataset.grid.samples(),
            ExportScope::Center => std::slice::from_ref(&dataset.center_pixel),
        };
        Some(DelimitedFile {
            file_name: scope.file_name(),
            mime_type: CSV_MIME,
            contents: to_delimited(rows),
        })
    }
}

/// Header row followed by one row per sample, `\n` separated with no
/// trailing newline.
fn to_delimited(rows: &[PixelSample]) -> String {
    let mut out = String::new();
    write_row(&mut out, Band::ALL.iter().map(|band| band.name()));
    for sample in rows {
        out.push('\n');
        write_row(&mut out, sample.values().iter());
    }
    out
}

fn write_row<T: std::fmt::Display>(out: &mut String, cells: impl Iterator<Item = T>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "{cell}");
    }
}
