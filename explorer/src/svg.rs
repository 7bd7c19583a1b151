use anyhow::Error as AnyError;
use landsat::{Band, MosaicCell, SpectralSeries, SERIES_TITLE, Y_AXIS_TITLE};
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1200, 500);
const CHART_WIDTH: i32 = 700;

/// Draws the spectral signature on the left and the pixel mosaic on
/// the right.
pub fn write(path: &Path, series: &SpectralSeries, cells: &[MosaicCell]) -> Result<(), AnyError> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(CHART_WIDTH);

    let labels = series.labels;
    let y_max = f64::from(series.peak()).max(1.0) * 1.1;
    let mut chart = ChartBuilder::on(&left)
        .caption(SERIES_TITLE, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0usize..labels.len() - 1, 0.0..y_max)?;
    chart
        .configure_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|idx| match (labels.get(*idx), Band::ALL.get(*idx)) {
            (Some(label), Some(band)) => format!("{label} ({} µm)", band.wavelength_um()),
            _ => String::new(),
        })
        .y_desc(Y_AXIS_TITLE)
        .draw()?;
    chart.draw_series(LineSeries::new(
        series
            .values
            .iter()
            .enumerate()
            .map(|(idx, value)| (idx, f64::from(*value))),
        &BLUE,
    ))?;

    let side = cells.iter().map(|cell| cell.row.max(cell.col) + 1).max();
    if let Some(side) = side {
        let mosaic = right.margin(40, 40, 20, 20);
        let areas = mosaic.split_evenly((side, side));
        for cell in cells {
            let area = &areas[cell.row * side + cell.col];
            let color = cell.color;
            area.fill(&RGBColor(color.r, color.g, color.b))?;
            if cell.selected {
                let (w, h) = area.dim_in_pixel();
                #[allow(clippy::cast_possible_wrap)]
                let corner = (w as i32 - 1, h as i32 - 1);
                area.draw(&Rectangle::new([(0, 0), corner], RED.stroke_width(3)))?;
            }
        }
    }

    root.present()?;
    Ok(())
}
