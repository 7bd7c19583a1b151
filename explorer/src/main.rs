mod interactive;
mod options;
mod progress;
mod svg;
mod terminal;

use anyhow::Error as AnyError;
use clap::Parser;
use landsat::{cells, ExportScope, HttpBackend, Notifier, Session, SpectralSeries, Surfaces};
use log::info;
use options::{Cli, Command as CliCmd, LatLon};
use progress::waiting;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use terminal::{
    AnsiMosaic, DirectorySink, ScenePrinter, Silent, StderrNotifier, TerminalMarker, TextChart,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AnyError> {
    let Cli {
        server,
        timeout,
        cmd,
    } = Cli::parse();

    env_logger::init();

    let backend = HttpBackend::builder()
        .base_url(server)
        .timeout(Duration::from_secs(timeout))
        .build()?;
    info!("using scene service at {}", backend.base_url());

    match cmd {
        CliCmd::Scenes { at, json } => scenes(backend, &at, json).await,
        CliCmd::Pixels {
            at,
            scene,
            svg: svg_path,
            export,
            out_dir,
        } => pixels(backend, &at, &scene, svg_path.as_deref(), export, out_dir).await,
        CliCmd::Session { out_dir } => {
            let surfaces = surfaces(out_dir, false, true, Box::new(StderrNotifier));
            interactive::run(Session::new(backend, surfaces)).await
        }
    }
}

fn surfaces(out_dir: PathBuf, json: bool, echo: bool, notifier: Box<dyn Notifier>) -> Surfaces {
    Surfaces {
        marker: Box::new(TerminalMarker { echo }),
        chart: Box::new(TextChart),
        mosaic: Box::new(AnsiMosaic::default()),
        scene_list: Box::new(ScenePrinter { json }),
        files: Box::new(DirectorySink { dir: out_dir }),
        notifier,
    }
}

async fn scenes(backend: HttpBackend, at: &LatLon, json: bool) -> Result<(), AnyError> {
    let session = Session::new(backend, surfaces(PathBuf::new(), json, false, Box::new(Silent)));
    session.enter(&at.latitude, &at.longitude)?;
    waiting("searching", session.search()).await?;
    Ok(())
}

async fn pixels(
    backend: HttpBackend,
    at: &LatLon,
    scene: &str,
    svg_path: Option<&Path>,
    export: Option<ExportScope>,
    out_dir: PathBuf,
) -> Result<(), AnyError> {
    let session = Session::new(backend, surfaces(out_dir, false, false, Box::new(Silent)));
    session.enter(&at.latitude, &at.longitude)?;
    // Loads are only accepted for scenes the latest search returned.
    waiting("searching", session.search()).await?;
    waiting("loading", session.select(scene)).await?;

    if let Some(path) = svg_path {
        if let Some(dataset) = session.store().current() {
            let series = SpectralSeries::from_sample(Some(&dataset.center_pixel));
            svg::write(path, &series, &cells(&dataset.grid))?;
            info!("wrote {}", path.display());
        }
    }
    if let Some(scope) = export {
        if let Some(name) = session.export(scope)? {
            println!("saved {name}");
        }
    }
    Ok(())
}
