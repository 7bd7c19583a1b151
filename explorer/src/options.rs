use anyhow::{anyhow, Error as AnyError};
use clap::{Parser, Subcommand};
use landsat::{ExportScope, GeoPoint};
use std::{path::PathBuf, str::FromStr};

/// Explore Landsat surface reflectance around a point.
#[derive(Parser, Debug)]
pub struct Cli {
    /// Scene service root URL.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    pub server: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub cmd: Command,
}

/// A "lat,lon" pair, kept as typed so the picker sees the user's text.
#[derive(Clone, Debug)]
pub struct LatLon {
    pub latitude: String,
    pub longitude: String,
}

impl FromStr for LatLon {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let idx = s.find(',').ok_or(anyhow!("not a valid lat,lon pair"))?;
        let (lat_str, lon_str) = {
            let (lat_str, lon_str) = s.split_at(idx);
            (lat_str, &lon_str[1..])
        };
        GeoPoint::parse(lat_str, lon_str)?;
        Ok(Self {
            latitude: lat_str.to_owned(),
            longitude: lon_str.to_owned(),
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List scenes covering a point.
    Scenes {
        /// Point "lat,lon"
        #[arg(long, allow_hyphen_values = true)]
        at: LatLon,

        /// Print scenes as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Load and draw the pixels of one scene around a point.
    Pixels {
        /// Point "lat,lon"
        #[arg(long, allow_hyphen_values = true)]
        at: LatLon,

        /// Scene ID, as listed by `scenes`.
        #[arg(long)]
        scene: String,

        /// Also draw the chart and mosaic to this SVG file.
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Save a CSV of the grid or the center pixel.
        #[arg(long)]
        export: Option<ExportScope>,

        /// Directory exported files are written to.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Read commands from stdin, one per line.
    Session {
        /// Directory exported files are written to.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}
