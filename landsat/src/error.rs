use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandsatError {
    #[error("invalid coordinate, {0}")]
    InvalidCoordinate(String),

    #[error("no point selected")]
    NoPoint,

    #[error("error searching for Landsat scenes, {0}")]
    SearchFailed(#[source] BackendError),

    #[error("error retrieving Landsat data, {0}")]
    LoadFailed(#[source] BackendError),

    #[error("scene {0} was not returned by the latest search at the selected point")]
    StaleScene(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}, {message}")]
    Status { status: u16, message: String },

    #[error("malformed response, {0}")]
    Decode(#[from] serde_json::Error),

    #[error("pixel grid has no samples")]
    EmptyGrid,
}
