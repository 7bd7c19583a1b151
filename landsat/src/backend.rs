//! Scene search and pixel extraction service.

use crate::{BackendError, GeoPoint, PixelWindow, SceneSummary};
use async_trait::async_trait;
use log::debug;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

pub const SEARCH_PATH: &str = "/api/scenes/search";
pub const PIXELS_PATH: &str = "/api/scenes/pixels";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The two backend operations the pipeline consumes.
#[async_trait(?Send)]
pub trait SceneBackend {
    /// Returns scenes covering `point`, in the backend's order.
    async fn search_scenes(&self, point: GeoPoint) -> Result<Vec<SceneSummary>, BackendError>;

    /// Returns the pixel window of `scene_id` centered on `point`.
    async fn fetch_pixels(
        &self,
        point: GeoPoint,
        scene_id: &str,
    ) -> Result<PixelWindow, BackendError>;
}

#[derive(Serialize)]
struct SearchRequest {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize)]
struct PixelRequest<'a> {
    latitude: f64,
    longitude: f64,
    scene_id: &'a str,
}

/// JSON over HTTP client for the backend service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn builder() -> HttpBackendBuilder {
        HttpBackendBuilder {
            base_url: None,
            timeout: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T, R>(&self, path: &str, body: &T) -> Result<R, BackendError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        debug!("POST {url}");
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_owned());
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait(?Send)]
impl SceneBackend for HttpBackend {
    async fn search_scenes(&self, point: GeoPoint) -> Result<Vec<SceneSummary>, BackendError> {
        let request = SearchRequest {
            latitude: point.latitude(),
            longitude: point.longitude(),
        };
        self.post(SEARCH_PATH, &request).await
    }

    async fn fetch_pixels(
        &self,
        point: GeoPoint,
        scene_id: &str,
    ) -> Result<PixelWindow, BackendError> {
        let request = PixelRequest {
            latitude: point.latitude(),
            longitude: point.longitude(),
            scene_id,
        };
        self.post(PIXELS_PATH, &request).await
    }
}

pub struct HttpBackendBuilder {
    /// Service root, e.g. `http://127.0.0.1:5000`.
    base_url: Option<String>,

    /// Per-request timeout.
    timeout: Option<Duration>,
}

impl HttpBackendBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<HttpBackend, BackendError> {
        let base_url = self.base_url.ok_or(BackendError::Builder("base_url"))?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;
        Ok(HttpBackend {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        })
    }
}

/// Extracts a human readable message from an error response body.
///
/// The service reports failures as `{"error": "..."}`.
fn error_message(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    if let Ok(ErrorBody { error }) = serde_json::from_slice(body) {
        return Some(error);
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::{error_message, HttpBackend, SceneBackend, PIXELS_PATH, SEARCH_PATH};
    use crate::{BackendError, GeoPoint};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> HttpBackend {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        HttpBackend::builder()
            .base_url(format!("http://{addr}/"))
            .build()
            .unwrap()
    }

    fn point() -> GeoPoint {
        GeoPoint::new(44.2705, -71.30325).unwrap()
    }

    #[test]
    fn test_builder_requires_base_url() {
        assert!(matches!(
            HttpBackend::builder().build(),
            Err(BackendError::Builder("base_url"))
        ));
        let backend = HttpBackend::builder()
            .base_url("http://localhost:5000/")
            .build()
            .unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(br#"{"error": "scene not found"}"#).as_deref(),
            Some("scene not found")
        );
        assert_eq!(error_message(b" bad gateway \n").as_deref(), Some("bad gateway"));
        assert_eq!(error_message(b""), None);
    }

    #[tokio::test]
    async fn test_search() {
        let router = Router::new().route(
            SEARCH_PATH,
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({"latitude": 44.2705, "longitude": -71.30325}));
                Json(json!([
                    {"scene_id": "LC09_B", "date": "2023-06-14", "cloud_cover": 30.0},
                    {"scene_id": "LC08_A", "date": "2023-06-06T15:32:10Z", "cloud_cover": 2.5}
                ]))
            }),
        );
        let backend = serve(router).await;
        let scenes = backend.search_scenes(point()).await.unwrap();
        let ids: Vec<_> = scenes.iter().map(|s| s.scene_id.as_str()).collect();
        assert_eq!(ids, ["LC09_B", "LC08_A"]);
        assert_eq!(scenes[1].cloud_cover, 2.5);
    }

    #[tokio::test]
    async fn test_fetch_pixels() {
        let router = Router::new().route(
            PIXELS_PATH,
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["scene_id"], "LC09_B");
                let sample = |v: u16| json!({"B2": v, "B3": v, "B4": v, "B5": v, "B6": v, "B7": v});
                let grid: Vec<Value> = (0..9u16).map(sample).collect();
                Json(json!({
                    "grid": grid,
                    "center_pixel": sample(4),
                    "metadata": {"band_names": ["Blue", "Green", "Red", "NIR", "SWIR1", "SWIR2"]}
                }))
            }),
        );
        let backend = serve(router).await;
        let window = backend.fetch_pixels(point(), "LC09_B").await.unwrap();
        assert_eq!(window.grid.len(), 9);
        assert_eq!(window.center_pixel, *window.grid.center());
    }

    #[tokio::test]
    async fn test_server_error() {
        let router = Router::new().route(
            PIXELS_PATH,
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "download failed"})),
                )
            }),
        );
        let backend = serve(router).await;
        let err = backend.fetch_pixels(point(), "x").await.unwrap_err();
        match err {
            BackendError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "download failed");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let router = Router::new().route(
            SEARCH_PATH,
            post(|| async { Json(json!({"scenes": []})) }),
        );
        let backend = serve(router).await;
        let err = backend.search_scenes(point()).await.unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable() {
        let backend = HttpBackend::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        let err = backend.search_scenes(point()).await.unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }
}
