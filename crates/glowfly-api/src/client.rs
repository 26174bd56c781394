// Device HTTP client
//
// Wraps `reqwest::Client` with the pixel board's URL layout and the
// GET-JSON / PUT-JSON request mechanics. The firmware's server is a
// small embedded HTTP stack: no auth, no envelopes, plain JSON bodies.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{DeviceConfig, DeviceStatus, FxUpdate, FxUpdateAck, TaskReport};
use crate::transport::TransportConfig;

/// HTTP client for one pixel board.
///
/// All methods are single requests with no retry — the callers' poll
/// cadence is the retry policy.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DeviceClient {
    /// Create a new client from a base URL and transport config.
    ///
    /// `base_url` is the board root, e.g. `http://192.168.0.10`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The board base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the device configuration.
    ///
    /// `GET /config.json` — effect registry, holiday list, identity and
    /// build metadata. Read once per session; the firmware only changes
    /// it across reboots.
    pub async fn get_config(&self) -> Result<DeviceConfig, Error> {
        self.get_json("config.json").await
    }

    /// Fetch the current telemetry snapshot.
    ///
    /// `GET /status.json`
    pub async fn get_status(&self) -> Result<DeviceStatus, Error> {
        self.get_json("status.json").await
    }

    /// Fetch the task runtime report.
    ///
    /// `GET /tasks.json`
    pub async fn get_tasks(&self) -> Result<TaskReport, Error> {
        self.get_json("tasks.json").await
    }

    /// Apply a single-field configuration change.
    ///
    /// `PUT /fx` — the body carries only the changed field; the response
    /// echoes the values the device actually applied.
    pub async fn apply(&self, update: &FxUpdate) -> Result<FxUpdateAck, Error> {
        let url = self.url("fx")?;
        debug!(control = update.control_name(), "PUT {url}");

        let resp = self
            .http
            .put(url)
            .json(update)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_body(resp).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// Send a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        self.parse_body(resp).await
    }

    /// Map non-success statuses to `Error::Api` and decode the body,
    /// keeping a preview of it when decoding fails.
    async fn parse_body<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: format!(
                    "{}: {}",
                    status.canonical_reason().unwrap_or("unknown status"),
                    preview(&body)
                ),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body,
        })
    }
}

/// First 200 bytes of `body`, cut back to a char boundary so multibyte
/// UTF-8 in an error page cannot split mid-character.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
