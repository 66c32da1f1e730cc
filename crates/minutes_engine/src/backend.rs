use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use futures_util::StreamExt;
use minutes_core::{ProcessingResult, SubmissionRequest, ARTIFACT_BASE_PATH};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::Url;

use crate::{FailureKind, FetchError, SubmitError};

pub const PROCESS_PATH: &str = "/parse_transcript/";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_artifact_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_artifact_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArtifact {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// The processing service, reached over HTTP in production and faked in tests.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn process(&self, request: &SubmissionRequest) -> Result<ProcessingResult, SubmitError>;

    /// Retrieves `/artifacts/reports/<file_name>`.
    async fn fetch_artifact(&self, file_name: &str) -> Result<FetchedArtifact, FetchError>;

    /// Returns the `status` reported by `/health`.
    async fn health(&self) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn artifact_url(&self, file_name: &str) -> Result<Url, FetchError> {
        let mut url = self.endpoint(ARTIFACT_BASE_PATH)?;
        url.path_segments_mut()
            .map_err(|_| FetchError::new(FailureKind::InvalidUrl, "base url has no path"))?
            .pop_if_empty()
            .push(file_name);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn process(&self, request: &SubmissionRequest) -> Result<ProcessingResult, SubmitError> {
        let url = self
            .endpoint(PROCESS_PATH)
            .map_err(|err| SubmitError::Transport(err.message))?;
        let body = serde_json::json!({
            "transcript": request.transcript,
            "meeting_id": request.meeting_id,
        })
        .to_string();

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        engine_info!(
            "POST {} meeting_id={} -> {}",
            PROCESS_PATH,
            request.meeting_id,
            status
        );
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(SubmitError::Server {
                status: status.as_u16(),
                message: error_detail(status, &body),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        serde_json::from_slice(&body)
            .map_err(|err| SubmitError::Transport(format!("invalid response body: {err}")))
    }

    async fn fetch_artifact(&self, file_name: &str) -> Result<FetchedArtifact, FetchError> {
        let url = self.artifact_url(file_name)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        engine_debug!("GET artifact {} -> {}", file_name, status);
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_artifact_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "artifact too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "artifact too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchedArtifact {
            bytes,
            content_type,
        })
    }

    async fn health(&self) -> Result<String, FetchError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        value
            .get("status")
            .and_then(|status| status.as_str())
            .map(str::to_string)
            .ok_or_else(|| FetchError::new(FailureKind::Decode, "health response has no status"))
    }
}

/// Best available message for a failed processing call: the `detail` field of a JSON
/// error body, else the status reason phrase.
fn error_detail(status: StatusCode, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned());
    match detail {
        Some(serde_json::Value::String(text)) if !text.is_empty() => text,
        Some(value) if is_truthy(&value) => value.to_string(),
        _ => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string()),
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::String(text) => !text.is_empty(),
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
