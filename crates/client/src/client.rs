use paddyscan_core::{HistoryList, PredictionResult};
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ScannerConfig;
use crate::error::ClientError;
use crate::upload::ImageUpload;

/// Maximum length of a response body echoed into errors and logs.
pub const MAX_ERROR_BODY_LEN: usize = 200;

/// Client for the classification service API.
#[derive(Debug, Clone)]
pub struct ScannerClient {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: Url,
}

/// Error body shape the service uses for failures: `{"error": "..."}`.
#[derive(Deserialize)]
struct ServiceError {
    error: String,
}

#[derive(Deserialize)]
struct RootMessage {
    message: String,
}

impl ScannerClient {
    /// Creates a client for the service described by `config`.
    ///
    /// # Errors
    /// Returns an error if the base URL is not absolute or the HTTP client
    /// cannot be built (TLS backend failure).
    pub fn new(config: &ScannerConfig) -> Result<Self, ClientError> {
        // Trailing slash makes relative joins append instead of replacing the last segment.
        let raw = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(raw));
        }
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Returns the base URL, always ending in `/`.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url.join(path).map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Prepend the service origin to a relative image path from the history.
    ///
    /// Origin-relative paths (`/api/image/<id>`) replace the base path; other
    /// relative paths are joined under the base. Absolute URLs pass through.
    ///
    /// # Errors
    /// Returns an error if the combination is not a valid URL.
    pub fn resolve_image_url(&self, image_url: &str) -> Result<Url, ClientError> {
        self.endpoint(image_url)
    }

    /// Submit one image for classification.
    ///
    /// # Errors
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the body is not a prediction object.
    pub async fn predict(&self, upload: &ImageUpload) -> Result<PredictionResult, ClientError> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)?;
        let form = Form::new().part("file", part);

        let url = self.endpoint("predict/")?;
        tracing::debug!(%url, file = %upload.file_name, bytes = upload.len(), "submitting image");
        let response = self.client.post(url).multipart(form).send().await?;
        let body = success_body(response).await?;
        if let Ok(e) = serde_json::from_str::<ServiceError>(&body) {
            tracing::warn!(error = %e.error, "service reported failure with success status");
            return Err(ClientError::UnexpectedBody(e.error));
        }
        let result: PredictionResult = parse_json(&body, "prediction response")?;
        if !result.has_any_field() {
            return Err(ClientError::UnexpectedBody(format!(
                "prediction without disease, variety or age: {}",
                truncate(&body, MAX_ERROR_BODY_LEN)
            )));
        }
        tracing::info!(image_id = ?result.image_id, "prediction received");
        Ok(result)
    }

    /// Fetch the full history list as ordered by the service.
    ///
    /// # Errors
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the body is not an array of history items.
    pub async fn fetch_history(&self) -> Result<HistoryList, ClientError> {
        let url = self.endpoint("history/")?;
        let response = self.client.get(url).send().await?;
        let body = success_body(response).await?;
        let list: HistoryList = parse_json(&body, "history response")?;
        tracing::debug!(items = list.len(), "history fetched");
        Ok(list)
    }

    /// Download the stored image bytes for `image_id`.
    ///
    /// # Errors
    /// Returns an error if the request fails, the status is not a success, or
    /// the service answers with its JSON "not found" body instead of an image.
    pub async fn fetch_image(&self, image_id: &str) -> Result<Vec<u8>, ClientError> {
        let mut url = self.endpoint("image/")?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(image_id);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16(), response).await);
        }
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        let bytes = response.bytes().await?;
        if is_json {
            let message = serde_json::from_slice::<ServiceError>(&bytes).map_or_else(
                |_| truncate(&String::from_utf8_lossy(&bytes), MAX_ERROR_BODY_LEN).to_owned(),
                |e| e.error,
            );
            return Err(ClientError::UnexpectedBody(message));
        }
        Ok(bytes.to_vec())
    }

    /// Probe the service root and return its status message.
    ///
    /// # Errors
    /// Returns an error if the service is unreachable or answers unexpectedly.
    pub async fn health(&self) -> Result<String, ClientError> {
        let url = self.endpoint("/")?;
        let response = self.client.get(url).send().await?;
        let body = success_body(response).await?;
        let root: RootMessage = parse_json(&body, "health response")?;
        Ok(root.message)
    }
}

async fn success_body(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status.as_u16(), response).await);
    }
    Ok(response.text().await?)
}

async fn status_error(code: u16, response: reqwest::Response) -> ClientError {
    let raw = response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
    let body = serde_json::from_str::<ServiceError>(&raw)
        .map_or_else(|_| truncate(&raw, MAX_ERROR_BODY_LEN).to_owned(), |e| e.error);
    tracing::warn!(status = code, %body, "service returned error status");
    ClientError::HttpStatus { code, body }
}

fn parse_json<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::JsonParse {
        context: format!("{what} (body: {})", truncate(body, MAX_ERROR_BODY_LEN)),
        source: e,
    })
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
