pub mod mapping;
pub mod models;

use lenz_core::error::{ToolError, ToolResult};
use lenz_core::params::{RandomParams, SearchParams};
use lenz_core::redact::redact_secrets;
use models::{ApiPhoto, RandomResponse, SearchResponse};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode};
use std::time::{Duration, Instant};
use url::Url;

#[derive(Debug, Clone)]
pub struct UnsplashConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.unsplash.com".into(),
            timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct UnsplashClient {
    client: Client,
    base_url: Url,
}

impl UnsplashClient {
    pub fn new(config: &UnsplashConfig) -> ToolResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ToolError::Transport {
            message: format!("invalid base_url: {e}"),
        })?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ToolError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self { client, base_url })
    }

    /// Probe the photos-listing endpoint to confirm the key is accepted.
    ///
    /// Only HTTP 200 counts as acceptance; every other status maps to the
    /// shared error taxonomy.
    pub async fn check_credentials(&self, access_key: &str) -> ToolResult<()> {
        let url = self.join("photos")?;
        tracing::debug!(url = %url, "probing Unsplash API key");
        let resp = self
            .authorized_get(url, access_key)
            .send()
            .await
            .map_err(Self::transport_error)?;
        if resp.status() != StatusCode::OK {
            return Err(Self::error_from_response(resp).await);
        }
        Ok(())
    }

    pub async fn search_photos(
        &self,
        access_key: &str,
        params: &SearchParams,
    ) -> ToolResult<SearchResponse> {
        let url = self.join("search/photos")?;
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("per_page", params.per_page.to_string()),
            ("page", "1".to_string()),
        ];
        if let Some(orientation) = &params.orientation {
            query.push(("orientation", orientation.clone()));
        }
        if let Some(color) = &params.color {
            query.push(("color", color.clone()));
        }

        let started = Instant::now();
        let resp = self
            .authorized_get(url, access_key)
            .query(&query)
            .send()
            .await
            .map_err(Self::transport_error)?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }
        let response: SearchResponse = resp.json().await.map_err(Self::transport_error)?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search request completed"
        );
        Ok(response)
    }

    pub async fn random_photos(
        &self,
        access_key: &str,
        params: &RandomParams,
    ) -> ToolResult<Vec<ApiPhoto>> {
        let url = self.join("photos/random")?;
        let mut query: Vec<(&str, String)> = vec![("count", params.count.to_string())];
        if let Some(q) = &params.query {
            query.push(("query", q.clone()));
        }
        if let Some(orientation) = &params.orientation {
            query.push(("orientation", orientation.clone()));
        }
        if let Some(color) = &params.color {
            query.push(("color", color.clone()));
        }

        let started = Instant::now();
        let resp = self
            .authorized_get(url, access_key)
            .query(&query)
            .send()
            .await
            .map_err(Self::transport_error)?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }
        let response: RandomResponse = resp.json().await.map_err(Self::transport_error)?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "random request completed"
        );
        Ok(response.into_photos())
    }

    /// Fetch raw image bytes. Image URLs point at the CDN and carry their
    /// own signing, so no API authorization header is attached.
    pub async fn download_image(&self, url: &str) -> ToolResult<Vec<u8>> {
        tracing::info!(url = %redact_secrets(url), "downloading image");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ToolError::Download {
                message: e.to_string(),
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ToolError::Download {
                message: format!("status {status} for {url}"),
            });
        }
        let bytes = resp.bytes().await.map_err(|e| ToolError::Download {
            message: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }

    fn join(&self, path: &str) -> ToolResult<Url> {
        self.base_url.join(path).map_err(|e| ToolError::Transport {
            message: e.to_string(),
        })
    }

    fn authorized_get(&self, url: Url, access_key: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(AUTHORIZATION, format!("Client-ID {access_key}"))
    }

    fn transport_error(err: reqwest::Error) -> ToolError {
        let message = err.to_string();
        tracing::error!(error = %redact_secrets(&message), "request failed");
        ToolError::Transport { message }
    }

    async fn error_from_response(resp: Response) -> ToolError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED => ToolError::InvalidCredentials {
                message: "Invalid Unsplash Access Key".into(),
            },
            StatusCode::FORBIDDEN => ToolError::PermissionDenied {
                message: "Unsplash API permission denied, please check your application status"
                    .into(),
            },
            StatusCode::TOO_MANY_REQUESTS => ToolError::RateLimited {
                message: "Exceeded Unsplash API request limit, please try again later".into(),
            },
            status => ToolError::Upstream {
                status: status.as_u16(),
                body,
            },
        }
    }
}
