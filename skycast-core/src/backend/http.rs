use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

use super::{AnalysisRequest, AnalysisResponse, WeatherBackend};
use crate::error::FetchError;

/// HTTP client for the external weather-analysis service.
///
/// One POST per call, no retry and no client-side timeout; the request runs
/// to completion or transport failure.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            http: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherBackend for HttpBackend {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, FetchError> {
        let res = self
            .http
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %self.endpoint(), "weather backend unreachable");
                FetchError::Transport(e)
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            error!(error = %e, "failed to read weather backend response body");
            FetchError::Transport(e)
        })?;

        if !status.is_success() {
            error!(%status, "weather backend request failed");
            return Err(FetchError::Backend { status, body });
        }

        serde_json::from_str(&body).map_err(FetchError::Malformed)
    }
}
