use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::ClassificationResult,
    error::{ServiceErrorBody, GENERIC_CHECK_FAILURE},
    protocol::{
        analytics_route, check_route, health_route, history_limit, history_route, patterns_route,
        AnalyticsResponse, CheckRequest, HealthResponse, HistoryResponse, PatternsResponse,
    },
};
use tracing::{debug, warn};
use url::Url;

use crate::error::CheckError;

/// The remote verdict source. One call per user action, no retries.
#[async_trait]
pub trait ClassificationService: Send + Sync {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, CheckError>;
}

#[derive(Clone)]
pub struct HttpClassificationClient {
    http: Client,
    base: Url,
    check_url: Url,
}

impl HttpClassificationClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url.trim())
            .with_context(|| format!("invalid classification service url '{base_url}'"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let check_url = base.join(check_route())?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            base,
            check_url,
        })
    }

    pub fn check_url(&self) -> &Url {
        &self.check_url
    }

    pub async fn health(&self) -> anyhow::Result<HealthResponse> {
        self.get_json(self.base.join(health_route())?).await
    }

    /// Detector regexes grouped by category.
    pub async fn patterns(&self) -> anyhow::Result<PatternsResponse> {
        self.get_json(self.base.join(patterns_route())?).await
    }

    /// Most recent stored checks. `limit` is clamped to 1..=100.
    pub async fn history(&self, limit: u32) -> anyhow::Result<HistoryResponse> {
        let mut url = self.base.join(history_route())?;
        url.query_pairs_mut()
            .append_pair("limit", &history_limit(limit).to_string());
        self.get_json(url).await
    }

    pub async fn analytics(&self) -> anyhow::Result<AnalyticsResponse> {
        self.get_json(self.base.join(analytics_route())?).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> anyhow::Result<T> {
        debug!(%url, "fetching");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("failed to reach {url}"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ServiceErrorBody>(&body)
                .unwrap_or_default()
                .error
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| status.to_string());
            return Err(anyhow!("{url} returned {}: {message}", status.as_u16()));
        }
        response
            .json()
            .await
            .with_context(|| format!("failed to decode response from {url}"))
    }
}

#[async_trait]
impl ClassificationService for HttpClassificationClient {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, CheckError> {
        debug!(url = %self.check_url, chars = text.chars().count(), "sending check request");
        let response = self
            .http
            .post(self.check_url.clone())
            .json(&CheckRequest::new(text))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        interpret_response(status, &body)
    }
}

/// Maps a `/check` response to a verdict or a [`CheckError`].
pub(crate) fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> Result<ClassificationResult, CheckError> {
    if !status.is_success() {
        let error_body = serde_json::from_slice::<ServiceErrorBody>(body).unwrap_or_default();
        let message = error_body.message_or_generic();
        warn!(status = status.as_u16(), %message, "classification service rejected request");
        return Err(CheckError::Service {
            status: Some(status.as_u16()),
            message,
        });
    }

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|err| CheckError::Transport(format!("error decoding response body: {err}")))?;

    let result = match serde_json::from_value::<ClassificationResult>(value.clone()) {
        Ok(result) => result,
        Err(err) => {
            warn!(%err, "malformed classification payload");
            let error_body = serde_json::from_value::<ServiceErrorBody>(value).unwrap_or_default();
            return Err(CheckError::Service {
                status: Some(status.as_u16()),
                message: error_body.message_or_generic(),
            });
        }
    };

    if let Err(err) = result.validate() {
        warn!(%err, "classification payload violates result invariants");
        return Err(CheckError::Service {
            status: Some(status.as_u16()),
            message: GENERIC_CHECK_FAILURE.to_string(),
        });
    }

    Ok(result)
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
