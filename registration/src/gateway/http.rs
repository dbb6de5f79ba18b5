use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info, warn};

use super::{Ack, Application, SubmissionGateway};
use crate::config::GatewayConfig;
use crate::util::errors::SubmissionError;

/// JSON-over-HTTP gateway: `POST {base_url}/api/{flow}/applications`.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        })
    }

    /// `None` when no base URL is configured.
    pub fn from_config(config: &GatewayConfig) -> reqwest::Result<Option<Self>> {
        let Some(base_url) = config.base_url.as_deref() else {
            return Ok(None);
        };
        let gateway = Self::new(base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(Some(match &config.api_key {
            Some(key) => gateway.with_api_key(key.clone()),
            None => gateway,
        }))
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn endpoint(&self, flow: &str) -> String {
        format!("{}/api/{}/applications", self.base_url, flow)
    }
}

#[async_trait]
impl<S> SubmissionGateway<S> for HttpGateway
where
    S: Serialize + Send + Sync + 'static,
{
    async fn submit_application(&self, application: &Application<S>) -> Result<Ack, SubmissionError> {
        let url = self.endpoint(application.flow);
        info!(%url, application_id = %application.application_id, "posting application");

        let mut request = self
            .client
            .post(&url)
            .header("Idempotency-Key", application.application_id.to_string())
            .json(application);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!(%url, error = %e, "gateway request failed");
            SubmissionError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(%url, error = %e, "could not read rejection body");
                    String::new()
                }
            };
            error!(%url, status = status.as_u16(), %message, "application rejected");
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Ack>().await.map_err(|e| {
            error!(%url, error = %e, "could not read acknowledgement");
            read_failure(e)
        })
    }
}

/// Only a body that arrived in full and failed to parse is a decode error;
/// a timeout or broken stream while reading is a transport failure.
fn read_failure(e: reqwest::Error) -> SubmissionError {
    if e.is_decode() && !e.is_timeout() {
        SubmissionError::Decode(e.to_string())
    } else {
        SubmissionError::Transport(e.to_string())
    }
}
