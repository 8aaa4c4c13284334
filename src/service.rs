// HTTP transport for the wizard service. Rendering and session state live in
// `chat`; this module only speaks JSON over reqwest.

use std::collections::BTreeMap;
use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, instrument};

use crate::protocol::{LogoReply, LogoRequest, ProcessReply, ProcessRequest, StartReply};

/// Single failure taxonomy: every variant means "the request failed" to the
/// user; the variants exist for the diagnostic log only.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {endpoint} failed with status {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("failed to write logo to {path}: {source}")]
    Download {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub struct BrandService {
    http: Client,
    base_url: String,
}

impl BrandService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        BrandService {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self))]
    pub async fn start_conversation(&self) -> Result<StartReply, ServiceError> {
        const ENDPOINT: &str = "/start_conversation";
        let response = self
            .http
            .post(self.endpoint(ENDPOINT))
            .send()
            .await
            .map_err(|source| ServiceError::Request {
                endpoint: ENDPOINT,
                source,
            })?;
        Self::check_status(ENDPOINT, &response)?;

        let reply: StartReply = response
            .json()
            .await
            .map_err(|source| ServiceError::Request {
                endpoint: ENDPOINT,
                source,
            })?;
        debug!(conversation_id = %reply.conversation_id, "conversation started");
        Ok(reply)
    }

    #[instrument(skip(self, user_response))]
    pub async fn process_response(
        &self,
        conversation_id: Option<&str>,
        user_response: &str,
    ) -> Result<ProcessReply, ServiceError> {
        const ENDPOINT: &str = "/process_response";
        let payload = ProcessRequest {
            conversation_id,
            user_response,
        };
        let response = self
            .http
            .post(self.endpoint(ENDPOINT))
            .json(&payload)
            .send()
            .await
            .map_err(|source| ServiceError::Request {
                endpoint: ENDPOINT,
                source,
            })?;
        Self::check_status(ENDPOINT, &response)?;

        let reply: ProcessReply = response
            .json()
            .await
            .map_err(|source| ServiceError::Request {
                endpoint: ENDPOINT,
                source,
            })?;
        debug!(stage = ?reply.stage, next_step = ?reply.next_step, "reply received");
        Ok(reply)
    }

    #[instrument(skip(self, brand_details))]
    pub async fn generate_logo(
        &self,
        brand_details: &BTreeMap<String, String>,
    ) -> Result<LogoReply, ServiceError> {
        const ENDPOINT: &str = "/generate_logo";
        let payload = LogoRequest { brand_details };
        let response = self
            .http
            .post(self.endpoint(ENDPOINT))
            .json(&payload)
            .send()
            .await
            .map_err(|source| ServiceError::Request {
                endpoint: ENDPOINT,
                source,
            })?;
        Self::check_status(ENDPOINT, &response)?;

        response
            .json()
            .await
            .map_err(|source| ServiceError::Request {
                endpoint: ENDPOINT,
                source,
            })
    }

    /// Fetch the generated image and stream it to `dest`. `logo_path` may be
    /// absolute or relative to the service base URL.
    #[instrument(skip(self))]
    pub async fn download_logo(&self, logo_path: &str, dest: &Path) -> Result<(), ServiceError> {
        const ENDPOINT: &str = "/download_logo";
        let url = if logo_path.starts_with("http://") || logo_path.starts_with("https://") {
            logo_path.to_string()
        } else {
            format!("{}/{}", self.base_url, logo_path.trim_start_matches('/'))
        };

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ServiceError::Request {
                endpoint: ENDPOINT,
                source,
            })?;
        Self::check_status(ENDPOINT, &response)?;

        let mut file =
            tokio::fs::File::create(dest)
                .await
                .map_err(|source| ServiceError::Download {
                    path: dest.display().to_string(),
                    source,
                })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|source| ServiceError::Request {
                endpoint: ENDPOINT,
                source,
            })?;
            file.write_all(&bytes)
                .await
                .map_err(|source| ServiceError::Download {
                    path: dest.display().to_string(),
                    source,
                })?;
        }
        file.flush()
            .await
            .map_err(|source| ServiceError::Download {
                path: dest.display().to_string(),
                source,
            })?;

        debug!(dest = %dest.display(), "logo saved");
        Ok(())
    }

    fn check_status(endpoint: &'static str, response: &reqwest::Response) -> Result<(), ServiceError> {
        let status = response.status();
        if !status.is_success() {
            error!(%status, endpoint, "wizard service request failed");
            return Err(ServiceError::Status { endpoint, status });
        }
        Ok(())
    }
}
