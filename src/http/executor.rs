use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

use crate::{args::DEFAULT_USER_AGENT, error::HttpError, metrics::Outcome};

use super::Target;

/// Performs one request attempt and classifies it.
///
/// Implementations never fail: every transport problem becomes
/// [`Outcome::Error`].
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self) -> Outcome;
}

/// GETs the target once per call. The body is never read.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    target: Target,
}

impl HttpExecutor {
    /// Builds the shared HTTP client with the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(target: Target, request_timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(Target::headers())
            .build()
            .map_err(|err| HttpError::BuildClientFailed { source: err })?;
        Ok(Self { client, target })
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self) -> Outcome {
        match self.client.get(self.target.url().clone()).send().await {
            Ok(response) => Outcome::Status(response.status().as_u16()),
            Err(err) => {
                let message = describe_transport_error(&err);
                error!("Request error: {}", message);
                Outcome::Error(message)
            }
        }
    }
}

/// reqwest's `Display` omits the underlying cause (refused, reset, DNS), so
/// the source chain is appended.
fn describe_transport_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
