//! HTTP client wrapper shared by the search and summarization clients

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::runtime::Runtime;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("request failed: {message}")]
    RequestFailed { message: String },
    #[error("rate limited")]
    RateLimited,
    #[error("could not read response body: {message}")]
    BodyError { message: String },
}

#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            user_agent: user_agent.to_string(),
        }
    }

    pub async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| HttpError::RequestFailed {
                message: e.to_string(),
            })?;

        Self::read_response(response).await
    }

    /// POST a JSON body, optionally with a bearer token
    pub async fn post_json(
        &self,
        url: &str,
        bearer_token: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, HttpError> {
        let mut request = self
            .client
            .post(url)
            .header("User-Agent", &self.user_agent)
            .json(body);
        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| HttpError::RequestFailed {
            message: e.to_string(),
        })?;

        Self::read_response(response).await
    }

    async fn read_response(response: reqwest::Response) -> Result<HttpResponse, HttpError> {
        let status = response.status().as_u16();

        if status == 429 {
            return Err(HttpError::RateLimited);
        }

        let body = response.text().await.map_err(|e| HttpError::BodyError {
            message: e.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new("paperdesk/0.1")
    }
}

/// Shared tokio runtime for the blocking client wrappers
pub(crate) fn runtime() -> &'static Runtime {
    static RUNTIME: std::sync::OnceLock<Runtime> = std::sync::OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create tokio runtime"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent() {
        let client = HttpClient::default();
        assert_eq!(client.user_agent, "paperdesk/0.1");
    }
}
