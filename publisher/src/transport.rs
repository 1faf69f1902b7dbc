//! Pluggable URL loading.
//!
//! Embedders route requests through their own network stack by implementing
//! [`UrlLoader`]; [`HttpLoader`] is the direct reqwest implementation used
//! by the CLI. One attempt per request; retry policy, if any, belongs to
//! the loader.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::PublisherError;

/// HTTP method for a [`UrlRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlMethod {
    Get,
    Post,
}

/// A single outbound request.
#[derive(Clone, Debug)]
pub struct UrlRequest {
    pub url: String,
    pub method: UrlMethod,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl UrlRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: UrlMethod::Get,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }
}

/// Response delivered by a [`UrlLoader`].
#[derive(Clone, Debug)]
pub struct UrlResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
    pub headers: HashMap<String, String>,
}

impl UrlResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Issues requests on behalf of the client.
#[async_trait]
pub trait UrlLoader: Send + Sync {
    async fn load(&self, request: UrlRequest) -> Result<UrlResponse, PublisherError>;
}

/// reqwest-backed loader with a per-request timeout.
pub struct HttpLoader {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpLoader {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait]
impl UrlLoader for HttpLoader {
    async fn load(&self, request: UrlRequest) -> Result<UrlResponse, PublisherError> {
        let mut builder = match request.method {
            UrlMethod::Get => self.client.get(&request.url),
            UrlMethod::Post => self.client.post(&request.url).body(request.body),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PublisherError::Transport(e.to_string()))?;

        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|text| (name.to_string(), text.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| PublisherError::Transport(e.to_string()))?
            .to_vec();

        Ok(UrlResponse {
            status_code,
            body,
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_request_has_no_body_or_headers() {
        let request = UrlRequest::get("https://example.org/channel/a1b2");
        assert_eq!(request.method, UrlMethod::Get);
        assert!(request.headers.is_empty());
        assert!(request.body.is_empty());
    }

    #[test]
    fn success_covers_the_2xx_range() {
        let mut response = UrlResponse {
            status_code: 200,
            body: Vec::new(),
            headers: HashMap::new(),
        };
        assert!(response.is_success());
        response.status_code = 204;
        assert!(response.is_success());
        response.status_code = 404;
        assert!(!response.is_success());
        response.status_code = 500;
        assert!(!response.is_success());
    }
}
