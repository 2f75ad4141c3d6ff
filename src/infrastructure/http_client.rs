//! HTTP client for the store product listing API
//!
//! Sends `PUT <endpoint>` with a JSON `{"page": n}` body and decodes the JSON
//! array of products that comes back. Failed attempts go through the
//! configured [`RetryPolicy`], and requests can be throttled.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::{
    Client,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::retry::RetryPolicy;
use crate::domain::errors::FetchError;
use crate::domain::product::{PageRequest, Product};
use crate::domain::services::ProductSource;

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    /// 0 disables throttling
    pub max_requests_per_second: u32,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("store-pager/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: 30,
            max_requests_per_second: 0,
        }
    }
}

/// Client for one products endpoint
pub struct ProductApiClient {
    client: Client,
    endpoint: Url,
    retry: RetryPolicy,
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl ProductApiClient {
    pub fn new(
        endpoint: &str,
        config: &HttpClientConfig,
        retry: RetryPolicy,
    ) -> Result<Self, FetchError> {
        let endpoint = Url::parse(endpoint).map_err(|e| FetchError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| FetchError::Transport {
                url: endpoint.to_string(),
                message: format!("failed to create HTTP client: {e}"),
            })?;

        let rate_limiter = NonZeroU32::new(config.max_requests_per_second)
            .map(|rps| RateLimiter::direct(Quota::per_second(rps)));

        Ok(Self {
            client,
            endpoint,
            retry,
            rate_limiter,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// One request, no retry
    async fn put_page(&self, request: &PageRequest) -> Result<Vec<Product>, FetchError> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.endpoint.as_str();
        debug!("PUT {} page={}", url, request.page);

        let response = self
            .client
            .put(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(url, &e))?;

        serde_json::from_slice::<Vec<Product>>(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ProductSource for ProductApiClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Product>, FetchError> {
        let label = format!("Fetching page {}", request.page);
        let products = self.retry.run(&label, |_| self.put_page(request)).await?;
        info!(
            "Fetched {} products for page {} from {}",
            products.len(),
            request.page,
            self.endpoint
        );
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_retry(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay_ms: 1,
            max_delay_ms: 5,
            ..RetryPolicy::default()
        }
    }

    fn client_for(server: &MockServer, retry: RetryPolicy) -> ProductApiClient {
        let endpoint = format!("{}/api/v1/stores/s1/products/", server.uri());
        ProductApiClient::new(&endpoint, &HttpClientConfig::default(), retry).unwrap()
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = ProductApiClient::new(
            "not a url",
            &HttpClientConfig::default(),
            RetryPolicy::default(),
        );
        assert!(matches!(result, Err(FetchError::InvalidEndpoint { .. })));
    }

    #[tokio::test]
    async fn test_put_with_page_payload() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/stores/s1/products/"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"page": 3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "a", "name": "Rice", "price_count": 1, "latest_price": {"amount": 120.5}},
                {"id": "b", "name": "Beans", "price_count": 0, "latest_price": null}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, fast_retry(3));
        let products = client.fetch_page(&PageRequest::new(3)).await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Rice");
        assert_eq!(products[0].latest_amount(), Some(120.5));
        assert_eq!(products[1].latest_amount(), None);
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, fast_retry(3));
        let products = client.fetch_page(&PageRequest::new(1)).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, fast_retry(3));
        let err = client.fetch_page(&PageRequest::new(1)).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_single_attempt_policy() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, RetryPolicy::no_retry());
        let err = client.fetch_page(&PageRequest::new(1)).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, fast_retry(3));
        let err = client.fetch_page(&PageRequest::new(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }
}
