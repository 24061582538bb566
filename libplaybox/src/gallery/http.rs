//! reqwest-backed implementation of [`FlickrApi`]

use std::time::Duration;

use async_trait::async_trait;

use super::api::{ApiResponse, FlickrApi, SearchQuery, SearchResponse, TransportError};
use crate::error::{ApiError, Result};

/// Path of the REST endpoint below the base url
const REST_PATH: &str = "services/rest/";

pub struct HttpFlickrApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFlickrApi {
    /// Build a client with an optional request timeout
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::transport)?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, REST_PATH)
    }
}

#[async_trait]
impl FlickrApi for HttpFlickrApi {
    async fn search_by_tag(
        &self,
        query: &SearchQuery<'_>,
    ) -> std::result::Result<ApiResponse<SearchResponse>, TransportError> {
        tracing::debug!(
            tags = query.tags,
            page = query.page,
            per_page = query.per_page,
            "GET {}",
            self.endpoint()
        );

        let response = self
            .client
            .get(self.endpoint())
            .query(&query.to_query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(ApiResponse::new(status.as_u16(), None));
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse::new(status.as_u16(), None));
        }

        // A literal `null` body decodes to `None` like an empty one
        let body: Option<SearchResponse> = serde_json::from_slice(&bytes)?;
        Ok(ApiResponse::new(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let api = HttpFlickrApi::with_client(reqwest::Client::new(), "https://api.flickr.com/");
        assert_eq!(api.endpoint(), "https://api.flickr.com/services/rest/");

        let api = HttpFlickrApi::with_client(reqwest::Client::new(), "http://127.0.0.1:8080");
        assert_eq!(api.endpoint(), "http://127.0.0.1:8080/services/rest/");
    }

    #[test]
    fn test_new_with_timeout() {
        let api = HttpFlickrApi::new("https://api.flickr.com", Some(Duration::from_secs(5)));
        assert!(api.is_ok());
    }
}
