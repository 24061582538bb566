//! Flickr search api: wire entities, the api seam and outcome normalization

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ApiError, Outcome};

pub const METHOD_PHOTOS_SEARCH: &str = "flickr.photos.search";

const FORMAT_JSON: &str = "json";
const JSON_CALLBACK_NO: u8 = 1;
const PRIVACY_PUBLIC: u8 = 1;
const SAFE_SEARCH_SAFE: u8 = 1;
const CONTENT_TYPE_PHOTOS: u8 = 1;
const SORT_RELEVANCE: &str = "relevance";

/// Failure of the call itself, before any status could be classified
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub photos: SearchPhotosEntity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPhotosEntity {
    #[serde(deserialize_with = "lenient_u32")]
    pub page: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub pages: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub perpage: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub total: String,
    #[serde(default)]
    pub photo: Vec<PhotoEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntity {
    pub id: String,
    pub server: String,
    #[serde(default)]
    pub title: String,
    pub secret: String,
}

// Flickr is inconsistent about quoting numbers across endpoints and versions
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(text) => text,
        StringOrNumber::Number(number) => number.to_string(),
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(text) => text.trim().parse().map_err(D::Error::custom),
        StringOrNumber::Number(number) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| D::Error::custom(format!("expected a page number, got {}", number))),
    }
}

/// Parameters of one search call as sent over the wire
pub struct SearchQuery<'a> {
    pub api_key: &'a SecretString,
    pub tags: &'a str,
    pub per_page: u32,
    pub page: u32,
}

impl SearchQuery<'_> {
    /// Query string pairs, including the fixed Flickr parameters
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("api_key", self.api_key.expose_secret().to_string()),
            ("method", METHOD_PHOTOS_SEARCH.to_string()),
            ("format", FORMAT_JSON.to_string()),
            ("nojsoncallback", JSON_CALLBACK_NO.to_string()),
            ("privacy_filter", PRIVACY_PUBLIC.to_string()),
            ("safe_search", SAFE_SEARCH_SAFE.to_string()),
            ("content_type", CONTENT_TYPE_PHOTOS.to_string()),
            ("sort", SORT_RELEVANCE.to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
            ("tags", self.tags.to_string()),
        ]
    }
}

/// Raw response of an api call: status plus an optional decoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: u16, body: Option<T>) -> Self {
        Self { status, body }
    }

    pub fn ok(body: T) -> Self {
        Self::new(200, Some(body))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Seam between the gallery pipeline and the remote search endpoint
#[async_trait]
pub trait FlickrApi: Send + Sync {
    async fn search_by_tag(
        &self,
        query: &SearchQuery<'_>,
    ) -> Result<ApiResponse<SearchResponse>, TransportError>;
}

/// Run an api call once and classify what came back
///
/// - success with a body → `Ok(body)`
/// - success without a body → [`ApiError::EmptyBody`]
/// - any other status → [`ApiError::Status`]
/// - the call failing → [`ApiError::Transport`] carrying the original error
///
/// Nothing is retried.
pub async fn api_call<T, F>(call: F) -> Outcome<T>
where
    F: Future<Output = Result<ApiResponse<T>, TransportError>>,
{
    match call.await {
        Ok(response) if response.is_success() => response.body.ok_or(ApiError::EmptyBody),
        Ok(response) => Err(ApiError::status(response.status)),
        Err(cause) => Err(ApiError::Transport(Arc::from(cause))),
    }
}
