//! Mock Flickr api for testing
//!
//! Available in all builds so integration tests and the binaries' tests can
//! drive the gallery pipeline without network access or an api key.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use super::api::{
    ApiResponse, FlickrApi, PhotoEntity, SearchPhotosEntity, SearchQuery, SearchResponse,
    TransportError,
};

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with the given body (`None` for an empty body)
    Respond {
        status: u16,
        body: Option<SearchResponse>,
    },
    /// The call fails before a response arrives
    Fail(String),
}

/// One recorded call; the api key is deliberately not recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub tags: String,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct MockFailure(String);

#[derive(Clone)]
pub struct MockFlickrApi {
    reply: MockReply,
    delay: Duration,
    calls: Arc<Mutex<Vec<RecordedQuery>>>,
}

impl MockFlickrApi {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            delay: Duration::from_millis(0),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 200 with the given response
    pub fn success(response: SearchResponse) -> Self {
        Self::new(MockReply::Respond {
            status: 200,
            body: Some(response),
        })
    }

    /// 200 with one page of the given photos
    pub fn with_photos(photos: Vec<PhotoEntity>) -> Self {
        Self::success(sample_response(photos))
    }

    /// 200 without a body
    pub fn empty_body() -> Self {
        Self::new(MockReply::Respond {
            status: 200,
            body: None,
        })
    }

    /// Non-success status
    pub fn status(status: u16) -> Self {
        Self::new(MockReply::Respond { status, body: None })
    }

    /// The call itself fails
    pub fn failure(message: &str) -> Self {
        Self::new(MockReply::Fail(message.to_string()))
    }

    /// Delay every call, to simulate latency
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FlickrApi for MockFlickrApi {
    async fn search_by_tag(
        &self,
        query: &SearchQuery<'_>,
    ) -> Result<ApiResponse<SearchResponse>, TransportError> {
        self.calls.lock().unwrap().push(RecordedQuery {
            tags: query.tags.to_string(),
            page: query.page,
            per_page: query.per_page,
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match &self.reply {
            MockReply::Respond { status, body } => Ok(ApiResponse::new(*status, body.clone())),
            MockReply::Fail(message) => Err(Box::new(MockFailure(message.clone()))),
        }
    }
}

/// Single-page response wrapping `photos`
pub fn sample_response(photos: Vec<PhotoEntity>) -> SearchResponse {
    SearchResponse {
        photos: SearchPhotosEntity {
            page: 1,
            pages: "1".to_string(),
            perpage: photos.len() as u32,
            total: photos.len().to_string(),
            photo: photos,
        },
    }
}

/// Photo entity with predictable fields derived from `id`
pub fn sample_photo(id: &str, title: &str) -> PhotoEntity {
    PhotoEntity {
        id: id.to_string(),
        server: "65535".to_string(),
        title: title.to_string(),
        secret: format!("secret{}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[tokio::test]
    async fn test_failure_reply_carries_message() {
        let api = MockFlickrApi::failure("timed out");
        let key = SecretString::from("test-key".to_string());
        let query = SearchQuery {
            api_key: &key,
            tags: "moon",
            per_page: 5,
            page: 2,
        };

        let error = api.search_by_tag(&query).await.unwrap_err();
        assert_eq!(error.to_string(), "timed out");

        assert_eq!(
            api.calls(),
            vec![RecordedQuery {
                tags: "moon".to_string(),
                page: 2,
                per_page: 5,
            }]
        );
    }
}
