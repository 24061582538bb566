//! Gallery use case: fetch a page of photos for a tag and map it for display

use std::num::NonZeroU32;
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::model::{SearchResult, Size};
use super::repository::{SearchByTagRepository, SearchRequest, Tag, DEFAULT_PER_PAGE};
use crate::error::{ApiError, Outcome, PlayboxError, Result};

/// Which page to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestParams {
    First { tag: Tag },
    Page { tag: Tag, page: NonZeroU32 },
}

impl RequestParams {
    pub fn first(tag: &str) -> Result<Self> {
        Ok(RequestParams::First { tag: Tag::new(tag)? })
    }

    pub fn page(tag: &str, page: u32) -> Result<Self> {
        let page = NonZeroU32::new(page)
            .ok_or_else(|| PlayboxError::InvalidInput("Page must be at least 1".to_string()))?;
        Ok(RequestParams::Page {
            tag: Tag::new(tag)?,
            page,
        })
    }

    pub fn tag(&self) -> &Tag {
        match self {
            RequestParams::First { tag } | RequestParams::Page { tag, .. } => tag,
        }
    }

    pub fn page_number(&self) -> NonZeroU32 {
        match self {
            RequestParams::First { .. } => NonZeroU32::MIN,
            RequestParams::Page { page, .. } => *page,
        }
    }
}

pub struct GalleryUseCase {
    repository: Arc<SearchByTagRepository>,
    per_page: NonZeroU32,
    size: Size,
}

impl GalleryUseCase {
    pub fn new(repository: SearchByTagRepository) -> Self {
        Self {
            repository: Arc::new(repository),
            per_page: DEFAULT_PER_PAGE,
            size: Size::default(),
        }
    }

    pub fn with_per_page(mut self, per_page: NonZeroU32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn request(&self, params: &RequestParams) -> SearchRequest {
        SearchRequest::from_parts(params.tag().clone(), params.page_number(), self.per_page)
    }

    /// Fetch and map one page
    ///
    /// The call and the mapping run on a spawned task so the caller's task is
    /// never blocked on the network. Errors pass through unchanged; a task
    /// that dies before answering is reported as a transport failure.
    pub async fn get(&self, params: RequestParams) -> Outcome<SearchResult> {
        let request = self.request(&params);
        let repository = Arc::clone(&self.repository);
        let size = self.size;

        tracing::info!(
            tag = %request.tag(),
            page = request.page(),
            per_page = request.per_page(),
            "Searching photos"
        );

        let mut task = AbortOnDrop(tokio::spawn(async move {
            repository
                .get(&request)
                .await
                .map(|response| response.photos.to_result(size))
        }));

        let outcome = match (&mut task.0).await {
            Ok(outcome) => outcome,
            Err(join_error) => Err(ApiError::transport(join_error)),
        };

        match &outcome {
            Ok(result) => tracing::info!(photos = result.photos.len(), "Search finished"),
            Err(e) => tracing::warn!(error = %e, "Search failed"),
        }

        outcome
    }
}

// Cancelling the caller cancels the fetch too
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}
