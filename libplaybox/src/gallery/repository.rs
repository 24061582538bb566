//! Validated search requests and the tag search repository

use std::num::NonZeroU32;
use std::sync::Arc;

use secrecy::SecretString;

use super::api::{api_call, FlickrApi, SearchQuery, SearchResponse};
use crate::error::{Outcome, PlayboxError, Result};

pub const DEFAULT_PER_PAGE: NonZeroU32 = match NonZeroU32::new(50) {
    Some(n) => n,
    None => unreachable!(),
};

/// Non-empty search tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag(String);

impl Tag {
    pub fn new(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(PlayboxError::InvalidInput(
                "Search tag cannot be empty".to_string(),
            ));
        }
        Ok(Self(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    tag: Tag,
    page: NonZeroU32,
    per_page: NonZeroU32,
}

impl SearchRequest {
    /// Validate raw parameters
    pub fn new(tag: &str, page: u32, per_page: u32) -> Result<Self> {
        let page = NonZeroU32::new(page)
            .ok_or_else(|| PlayboxError::InvalidInput("Page must be at least 1".to_string()))?;
        let per_page = NonZeroU32::new(per_page).ok_or_else(|| {
            PlayboxError::InvalidInput("Page size must be at least 1".to_string())
        })?;

        Ok(Self::from_parts(Tag::new(tag)?, page, per_page))
    }

    pub fn from_parts(tag: Tag, page: NonZeroU32, per_page: NonZeroU32) -> Self {
        Self {
            tag,
            page,
            per_page,
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn page(&self) -> u32 {
        self.page.get()
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.get()
    }
}

/// Issues tag searches with the configured api key
pub struct SearchByTagRepository {
    api_key: SecretString,
    api: Arc<dyn FlickrApi>,
}

impl SearchByTagRepository {
    pub fn new(api_key: SecretString, api: Arc<dyn FlickrApi>) -> Self {
        Self { api_key, api }
    }

    pub async fn get(&self, request: &SearchRequest) -> Outcome<SearchResponse> {
        let query = SearchQuery {
            api_key: &self.api_key,
            tags: request.tag().as_str(),
            per_page: request.per_page(),
            page: request.page(),
        };

        api_call(self.api.search_by_tag(&query)).await
    }
}
