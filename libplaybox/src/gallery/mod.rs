//! Photo gallery backed by Flickr tag search
//!
//! Data flows one way: [`FlickrApi`] → [`api_call`] (normalizes into an
//! [`Outcome`](crate::Outcome)) → [`SearchByTagRepository`] →
//! [`GalleryUseCase`] (maps to [`PhotoRecord`]s) → [`GalleryViewModel`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use libplaybox::gallery::{
//!     GalleryUseCase, HttpFlickrApi, RequestParams, SearchByTagRepository,
//! };
//! use secrecy::SecretString;
//!
//! # async fn example() -> libplaybox::Result<()> {
//! let api = HttpFlickrApi::new("https://api.flickr.com/", None)?;
//! let repository = SearchByTagRepository::new(
//!     SecretString::from("my-api-key".to_string()),
//!     Arc::new(api),
//! );
//! let use_case = GalleryUseCase::new(repository);
//!
//! match use_case.get(RequestParams::first("NASA")?).await {
//!     Ok(result) => {
//!         for photo in result.photos {
//!             println!("{} {}", photo.title, photo.url);
//!         }
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod http;
pub mod model;
pub mod repository;
pub mod screen;
pub mod usecase;

// Mock api is available for all builds (not just tests) to support integration tests
pub mod mock;

pub use api::{api_call, ApiResponse, FlickrApi, PhotoEntity, SearchPhotosEntity, SearchQuery, SearchResponse};
pub use http::HttpFlickrApi;
pub use model::{PhotoRecord, SearchResult, Size};
pub use repository::{SearchByTagRepository, SearchRequest, Tag};
pub use screen::{GalleryScreenState, GalleryViewModel};
pub use usecase::{GalleryUseCase, RequestParams};
