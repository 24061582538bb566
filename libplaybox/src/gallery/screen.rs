//! Gallery screen state

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;

use super::model::{PhotoRecord, SearchResult};
use super::usecase::{GalleryUseCase, RequestParams};
use crate::error::Outcome;

/// Everything the gallery screen renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GalleryScreenState {
    #[default]
    Loading,
    Loaded {
        photos: Vec<PhotoRecord>,
    },
    /// The fetch failed; renders as an empty gallery but keeps the reason
    Failed {
        message: String,
        cause: Option<String>,
    },
}

impl GalleryScreenState {
    pub fn from_outcome(outcome: Outcome<SearchResult>) -> Self {
        match outcome {
            Ok(result) => GalleryScreenState::Loaded {
                photos: result.photos,
            },
            Err(error) => GalleryScreenState::Failed {
                message: error.message(),
                cause: error.cause().map(|cause| cause.to_string()),
            },
        }
    }

    /// Photos to show; empty while loading or after a failure
    pub fn photos(&self) -> &[PhotoRecord] {
        match self {
            GalleryScreenState::Loaded { photos } => photos,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, GalleryScreenState::Loading)
    }
}

/// Runs one gallery fetch and publishes the resulting screen state
///
/// Dropping the view model cancels a fetch still in flight.
pub struct GalleryViewModel {
    state: watch::Receiver<GalleryScreenState>,
    task: JoinHandle<()>,
}

impl GalleryViewModel {
    pub fn spawn(use_case: Arc<GalleryUseCase>, params: RequestParams) -> Self {
        let (sender, state) = watch::channel(GalleryScreenState::Loading);

        let task = tokio::spawn(async move {
            let outcome = use_case.get(params).await;
            let _ = sender.send(GalleryScreenState::from_outcome(outcome));
        });

        Self { state, task }
    }

    pub fn current(&self) -> GalleryScreenState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GalleryScreenState> {
        self.state.clone()
    }

    /// Stream of states, starting with the current one
    pub fn states(&self) -> WatchStream<GalleryScreenState> {
        WatchStream::new(self.state.clone())
    }

    /// Wait until the fetch has settled and return the final state
    pub async fn settled(&mut self) -> GalleryScreenState {
        while self.state.borrow_and_update().is_loading() {
            if self.state.changed().await.is_err() {
                break;
            }
        }
        self.current()
    }
}

impl Drop for GalleryViewModel {
    fn drop(&mut self) {
        self.task.abort();
    }
}
