//! Service facade wiring configuration to the clock and gallery cores
//!
//! Front ends build everything through [`PlayboxService`] so the config is
//! read in one place.
//!
//! ```no_run
//! use libplaybox::PlayboxService;
//!
//! # async fn example() -> libplaybox::Result<()> {
//! let service = PlayboxService::new()?;
//!
//! let clock = service.clock_engine()?.spawn();
//! clock.toggle();
//!
//! let gallery = service.gallery()?;
//! # Ok(())
//! # }
//! ```

use std::num::NonZeroU32;
use std::sync::Arc;

use secrecy::SecretString;

use crate::clock::{ClockEngine, SystemClock, TimeProvider};
use crate::error::{ConfigError, Result};
use crate::gallery::{
    FlickrApi, GalleryUseCase, GalleryViewModel, HttpFlickrApi, RequestParams,
    SearchByTagRepository,
};
use crate::Config;

pub struct PlayboxService {
    config: Arc<Config>,
}

impl PlayboxService {
    /// Create a service with configuration from the default location
    pub fn new() -> Result<Self> {
        Ok(Self::from_config(Config::load()?))
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Clock engine on the wall clock with the configured intervals
    pub fn clock_engine(&self) -> Result<ClockEngine> {
        self.clock_engine_with(Arc::new(SystemClock))
    }

    pub fn clock_engine_with(&self, provider: Arc<dyn TimeProvider>) -> Result<ClockEngine> {
        let clock = &self.config.clock;
        Ok(ClockEngine::new(provider)
            .with_intervals(clock.sample_interval()?, clock.emit_interval()?))
    }

    /// Gallery use case talking to Flickr over HTTP
    ///
    /// # Errors
    ///
    /// Fails when no api key is configured or a config value is invalid.
    pub fn gallery(&self) -> Result<GalleryUseCase> {
        let flickr = &self.config.flickr;
        let api_key = flickr.api_key()?;
        let api = HttpFlickrApi::new(&flickr.base_url, flickr.timeout()?)?;
        self.gallery_with(api_key, Arc::new(api))
    }

    /// Gallery use case on a caller-supplied api
    pub fn gallery_with(&self, api_key: SecretString, api: Arc<dyn FlickrApi>) -> Result<GalleryUseCase> {
        let gallery = &self.config.gallery;
        let per_page = NonZeroU32::new(gallery.per_page).ok_or_else(|| ConfigError::InvalidValue {
            field: "gallery.per_page".to_string(),
            reason: "must be at least 1".to_string(),
        })?;

        Ok(GalleryUseCase::new(SearchByTagRepository::new(api_key, api))
            .with_per_page(per_page)
            .with_size(gallery.size()?))
    }

    /// Start loading the first page for the configured default tag
    pub fn default_gallery_screen(&self, use_case: Arc<GalleryUseCase>) -> Result<GalleryViewModel> {
        let params = RequestParams::first(&self.config.gallery.default_tag)?;
        Ok(GalleryViewModel::spawn(use_case, params))
    }
}
