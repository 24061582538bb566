//! Display-ready gallery records and the mapping from wire entities

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::api::{PhotoEntity, SearchPhotosEntity};

/// Host serving static Flickr images
pub const IMAGE_HOST: &str = "live.staticflickr.com";

/// Flickr image size, encoded as a suffix in the image URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    /// 640px on the longest side
    #[default]
    Medium640,
    /// 800px on the longest side
    Medium800,
    /// 1024px on the longest side
    Large1024,
}

impl Size {
    pub fn suffix(&self) -> &'static str {
        match self {
            Size::Medium640 => "z",
            Size::Medium800 => "c",
            Size::Large1024 => "b",
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Size::Medium640 => 640,
            Size::Medium800 => 800,
            Size::Large1024 => 1024,
        }
    }
}

impl FromStr for Size {
    type Err = String;

    /// Accepts the URL suffix ("z") or the width ("640")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "z" | "640" => Ok(Size::Medium640),
            "c" | "800" => Ok(Size::Medium800),
            "b" | "1024" => Ok(Size::Large1024),
            _ => Err(format!(
                "Invalid size: '{}'. Valid options: z (640), c (800), b (1024)",
                s
            )),
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// One photo, ready to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub placeholder: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub page: u32,
    pub pages: String,
    pub per_page: u32,
    pub total: String,
    pub photos: Vec<PhotoRecord>,
}

impl PhotoEntity {
    /// Static image URL; needs no network call
    pub fn to_flickr_url(&self, size: Size) -> String {
        format!(
            "https://{}/{}/{}_{}_{}.jpg",
            IMAGE_HOST,
            self.server,
            self.id,
            self.secret,
            size.suffix()
        )
    }

    pub fn to_record(&self, size: Size) -> PhotoRecord {
        PhotoRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            url: self.to_flickr_url(size),
            placeholder: None,
        }
    }
}

impl SearchPhotosEntity {
    pub fn to_result(&self, size: Size) -> SearchResult {
        SearchResult {
            page: self.page,
            pages: self.pages.clone(),
            per_page: self.perpage,
            total: self.total.clone(),
            photos: self.photo.iter().map(|photo| photo.to_record(size)).collect(),
        }
    }
}
