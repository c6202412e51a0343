use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const TITLE_NOT_FOUND: &str = "Title not found";
pub const PRICE_NOT_FOUND: &str = "Price not found";
pub const IMAGE_NOT_FOUND: &str = "Image not found";

/// A single product lookup. The URL is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub url: String,
}

impl ExtractionRequest {
    /// Validate and trim a caller-supplied URL.
    pub fn new(url: &str) -> Result<Self, AppError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::InvalidInput("No URL provided".into()));
        }
        Ok(Self {
            url: url.to_string(),
        })
    }
}

/// Flat product record handed back to the caller.
///
/// Any field the profile could not locate holds its "not found" sentinel
/// instead of failing the whole lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub website: String,
    pub title: String,
    pub price: String,
    pub image: String,
}

impl ExtractionResult {
    /// A result with every field set to its sentinel.
    pub fn not_found(website: &str) -> Self {
        Self {
            website: website.to_string(),
            title: TITLE_NOT_FOUND.to_string(),
            price: PRICE_NOT_FOUND.to_string(),
            image: IMAGE_NOT_FOUND.to_string(),
        }
    }

    pub fn has_title(&self) -> bool {
        self.title != TITLE_NOT_FOUND
    }

    pub fn has_price(&self) -> bool {
        self.price != PRICE_NOT_FOUND
    }

    pub fn has_image(&self) -> bool {
        self.image != IMAGE_NOT_FOUND
    }
}
