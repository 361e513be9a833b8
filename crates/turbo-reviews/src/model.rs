//! Review data models as returned by the reviews service.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Review identifier. The service sends numbers; strings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ReviewId(String);

impl ReviewId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ReviewId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for ReviewId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

/// Aggregate statistics for a product's reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Total number of reviews.
    #[serde(rename = "total_review", default)]
    pub total: u32,
    /// Average score, 0-5.
    #[serde(default)]
    pub average_score: f64,
    /// Per-star counts, keyed by star value.
    #[serde(default)]
    pub star_distribution: Option<BTreeMap<u8, u32>>,
}

impl ReviewSummary {
    /// Number of reviews with the given star value.
    pub fn count_for(&self, stars: u8) -> u32 {
        self.star_distribution
            .as_ref()
            .and_then(|d| d.get(&stars).copied())
            .unwrap_or(0)
    }

    /// Histogram bar width for a star value, in percent.
    ///
    /// A zero total is treated as one.
    pub fn percentage(&self, stars: u8) -> f64 {
        let total = self.total.max(1);
        f64::from(self.count_for(stars)) / f64::from(total) * 100.0
    }
}

/// Review author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    #[serde(default)]
    pub display_name: String,
}

/// An image attached to a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewImage {
    /// Thumbnail URL.
    #[serde(rename = "thumb_url")]
    pub thumbnail: String,
    /// Full-size URL.
    #[serde(rename = "original_url")]
    pub full_size: String,
}

/// The store's public reply to a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreResponse {
    #[serde(default)]
    pub content: String,
}

/// A single review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "content", default)]
    pub body: String,
    pub score: u8,
    #[serde(rename = "user", default)]
    pub author: ReviewAuthor,
    #[serde(rename = "verified_buyer", default)]
    pub verified: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub votes_up: u32,
    #[serde(default)]
    pub votes_down: u32,
    #[serde(rename = "images_data", default)]
    pub images: Vec<ReviewImage>,
    #[serde(rename = "comment", default)]
    pub store_response: Option<StoreResponse>,
}

impl Review {
    /// Author name, or "Anonymous" when blank.
    pub fn author_name(&self) -> &str {
        let name = self.author.display_name.trim();
        if name.is_empty() {
            "Anonymous"
        } else {
            name
        }
    }

    /// Creation date for display, e.g. "Jan 5, 2024".
    ///
    /// Falls back to the raw value when it is not RFC 3339.
    pub fn created_display(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(dt) => dt.with_timezone(&Utc).format("%b %-d, %Y").to_string(),
            Err(_) => self.created_at.clone(),
        }
    }

    /// Score clamped to the 1-5 range.
    pub fn stars(&self) -> u8 {
        self.score.clamp(1, 5)
    }
}

/// Pagination metadata of a listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u32,
}

impl PageInfo {
    /// Total number of pages, at least one.
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(self.per_page).max(1)
    }
}

/// The three collections every successful listing fetch replaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPayload {
    #[serde(rename = "bottomline")]
    pub summary: ReviewSummary,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub pagination: PageInfo,
}

/// Status block embedded in every listing response.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopeStatus {
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
}

/// Listing response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEnvelope {
    pub status: EnvelopeStatus,
    #[serde(default)]
    pub response: Option<ListingPayload>,
}

/// Body of a review submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSubmission {
    pub appkey: String,
    pub domain: String,
    pub sku: String,
    pub product_title: String,
    pub product_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image_url: Option<String>,
    pub display_name: String,
    pub email: String,
    pub review_title: String,
    pub review_content: String,
    pub review_score: u8,
}

/// Body of a helpfulness vote.
#[derive(Debug, Clone, Serialize)]
pub struct VoteBody<'a> {
    pub app_key: &'a str,
}
