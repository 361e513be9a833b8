//! Product reviews widget for TurboCommerce storefronts.
//!
//! Renders third-party product reviews inside a product page:
//! - `ReviewsWidget` - state holder, fetch controller and action dispatcher
//! - `ReviewsApi` - the external reviews service (list, vote, submit)
//! - `render` - pure state-to-markup rendering
//! - `VotedReviews` - the client-local "already voted" set
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_reviews::prelude::*;
//!
//! let config = WidgetConfig::from_attributes(&attributes, page_url);
//! let mut widget = ReviewsWidget::new(config, Box::new(MemoryStore::new()));
//! let api = HttpReviewsApi::new(SpinTransport, ApiEndpoints::default());
//!
//! let effects = widget.run(&api, Action::Load).await;
//! let html = widget.render();
//! ```

pub mod action;
pub mod api;
pub mod config;
mod error;
pub mod fetch;
pub mod form;
pub mod http;
pub mod lightbox;
pub mod model;
pub mod pagination;
pub mod render;
pub mod sort;
pub mod stars;
pub mod state;
pub mod storage;
pub mod votes;
mod widget;

pub use error::{ApiError, StorageError, WidgetError};
pub use widget::ReviewsWidget;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::action::{Action, Effect};
    pub use crate::api::{HttpReviewsApi, ReviewsApi};
    pub use crate::config::{ApiEndpoints, WidgetConfig, PER_PAGE};
    pub use crate::fetch::{FetchTicket, ListingQuery, PendingFetch};
    pub use crate::form::FormField;
    pub use crate::http::HttpTransport;
    #[cfg(target_arch = "wasm32")]
    pub use crate::http::SpinTransport;
    pub use crate::model::{ListingPayload, PageInfo, Review, ReviewId, ReviewSummary};
    pub use crate::sort::SortOption;
    pub use crate::storage::{KeyValueStore, MemoryStore};
    pub use crate::votes::VoteDirection;
    pub use crate::{ApiError, ReviewsWidget, StorageError, WidgetError};
}
