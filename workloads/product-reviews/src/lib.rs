//! Product reviews workload.
//!
//! Serves the reviews widget for a product page:
//! - `GET /reviews` renders summary, list and pagination for the view in the
//!   query string (`sort`, `star`, `page`) using the host attributes passed
//!   alongside (`app-key`, `product-id`, ...)
//! - `POST /reviews/vote` records a helpfulness vote once per visitor
//! - `POST /reviews/submit` validates and forwards a new review
//!
//! Voted sets live in the Spin Key-Value store, one entry per visitor.

#[cfg(target_arch = "wasm32")]
mod handler;
pub mod params;
