//! Listing fetch control: one request in flight, last write wins.
//!
//! Every fetch gets a `FetchTicket`. Issuing a new ticket aborts the previous
//! request and invalidates its ticket, so a response that still arrives for a
//! superseded request is discarded rather than applied.

use futures::future::{AbortHandle, AbortRegistration, Abortable};

use crate::api::ReviewsApi;
use crate::model::ListingPayload;
use crate::sort::SortOption;
use crate::ApiError;

/// Everything the listing endpoint needs for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub app_key: String,
    pub product_id: String,
    pub per_page: u32,
    pub page: u32,
    pub sort: SortOption,
    pub star: Option<u8>,
}

impl ListingQuery {
    /// Query parameters in the order they are sent.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
            ("sort", self.sort.field().as_str().to_string()),
            ("direction", self.sort.direction().as_str().to_string()),
        ];
        if let Some(star) = self.star {
            params.push(("star", star.to_string()));
        }
        params
    }
}

/// Identity of one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// A fetch that has been issued but not yet sent.
#[derive(Debug)]
pub struct PendingFetch {
    pub ticket: FetchTicket,
    pub query: ListingQuery,
    abort: AbortRegistration,
}

impl PendingFetch {
    /// Send the request. Resolves to `ApiError::Cancelled` if a newer fetch
    /// was issued in the meantime.
    pub async fn send<A: ReviewsApi + ?Sized>(
        self,
        api: &A,
    ) -> (FetchTicket, Result<ListingPayload, ApiError>) {
        let result = match Abortable::new(api.list_reviews(&self.query), self.abort).await {
            Ok(result) => result,
            Err(_aborted) => Err(ApiError::Cancelled),
        };
        (self.ticket, result)
    }
}

/// Issues tickets and decides which response may be applied.
#[derive(Debug, Default)]
pub struct FetchController {
    generation: u64,
    in_flight: Option<(FetchTicket, AbortHandle)>,
}

impl FetchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new fetch, cancelling any pending one.
    pub fn issue(&mut self, query: ListingQuery) -> PendingFetch {
        self.cancel();
        let ticket = FetchTicket(self.generation);
        let (handle, abort) = AbortHandle::new_pair();
        self.in_flight = Some((ticket, handle));
        PendingFetch {
            ticket,
            query,
            abort,
        }
    }

    /// Abort the pending fetch, if any, and invalidate every issued ticket.
    pub fn cancel(&mut self) {
        if let Some((ticket, handle)) = self.in_flight.take() {
            tracing::debug!(ticket = ticket.0, "Cancelling superseded fetch");
            handle.abort();
        }
        self.generation += 1;
    }

    /// Whether `ticket` belongs to the most recently issued fetch.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Mark `ticket` as resolved. Returns `false` for stale tickets.
    pub fn settle(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Whether a fetch is outstanding.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }
}
