//! Widget state holder.
//!
//! All review data is replaced wholesale by each applied fetch. Mutation goes
//! through the widget's dispatcher; renderers only read.

use crate::form::ReviewForm;
use crate::lightbox::Lightbox;
use crate::model::{ListingPayload, PageInfo, Review, ReviewId, ReviewSummary};
use crate::sort::SortOption;
use crate::votes::{VoteDirection, VotedReviews};

/// Which error view to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required host attributes are missing. No retry.
    Configuration,
    /// Loading reviews failed. Retry re-issues the last fetch.
    Load,
}

/// An error shown in place of the widget body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug)]
pub struct WidgetState {
    sort: SortOption,
    star_filter: Option<u8>,
    current_page: u32,
    loading: bool,
    form_visible: bool,
    summary: Option<ReviewSummary>,
    reviews: Vec<Review>,
    page_info: Option<PageInfo>,
    error: Option<ErrorView>,
    voted: VotedReviews,
    form: ReviewForm,
    lightbox: Lightbox,
}

impl WidgetState {
    pub fn new(voted: VotedReviews) -> Self {
        Self {
            sort: SortOption::default(),
            star_filter: None,
            current_page: 1,
            loading: false,
            form_visible: false,
            summary: None,
            reviews: Vec::new(),
            page_info: None,
            error: None,
            voted,
            form: ReviewForm::default(),
            lightbox: Lightbox::default(),
        }
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn star_filter(&self) -> Option<u8> {
        self.star_filter
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn summary(&self) -> Option<&ReviewSummary> {
        self.summary.as_ref()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn review(&self, id: &ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|r| &r.id == id)
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page_info.as_ref()
    }

    /// Total pages, or 1 before any data has loaded.
    pub fn total_pages(&self) -> u32 {
        self.page_info.map_or(1, |p| p.total_pages())
    }

    pub fn error(&self) -> Option<&ErrorView> {
        self.error.as_ref()
    }

    pub fn has_voted(&self, id: &ReviewId) -> bool {
        self.voted.contains(id)
    }

    pub fn form(&self) -> &ReviewForm {
        &self.form
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Whether a fetch has ever been applied.
    pub fn has_data(&self) -> bool {
        self.summary.is_some()
    }

    pub(crate) fn set_sort(&mut self, sort: SortOption) -> bool {
        if self.sort == sort {
            return false;
        }
        self.sort = sort;
        self.current_page = 1;
        true
    }

    /// Toggle `star` as the active filter.
    pub(crate) fn toggle_star_filter(&mut self, star: u8) -> bool {
        if !(1..=5).contains(&star) {
            return false;
        }
        self.star_filter = if self.star_filter == Some(star) {
            None
        } else {
            Some(star)
        };
        self.current_page = 1;
        true
    }

    pub(crate) fn clear_star_filter(&mut self) -> bool {
        if self.star_filter.take().is_none() {
            return false;
        }
        self.current_page = 1;
        true
    }

    /// Move to `page`. Out of range or unchanged pages are ignored.
    pub(crate) fn go_to_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Restore a view without bounds checks; the next fetch clamps the page.
    pub(crate) fn restore_view(&mut self, sort: SortOption, star: Option<u8>, page: u32) {
        self.sort = sort;
        self.star_filter = star.filter(|s| (1..=5).contains(s));
        self.current_page = page.max(1);
    }

    /// Pull the current page back to `last` without touching loaded data.
    pub(crate) fn clamp_page(&mut self, last: u32) {
        self.current_page = self.current_page.clamp(1, last.max(1));
    }

    pub(crate) fn start_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn apply_listing(&mut self, payload: ListingPayload) {
        let total_pages = payload.pagination.total_pages();
        self.current_page = payload.pagination.page.clamp(1, total_pages);
        self.summary = Some(payload.summary);
        self.reviews = payload.reviews;
        self.page_info = Some(payload.pagination);
        self.loading = false;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(ErrorView {
            kind,
            message: message.into(),
        });
    }

    /// Record a vote and bump the local counter.
    ///
    /// Returns `false` if this client already voted on `id`.
    pub(crate) fn record_vote(&mut self, id: &ReviewId, direction: VoteDirection) -> bool {
        if !self.voted.record(id.clone()) {
            return false;
        }
        if let Some(review) = self.reviews.iter_mut().find(|r| &r.id == id) {
            match direction {
                VoteDirection::Up => review.votes_up += 1,
                VoteDirection::Down => review.votes_down += 1,
            }
        }
        true
    }

    pub(crate) fn set_form_visible(&mut self, visible: bool) {
        self.form_visible = visible;
    }

    pub(crate) fn form_mut(&mut self) -> &mut ReviewForm {
        &mut self.form
    }

    pub(crate) fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn state() -> WidgetState {
        WidgetState::new(VotedReviews::load(Box::new(MemoryStore::new()), "voted"))
    }

    fn payload(page: u32, total: u32) -> ListingPayload {
        ListingPayload {
            summary: ReviewSummary::default(),
            reviews: Vec::new(),
            pagination: PageInfo {
                page,
                per_page: 10,
                total,
            },
        }
    }

    #[test]
    fn test_defaults() {
        let s = state();
        assert_eq!(s.current_page(), 1);
        assert_eq!(s.sort(), SortOption::Newest);
        assert_eq!(s.star_filter(), None);
        assert!(!s.is_loading());
        assert!(!s.has_data());
    }

    #[test]
    fn test_toggle_star_filter() {
        let mut s = state();
        s.apply_listing(payload(1, 50));
        s.go_to_page(3);

        assert!(s.toggle_star_filter(4));
        assert_eq!(s.star_filter(), Some(4));
        assert_eq!(s.current_page(), 1);

        s.go_to_page(2);
        assert!(s.toggle_star_filter(4));
        assert_eq!(s.star_filter(), None);
        assert_eq!(s.current_page(), 1);

        assert!(!s.toggle_star_filter(6));
    }

    #[test]
    fn test_go_to_page_bounds() {
        let mut s = state();
        assert!(!s.go_to_page(2));

        s.apply_listing(payload(1, 25));
        assert!(!s.go_to_page(0));
        assert!(!s.go_to_page(4));
        assert!(!s.go_to_page(1));
        assert!(s.go_to_page(3));
        assert_eq!(s.current_page(), 3);
    }

    #[test]
    fn test_apply_listing_clamps_page() {
        let mut s = state();
        s.restore_view(SortOption::Oldest, Some(9), 12);
        assert_eq!(s.star_filter(), None);

        s.start_loading();
        s.apply_listing(payload(12, 15));
        assert_eq!(s.current_page(), 2);
        assert!(!s.is_loading());
    }

    #[test]
    fn test_clamp_page_keeps_data() {
        let mut s = state();
        s.restore_view(SortOption::Newest, None, 9);
        s.clamp_page(3);
        assert_eq!(s.current_page(), 3);
        assert!(!s.has_data());

        s.clamp_page(0);
        assert_eq!(s.current_page(), 1);
    }

    #[test]
    fn test_set_sort_resets_page() {
        let mut s = state();
        s.apply_listing(payload(1, 30));
        s.go_to_page(2);
        assert!(s.set_sort(SortOption::MostHelpful));
        assert_eq!(s.current_page(), 1);
        assert!(!s.set_sort(SortOption::MostHelpful));
    }

    #[test]
    fn test_fail_clears_loading() {
        let mut s = state();
        s.start_loading();
        s.fail(ErrorKind::Load, "boom");
        assert!(!s.is_loading());
        assert_eq!(s.error().unwrap().kind, ErrorKind::Load);
    }
}
