//! The reviews widget: state, fetch control and action dispatch.

use std::collections::VecDeque;

use crate::action::{Action, Effect};
use crate::api::ReviewsApi;
use crate::config::{WidgetConfig, FORM_HIDE_DELAY, PER_PAGE, VOTED_STORAGE_KEY};
use crate::fetch::{FetchController, FetchTicket, ListingQuery, PendingFetch};
use crate::form::FormStatus;
use crate::lightbox::ListenerChange;
use crate::model::{ListingPayload, ReviewId};
use crate::render;
use crate::sort::SortOption;
use crate::state::{ErrorKind, WidgetState};
use crate::storage::KeyValueStore;
use crate::votes::{VoteDirection, VotedReviews};
use crate::{ApiError, WidgetError};

/// Message shown in the error view when a listing fetch fails.
pub const LOAD_FAILED: &str = "We couldn't load reviews right now.";

/// Message shown in the form when a submission fails.
pub const SUBMIT_FAILED: &str = "Sorry, your review could not be submitted. Please try again.";

/// A reviews widget bound to one product.
///
/// `dispatch` applies an action to state and returns the effects the caller
/// must carry out. `run` does the same but also performs the network effects
/// (fetch, vote, submit) against a `ReviewsApi`, returning only host effects.
///
/// Hosts that drive overlapping fetches themselves use `begin_fetch` and
/// `complete_fetch`; only the response for the latest ticket is applied.
#[derive(Debug)]
pub struct ReviewsWidget {
    config: WidgetConfig,
    state: WidgetState,
    fetch: FetchController,
}

impl ReviewsWidget {
    /// Create a widget, loading the voted set from `store`.
    pub fn new(config: WidgetConfig, store: Box<dyn KeyValueStore>) -> Self {
        Self::with_storage_key(config, store, VOTED_STORAGE_KEY)
    }

    /// Create a widget that keeps its voted set under `key`.
    pub fn with_storage_key(
        config: WidgetConfig,
        store: Box<dyn KeyValueStore>,
        key: impl Into<String>,
    ) -> Self {
        let voted = VotedReviews::load(store, key);
        Self {
            config,
            state: WidgetState::new(voted),
            fetch: FetchController::new(),
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Render current state to markup.
    pub fn render(&self) -> String {
        render::render_widget(&self.state)
    }

    /// Restore sort, filter and page, e.g. from a URL. The page is clamped
    /// by the next fetch.
    pub fn restore_view(&mut self, sort: SortOption, star: Option<u8>, page: u32) {
        self.state.restore_view(sort, star, page);
    }

    /// Apply `action` to state.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        tracing::debug!(action = action.name(), "Dispatching action");

        match action {
            Action::Load | Action::Retry => vec![Effect::Fetch],
            Action::ChangeSort(sort) => refetch_if(self.state.set_sort(sort)),
            Action::ToggleStarFilter(star) => refetch_if(self.state.toggle_star_filter(star)),
            Action::ClearFilter => refetch_if(self.state.clear_star_filter()),
            Action::GoToPage(page) => self.change_page(page),
            Action::NextPage => self.change_page(self.state.current_page().saturating_add(1)),
            Action::PrevPage => self.change_page(self.state.current_page().saturating_sub(1)),
            Action::ToggleForm => {
                let visible = !self.state.is_form_visible();
                self.set_form_visible(visible);
                vec![Effect::Render]
            }
            Action::HideForm => {
                if !self.state.is_form_visible() {
                    return Vec::new();
                }
                self.set_form_visible(false);
                vec![Effect::Render]
            }
            Action::SetRating(rating) => {
                self.state.form_mut().set_rating(rating);
                vec![Effect::Render]
            }
            Action::EditField(field, value) => {
                self.state.form_mut().set_value(field, value);
                vec![Effect::Render]
            }
            Action::SubmitForm => match self.state.form_mut().begin_submit(&self.config) {
                Some(submission) => vec![Effect::Render, Effect::SubmitReview(submission)],
                None => vec![Effect::Render],
            },
            Action::Vote {
                review_id,
                direction,
            } => self.vote(review_id, direction),
            Action::OpenImage { review_id, index } => self.open_image(review_id, index),
            Action::CloseLightbox | Action::EscapePressed => {
                if !self.state.lightbox().is_open() {
                    return Vec::new();
                }
                let mut effects = vec![Effect::Render];
                effects.extend(listener_effect(self.state.lightbox_mut().close()));
                effects
            }
            Action::LightboxNext => self.step_lightbox(true),
            Action::LightboxPrev => self.step_lightbox(false),
        }
    }

    /// Dispatch `action` and perform its network effects.
    ///
    /// Returns the remaining host effects, without duplicates.
    pub async fn run<A: ReviewsApi + ?Sized>(&mut self, api: &A, action: Action) -> Vec<Effect> {
        let mut queue: VecDeque<Effect> = self.dispatch(action).into();
        let mut host = Vec::new();

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Fetch => queue.extend(self.fetch_with(api).await),
                Effect::SendVote {
                    review_id,
                    direction,
                } => self.send_vote(api, &review_id, direction).await,
                Effect::SubmitReview(submission) => {
                    let result = api.submit_review(&submission).await;
                    queue.extend(self.finish_submission(result));
                }
                other => {
                    if !host.contains(&other) {
                        host.push(other);
                    }
                }
            }
        }
        host
    }

    /// Issue a fetch from current state, cancelling any pending one.
    ///
    /// Returns `None` and shows a configuration error when the required
    /// identifiers are missing; no request is made in that case.
    pub fn begin_fetch(&mut self) -> Option<PendingFetch> {
        let query = match self.config.identifiers() {
            Ok((app_key, product_id)) => ListingQuery {
                app_key: app_key.to_string(),
                product_id: product_id.to_string(),
                per_page: PER_PAGE,
                page: self.state.current_page(),
                sort: self.state.sort(),
                star: self.state.star_filter(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Reviews widget is not configured");
                self.fetch.cancel();
                self.state.fail(ErrorKind::Configuration, e.to_string());
                return None;
            }
        };

        tracing::debug!(
            page = query.page,
            sort = query.sort.as_str(),
            star = ?query.star,
            "Fetching reviews"
        );
        self.state.start_loading();
        Some(self.fetch.issue(query))
    }

    /// Apply the result of a fetch if `ticket` is still the latest one.
    ///
    /// Returns the follow-up effects: nothing for stale responses and
    /// cancellations, `Fetch` when the requested page lies past the last one,
    /// otherwise `Render`.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ListingPayload, ApiError>,
    ) -> Vec<Effect> {
        if !self.fetch.settle(ticket) {
            tracing::debug!("Discarding response of superseded fetch");
            return Vec::new();
        }

        match result {
            Ok(payload) => {
                let last = payload.pagination.total_pages();
                if payload.pagination.total > 0 && self.state.current_page() > last {
                    tracing::debug!(
                        requested = self.state.current_page(),
                        last,
                        "Requested page is past the end; refetching last page"
                    );
                    self.state.clamp_page(last);
                    return vec![Effect::Fetch];
                }

                tracing::info!(
                    total = payload.summary.total,
                    count = payload.reviews.len(),
                    page = payload.pagination.page,
                    "Reviews loaded"
                );
                self.state.apply_listing(payload);
                vec![Effect::Render]
            }
            Err(ApiError::Cancelled) => Vec::new(),
            Err(e) => {
                let err = WidgetError::Load(e);
                tracing::warn!(error = %err, "Reviews fetch failed");
                self.state.fail(ErrorKind::Load, LOAD_FAILED);
                vec![Effect::Render]
            }
        }
    }

    /// Issue a fetch and wait for it. Returns the follow-up effects.
    pub async fn fetch_with<A: ReviewsApi + ?Sized>(&mut self, api: &A) -> Vec<Effect> {
        let Some(pending) = self.begin_fetch() else {
            return vec![Effect::Render];
        };
        let (ticket, result) = pending.send(api).await;
        self.complete_fetch(ticket, result)
    }

    /// Record the outcome of a review submission.
    pub fn finish_submission(&mut self, result: Result<(), ApiError>) -> Vec<Effect> {
        match result {
            Ok(()) => {
                tracing::info!(product_id = %self.config.product_id, "Review submitted");
                self.state.form_mut().submitted();
                vec![Effect::Render, Effect::HideFormAfter(FORM_HIDE_DELAY)]
            }
            Err(e) => {
                let err = WidgetError::Submit(e);
                tracing::warn!(error = %err, "Review submission failed");
                self.state.form_mut().failed(SUBMIT_FAILED);
                vec![Effect::Render]
            }
        }
    }

    fn change_page(&mut self, page: u32) -> Vec<Effect> {
        if self.state.go_to_page(page) {
            vec![Effect::Fetch, Effect::ScrollIntoView]
        } else {
            Vec::new()
        }
    }

    fn set_form_visible(&mut self, visible: bool) {
        // A confirmed submission is not shown again.
        if self.state.form().status() == &FormStatus::Submitted {
            self.state.form_mut().reset();
        }
        self.state.set_form_visible(visible);
    }

    fn vote(&mut self, review_id: ReviewId, direction: VoteDirection) -> Vec<Effect> {
        if self.config.identifiers().is_err() {
            return Vec::new();
        }
        if !self.state.record_vote(&review_id, direction) {
            tracing::debug!(review_id = %review_id, "Already voted on review");
            return Vec::new();
        }
        vec![
            Effect::Render,
            Effect::SendVote {
                review_id,
                direction,
            },
        ]
    }

    async fn send_vote<A: ReviewsApi + ?Sized>(
        &self,
        api: &A,
        review_id: &ReviewId,
        direction: VoteDirection,
    ) {
        if let Err(e) = api.vote(&self.config.app_key, review_id, direction).await {
            tracing::warn!(
                review_id = %review_id,
                direction = %direction,
                error = %e,
                "Vote failed; keeping local count"
            );
        }
    }

    fn step_lightbox(&mut self, forward: bool) -> Vec<Effect> {
        if !self.state.lightbox().is_open() {
            return Vec::new();
        }
        let count = self
            .state
            .lightbox()
            .target()
            .and_then(|t| self.state.review(&t.review_id))
            .map_or(0, |r| r.images.len());
        self.state.lightbox_mut().step(forward, count);
        vec![Effect::Render]
    }

    fn open_image(&mut self, review_id: ReviewId, index: usize) -> Vec<Effect> {
        let exists = self
            .state
            .review(&review_id)
            .is_some_and(|r| index < r.images.len());
        if !exists {
            return Vec::new();
        }
        let mut effects = vec![Effect::Render];
        effects.extend(listener_effect(
            self.state.lightbox_mut().open(review_id, index),
        ));
        effects
    }
}

fn refetch_if(changed: bool) -> Vec<Effect> {
    if changed {
        vec![Effect::Fetch]
    } else {
        Vec::new()
    }
}

fn listener_effect(change: Option<ListenerChange>) -> Option<Effect> {
    change.map(|c| match c {
        ListenerChange::Install => Effect::InstallEscapeListener,
        ListenerChange::Remove => Effect::RemoveEscapeListener,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;

    use super::*;
    use crate::form::{FormField, RATING_REQUIRED};
    use crate::model::{PageInfo, Review, ReviewImage, ReviewSubmission, ReviewSummary};
    use crate::storage::MemoryStore;

    /// Scripted reviews API that counts calls.
    #[derive(Default)]
    struct FakeApi {
        listings: RefCell<VecDeque<Result<ListingPayload, ApiError>>>,
        list_calls: RefCell<Vec<ListingQuery>>,
        votes: RefCell<Vec<(ReviewId, VoteDirection)>>,
        fail_votes: bool,
        submissions: RefCell<Vec<ReviewSubmission>>,
        fail_submit: bool,
    }

    impl FakeApi {
        fn with_listing(payload: ListingPayload) -> Self {
            let api = Self::default();
            api.listings.borrow_mut().push_back(Ok(payload));
            api
        }
    }

    #[async_trait(?Send)]
    impl ReviewsApi for FakeApi {
        async fn list_reviews(&self, query: &ListingQuery) -> Result<ListingPayload, ApiError> {
            self.list_calls.borrow_mut().push(query.clone());
            self.listings
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(ApiError::MissingPayload))
        }

        async fn vote(
            &self,
            _app_key: &str,
            review_id: &ReviewId,
            direction: VoteDirection,
        ) -> Result<(), ApiError> {
            self.votes.borrow_mut().push((review_id.clone(), direction));
            if self.fail_votes {
                Err(ApiError::MissingPayload)
            } else {
                Ok(())
            }
        }

        async fn submit_review(&self, submission: &ReviewSubmission) -> Result<(), ApiError> {
            self.submissions.borrow_mut().push(submission.clone());
            if self.fail_submit {
                Err(ApiError::MissingPayload)
            } else {
                Ok(())
            }
        }
    }

    fn config() -> WidgetConfig {
        WidgetConfig {
            app_key: "key".to_string(),
            product_id: "sku-1".to_string(),
            product_title: "Widget".to_string(),
            product_url: "https://shop.example.com/products/widget".to_string(),
            product_image: None,
        }
    }

    fn widget() -> ReviewsWidget {
        ReviewsWidget::new(config(), Box::new(MemoryStore::new()))
    }

    fn review(id: &str, images: usize) -> Review {
        Review {
            id: ReviewId::new(id),
            title: format!("Review {}", id),
            body: "Body".to_string(),
            score: 4,
            author: Default::default(),
            verified: false,
            created_at: String::new(),
            votes_up: 1,
            votes_down: 0,
            images: (0..images)
                .map(|i| ReviewImage {
                    thumbnail: format!("t{}.jpg", i),
                    full_size: format!("o{}.jpg", i),
                })
                .collect(),
            store_response: None,
        }
    }

    fn payload(page: u32, total: u32, reviews: Vec<Review>) -> ListingPayload {
        ListingPayload {
            summary: ReviewSummary {
                total,
                average_score: 4.0,
                star_distribution: None,
            },
            reviews,
            pagination: PageInfo {
                page,
                per_page: PER_PAGE,
                total,
            },
        }
    }

    #[tokio::test]
    async fn test_load_applies_listing() {
        let api = FakeApi::with_listing(payload(1, 1, vec![review("1", 0)]));
        let mut w = widget();

        let effects = w.run(&api, Action::Load).await;
        assert_eq!(effects, vec![Effect::Render]);
        assert_eq!(w.state().reviews().len(), 1);
        assert!(!w.state().is_loading());

        let calls = api.list_calls.borrow();
        assert_eq!(calls[0].per_page, 10);
        assert_eq!(calls[0].page, 1);
    }

    #[tokio::test]
    async fn test_missing_identifiers_skip_network() {
        let api = FakeApi::default();
        let mut w = ReviewsWidget::new(WidgetConfig::default(), Box::new(MemoryStore::new()));

        w.run(&api, Action::Load).await;
        assert!(api.list_calls.borrow().is_empty());
        assert_eq!(w.state().error().unwrap().kind, ErrorKind::Configuration);
        assert!(!w.state().is_loading());
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let api = FakeApi::default();
        api.listings
            .borrow_mut()
            .push_back(Err(ApiError::Status { code: 500, message: None }));
        api.listings.borrow_mut().push_back(Ok(payload(1, 0, vec![])));
        let mut w = widget();

        w.run(&api, Action::Load).await;
        let error = w.state().error().unwrap();
        assert_eq!(error.kind, ErrorKind::Load);
        assert_eq!(error.message, LOAD_FAILED);
        assert!(!w.state().is_loading());

        w.run(&api, Action::Retry).await;
        assert!(w.state().error().is_none());
        assert!(w.state().has_data());
        assert_eq!(api.list_calls.borrow().len(), 2);
    }

    #[test]
    fn test_only_latest_response_applied() {
        let mut w = widget();
        let first = w.begin_fetch().unwrap();
        let second = w.begin_fetch().unwrap();

        assert_eq!(
            w.complete_fetch(second.ticket, Ok(payload(1, 2, vec![review("b", 0)]))),
            vec![Effect::Render]
        );
        assert!(w
            .complete_fetch(first.ticket, Ok(payload(1, 1, vec![review("a", 0)])))
            .is_empty());
        assert_eq!(w.state().reviews()[0].id, ReviewId::new("b"));
    }

    #[test]
    fn test_late_stale_response_before_latest() {
        let mut w = widget();
        let first = w.begin_fetch().unwrap();
        let second = w.begin_fetch().unwrap();

        assert!(w
            .complete_fetch(first.ticket, Ok(payload(1, 1, vec![review("a", 0)])))
            .is_empty());
        assert!(w.state().is_loading());
        assert!(!w.state().has_data());

        w.complete_fetch(second.ticket, Ok(payload(1, 1, vec![review("b", 0)])));
        assert_eq!(w.state().reviews()[0].id, ReviewId::new("b"));
    }

    #[tokio::test]
    async fn test_superseded_fetch_resolves_cancelled() {
        let api = FakeApi::with_listing(payload(1, 0, vec![]));
        let mut w = widget();
        let first = w.begin_fetch().unwrap();
        let _second = w.begin_fetch().unwrap();

        let (ticket, result) = first.send(&api).await;
        assert!(matches!(result, Err(ApiError::Cancelled)));
        assert!(w.complete_fetch(ticket, result).is_empty());
        assert!(w.state().error().is_none());
        assert!(api.list_calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_star_filter_toggle() {
        let api = FakeApi::with_listing(payload(1, 30, vec![]));
        let mut w = widget();
        w.run(&api, Action::Load).await;
        w.dispatch(Action::GoToPage(3));

        assert_eq!(w.dispatch(Action::ToggleStarFilter(5)), vec![Effect::Fetch]);
        assert_eq!(w.state().star_filter(), Some(5));
        assert_eq!(w.state().current_page(), 1);

        let pending = w.begin_fetch().unwrap();
        w.complete_fetch(pending.ticket, Ok(payload(1, 30, vec![])));
        w.dispatch(Action::GoToPage(2));
        assert_eq!(w.state().current_page(), 2);

        assert_eq!(w.dispatch(Action::ToggleStarFilter(3)), vec![Effect::Fetch]);
        assert_eq!(w.state().star_filter(), Some(3));
        assert_eq!(w.state().current_page(), 1);

        assert_eq!(w.dispatch(Action::ToggleStarFilter(3)), vec![Effect::Fetch]);
        assert_eq!(w.state().star_filter(), None);
        assert_eq!(w.state().current_page(), 1);
    }

    #[tokio::test]
    async fn test_restored_page_past_end_refetches_last_page() {
        let api = FakeApi::default();
        api.listings
            .borrow_mut()
            .push_back(Ok(payload(12, 15, vec![])));
        api.listings
            .borrow_mut()
            .push_back(Ok(payload(2, 15, vec![review("11", 0)])));
        let mut w = widget();
        w.restore_view(SortOption::Newest, None, 12);

        assert_eq!(w.run(&api, Action::Load).await, vec![Effect::Render]);

        let pages: Vec<u32> = api.list_calls.borrow().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![12, 2]);
        assert_eq!(w.state().current_page(), 2);
        assert_eq!(w.state().reviews().len(), 1);
        assert!(!w.render().contains("No reviews yet"));
    }

    #[tokio::test]
    async fn test_page_change_scrolls() {
        let api = FakeApi::with_listing(payload(1, 30, vec![]));
        let mut w = widget();
        w.run(&api, Action::Load).await;

        assert_eq!(
            w.dispatch(Action::NextPage),
            vec![Effect::Fetch, Effect::ScrollIntoView]
        );
        assert_eq!(w.state().current_page(), 2);
        assert!(w.dispatch(Action::GoToPage(4)).is_empty());
        assert!(w.dispatch(Action::GoToPage(0)).is_empty());
    }

    #[tokio::test]
    async fn test_vote_once_per_review() {
        let api = FakeApi::with_listing(payload(1, 1, vec![review("1", 0)]));
        let mut w = widget();
        w.run(&api, Action::Load).await;

        let vote = Action::Vote {
            review_id: ReviewId::new("1"),
            direction: VoteDirection::Up,
        };
        assert_eq!(w.run(&api, vote.clone()).await, vec![Effect::Render]);
        assert!(w.run(&api, vote).await.is_empty());

        assert_eq!(api.votes.borrow().len(), 1);
        assert_eq!(w.state().reviews()[0].votes_up, 2);
        assert!(w.state().has_voted(&ReviewId::new("1")));
    }

    #[tokio::test]
    async fn test_vote_failure_keeps_optimistic_count() {
        let mut api = FakeApi::with_listing(payload(1, 1, vec![review("1", 0)]));
        api.fail_votes = true;
        let mut w = widget();
        w.run(&api, Action::Load).await;

        w.run(
            &api,
            Action::Vote {
                review_id: ReviewId::new("1"),
                direction: VoteDirection::Down,
            },
        )
        .await;
        assert_eq!(w.state().reviews()[0].votes_down, 1);
        assert!(w.state().has_voted(&ReviewId::new("1")));
    }

    #[test]
    fn test_voted_set_survives_sessions() {
        let store = MemoryStore::new();
        let mut w = ReviewsWidget::new(config(), Box::new(store.clone()));
        w.dispatch(Action::Vote {
            review_id: ReviewId::new("9"),
            direction: VoteDirection::Up,
        });

        let w = ReviewsWidget::new(config(), Box::new(store));
        assert!(w.state().has_voted(&ReviewId::new("9")));
    }

    #[tokio::test]
    async fn test_submit_without_rating() {
        let api = FakeApi::default();
        let mut w = widget();
        w.dispatch(Action::ToggleForm);

        let effects = w.run(&api, Action::SubmitForm).await;
        assert_eq!(effects, vec![Effect::Render]);
        assert!(api.submissions.borrow().is_empty());
        assert_eq!(w.state().form().validation(), Some(RATING_REQUIRED));
    }

    #[tokio::test]
    async fn test_submit_success_hides_later() {
        let api = FakeApi::default();
        let mut w = widget();
        w.dispatch(Action::ToggleForm);
        w.dispatch(Action::SetRating(5));
        w.dispatch(Action::EditField(FormField::Title, "Great".to_string()));

        let effects = w.run(&api, Action::SubmitForm).await;
        assert_eq!(
            effects,
            vec![Effect::Render, Effect::HideFormAfter(FORM_HIDE_DELAY)]
        );
        assert_eq!(w.state().form().status(), &FormStatus::Submitted);
        assert_eq!(api.submissions.borrow()[0].review_title, "Great");

        w.dispatch(Action::HideForm);
        assert!(!w.state().is_form_visible());
        assert_eq!(w.state().form().status(), &FormStatus::Editing);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_form_open() {
        let api = FakeApi {
            fail_submit: true,
            ..Default::default()
        };
        let mut w = widget();
        w.dispatch(Action::ToggleForm);
        w.dispatch(Action::SetRating(3));

        let effects = w.run(&api, Action::SubmitForm).await;
        assert_eq!(effects, vec![Effect::Render]);
        assert!(w.state().is_form_visible());
        assert_eq!(
            w.state().form().status(),
            &FormStatus::Failed(SUBMIT_FAILED.to_string())
        );
        assert_eq!(w.state().form().rating(), Some(3));
    }

    #[test]
    fn test_finish_submission_directly() {
        let mut w = widget();
        let effects = w.finish_submission(Ok(()));
        assert!(effects.contains(&Effect::HideFormAfter(FORM_HIDE_DELAY)));
        assert_eq!(w.state().form().status(), &FormStatus::Submitted);
    }

    #[tokio::test]
    async fn test_lightbox_listener_lifecycle() {
        let api = FakeApi::with_listing(payload(1, 1, vec![review("1", 2)]));
        let mut w = widget();
        w.run(&api, Action::Load).await;

        let open = Action::OpenImage {
            review_id: ReviewId::new("1"),
            index: 0,
        };
        assert_eq!(
            w.dispatch(open.clone()),
            vec![Effect::Render, Effect::InstallEscapeListener]
        );
        assert_eq!(w.dispatch(open), vec![Effect::Render]);

        w.dispatch(Action::LightboxNext);
        assert_eq!(w.state().lightbox().target().unwrap().index, 1);

        assert_eq!(
            w.dispatch(Action::EscapePressed),
            vec![Effect::Render, Effect::RemoveEscapeListener]
        );
        assert!(w.dispatch(Action::CloseLightbox).is_empty());
    }

    #[tokio::test]
    async fn test_open_missing_image_is_noop() {
        let api = FakeApi::with_listing(payload(1, 1, vec![review("1", 1)]));
        let mut w = widget();
        w.run(&api, Action::Load).await;

        assert!(w
            .dispatch(Action::OpenImage {
                review_id: ReviewId::new("1"),
                index: 3,
            })
            .is_empty());
        assert!(!w.state().lightbox().is_open());
    }
}
