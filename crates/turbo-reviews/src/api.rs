//! The external reviews service.

use async_trait::async_trait;

use crate::config::ApiEndpoints;
use crate::fetch::ListingQuery;
use crate::http::{HttpRequest, HttpTransport};
use crate::model::{ListingEnvelope, ListingPayload, ReviewId, ReviewSubmission, VoteBody};
use crate::votes::VoteDirection;
use crate::ApiError;

/// Read and write operations the widget forwards to the reviews service.
#[async_trait(?Send)]
pub trait ReviewsApi {
    /// Fetch one page of reviews with summary and pagination.
    async fn list_reviews(&self, query: &ListingQuery) -> Result<ListingPayload, ApiError>;

    /// Record a helpfulness vote.
    async fn vote(
        &self,
        app_key: &str,
        review_id: &ReviewId,
        direction: VoteDirection,
    ) -> Result<(), ApiError>;

    /// Submit a new review.
    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<(), ApiError>;
}

/// `ReviewsApi` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpReviewsApi<T> {
    transport: T,
    endpoints: ApiEndpoints,
}

impl<T: HttpTransport> HttpReviewsApi<T> {
    /// Create a client using `transport` for outbound requests.
    pub fn new(transport: T, endpoints: ApiEndpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Get the configured endpoints.
    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport> ReviewsApi for HttpReviewsApi<T> {
    async fn list_reviews(&self, query: &ListingQuery) -> Result<ListingPayload, ApiError> {
        let mut url = ApiEndpoints::expand(
            &self.endpoints.listing,
            &[
                ("app_key", query.app_key.as_str()),
                ("product_id", query.product_id.as_str()),
            ],
        )?;
        url.query_pairs_mut()
            .extend_pairs(query.params().iter().map(|(k, v)| (*k, v.as_str())));

        let url_str = url.to_string();
        let request = HttpRequest::get(url).accept("application/json");
        let response = self
            .transport
            .send(request)
            .await?
            .error_for_status(&url_str)?;

        let envelope: ListingEnvelope = response.json()?;
        if envelope.status.code != 200 {
            return Err(ApiError::Status {
                code: envelope.status.code,
                message: envelope.status.message,
            });
        }
        envelope.response.ok_or(ApiError::MissingPayload)
    }

    async fn vote(
        &self,
        app_key: &str,
        review_id: &ReviewId,
        direction: VoteDirection,
    ) -> Result<(), ApiError> {
        let url = ApiEndpoints::expand(
            &self.endpoints.vote,
            &[
                ("review_id", review_id.as_str()),
                ("direction", direction.as_str()),
            ],
        )?;
        let request = HttpRequest::post(url).json(&VoteBody { app_key })?;
        self.transport.send(request).await?;
        Ok(())
    }

    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<(), ApiError> {
        let url = ApiEndpoints::expand(&self.endpoints.submit, &[])?;
        let url_str = url.to_string();
        let request = HttpRequest::post(url)
            .accept("application/json")
            .json(submission)?;
        self.transport
            .send(request)
            .await?
            .error_for_status(&url_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use http::StatusCode;

    use super::*;
    use crate::http::{FetchError, HttpResponse};
    use crate::sort::SortOption;

    /// Records requests and replies with a canned response.
    struct RecordingTransport {
        status: StatusCode,
        body: String,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl RecordingTransport {
        fn new(status: StatusCode, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl<'a> HttpTransport for &'a RecordingTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
            self.requests.borrow_mut().push(request);
            Ok(HttpResponse::new(self.status, self.body.clone().into_bytes()))
        }
    }

    fn query() -> ListingQuery {
        ListingQuery {
            app_key: "key".to_string(),
            product_id: "sku-1".to_string(),
            per_page: 10,
            page: 2,
            sort: SortOption::HighestRated,
            star: Some(4),
        }
    }

    const OK_LISTING: &str = r#"{
        "status": { "code": 200 },
        "response": {
            "bottomline": { "total_review": 0, "average_score": 0 },
            "reviews": [],
            "pagination": { "page": 1, "per_page": 10, "total": 0 }
        }
    }"#;

    #[tokio::test]
    async fn test_list_reviews_builds_query() {
        let transport = RecordingTransport::new(StatusCode::OK, OK_LISTING);
        let api = HttpReviewsApi::new(&transport, ApiEndpoints::default());

        let payload = api.list_reviews(&query()).await.unwrap();
        assert_eq!(payload.summary.total, 0);

        let requests = transport.requests.borrow();
        assert_eq!(
            requests[0].url().as_str(),
            "https://api-cdn.yotpo.com/v1/widget/key/products/sku-1/reviews.json\
             ?per_page=10&page=2&sort=rating&direction=desc&star=4"
        );
    }

    #[tokio::test]
    async fn test_embedded_status_is_failure() {
        let transport =
            RecordingTransport::new(StatusCode::OK, r#"{ "status": { "code": 404 } }"#);
        let api = HttpReviewsApi::new(&transport, ApiEndpoints::default());

        let err = api.list_reviews(&query()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { code: 404, .. }));
    }

    #[tokio::test]
    async fn test_transport_status_is_failure() {
        let transport = RecordingTransport::new(StatusCode::INTERNAL_SERVER_ERROR, OK_LISTING);
        let api = HttpReviewsApi::new(&transport, ApiEndpoints::default());

        let err = api.list_reviews(&query()).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Transport(FetchError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_vote_ignores_response() {
        let transport = RecordingTransport::new(StatusCode::INTERNAL_SERVER_ERROR, "oops");
        let api = HttpReviewsApi::new(&transport, ApiEndpoints::default());

        api.vote("key", &ReviewId::new("42"), VoteDirection::Down)
            .await
            .unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(
            requests[0].url().as_str(),
            "https://api.yotpo.com/reviews/42/vote/down"
        );
        assert_eq!(requests[0].body(), Some(br#"{"app_key":"key"}"#.as_slice()));
    }

    #[tokio::test]
    async fn test_submit_review_posts_body() {
        let transport = RecordingTransport::new(StatusCode::OK, "{}");
        let api = HttpReviewsApi::new(&transport, ApiEndpoints::default());

        let submission = ReviewSubmission {
            appkey: "key".to_string(),
            domain: "shop.example.com".to_string(),
            sku: "sku-1".to_string(),
            product_title: "Widget".to_string(),
            product_url: "https://shop.example.com/w".to_string(),
            product_image_url: None,
            display_name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            review_title: "Nice".to_string(),
            review_content: "Really nice".to_string(),
            review_score: 4,
        };
        api.submit_review(&submission).await.unwrap();

        let requests = transport.requests.borrow();
        assert_eq!(requests[0].method(), &http::Method::POST);
        let body: serde_json::Value = serde_json::from_slice(requests[0].body().unwrap()).unwrap();
        assert_eq!(body["appkey"], "key");
        assert_eq!(body["review_score"], 4);
        assert!(body.get("product_image_url").is_none());
    }

    #[tokio::test]
    async fn test_submit_review_failure() {
        let transport = RecordingTransport::new(StatusCode::BAD_REQUEST, "{}");
        let api = HttpReviewsApi::new(&transport, ApiEndpoints::default());
        let submission = ReviewSubmission {
            appkey: String::new(),
            domain: String::new(),
            sku: String::new(),
            product_title: String::new(),
            product_url: String::new(),
            product_image_url: None,
            display_name: String::new(),
            email: String::new(),
            review_title: String::new(),
            review_content: String::new(),
            review_score: 1,
        };
        assert!(api.submit_review(&submission).await.is_err());
    }
}
