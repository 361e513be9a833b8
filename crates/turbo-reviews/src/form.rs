//! Review submission form state.

use crate::config::WidgetConfig;
use crate::model::ReviewSubmission;

/// Shown when the form is submitted without a rating.
pub const RATING_REQUIRED: &str = "Please select a rating";

/// Shown after a successful submission.
pub const SUBMITTED_MESSAGE: &str = "Thank you! Your review has been submitted.";

/// Free-text form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Body,
    Name,
    Email,
}

impl FormField {
    /// Input name used in the rendered form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::Name => "name",
            Self::Email => "email",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "body" => Some(Self::Body),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Editing,
    Submitting,
    Submitted,
    Failed(String),
}

/// Controlled review form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewForm {
    rating: Option<u8>,
    title: String,
    body: String,
    name: String,
    email: String,
    status: FormStatus,
    validation: Option<&'static str>,
}

impl ReviewForm {
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Body => &self.body,
            FormField::Name => &self.name,
            FormField::Email => &self.email,
        }
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn validation(&self) -> Option<&'static str> {
        self.validation
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Choose a rating. Values outside 1-5 are ignored.
    pub fn set_rating(&mut self, rating: u8) {
        if (1..=5).contains(&rating) {
            self.rating = Some(rating);
            self.validation = None;
        }
    }

    pub fn set_value(&mut self, field: FormField, value: String) {
        match field {
            FormField::Title => self.title = value,
            FormField::Body => self.body = value,
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
        }
    }

    /// Validate and move to `Submitting`.
    ///
    /// Returns the submission body, or `None` when validation failed or a
    /// submission is already in progress.
    pub fn begin_submit(&mut self, config: &WidgetConfig) -> Option<ReviewSubmission> {
        if self.is_submitting() {
            return None;
        }
        let Some(score) = self.rating else {
            self.validation = Some(RATING_REQUIRED);
            return None;
        };

        self.validation = None;
        self.status = FormStatus::Submitting;
        Some(ReviewSubmission {
            appkey: config.app_key.clone(),
            domain: config.domain(),
            sku: config.product_id.clone(),
            product_title: config.product_title.clone(),
            product_url: config.product_url.clone(),
            product_image_url: config.product_image.clone(),
            display_name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            review_title: self.title.trim().to_string(),
            review_content: self.body.trim().to_string(),
            review_score: score,
        })
    }

    /// Record a successful submission and clear the fields.
    pub fn submitted(&mut self) {
        *self = Self {
            status: FormStatus::Submitted,
            ..Self::default()
        };
    }

    /// Record a failed submission, keeping the fields for a retry.
    pub fn failed(&mut self, message: impl Into<String>) {
        self.status = FormStatus::Failed(message.into());
    }

    /// Back to a blank editing state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WidgetConfig {
        WidgetConfig {
            app_key: "key".to_string(),
            product_id: "sku-1".to_string(),
            product_title: "Widget".to_string(),
            product_url: "https://shop.example.com/products/widget".to_string(),
            product_image: None,
        }
    }

    #[test]
    fn test_rating_required() {
        let mut form = ReviewForm::default();
        form.set_value(FormField::Title, "Nice".to_string());
        assert!(form.begin_submit(&config()).is_none());
        assert_eq!(form.validation(), Some(RATING_REQUIRED));
        assert_eq!(form.status(), &FormStatus::Editing);
    }

    #[test]
    fn test_begin_submit_builds_submission() {
        let mut form = ReviewForm::default();
        form.set_rating(4);
        form.set_value(FormField::Name, " Sam ".to_string());
        form.set_value(FormField::Body, "Solid".to_string());

        let submission = form.begin_submit(&config()).unwrap();
        assert_eq!(submission.review_score, 4);
        assert_eq!(submission.display_name, "Sam");
        assert_eq!(submission.domain, "shop.example.com");
        assert_eq!(submission.sku, "sku-1");
        assert!(form.is_submitting());

        // No double submit while in flight.
        assert!(form.begin_submit(&config()).is_none());
    }

    #[test]
    fn test_invalid_rating_ignored() {
        let mut form = ReviewForm::default();
        form.set_rating(0);
        form.set_rating(6);
        assert_eq!(form.rating(), None);
    }

    #[test]
    fn test_failure_keeps_fields() {
        let mut form = ReviewForm::default();
        form.set_rating(2);
        form.set_value(FormField::Title, "Meh".to_string());
        form.begin_submit(&config());
        form.failed("Network down");

        assert_eq!(form.status(), &FormStatus::Failed("Network down".to_string()));
        assert_eq!(form.value(FormField::Title), "Meh");
        assert!(form.begin_submit(&config()).is_some());
    }

    #[test]
    fn test_submitted_clears_fields() {
        let mut form = ReviewForm::default();
        form.set_rating(5);
        form.set_value(FormField::Email, "a@b.c".to_string());
        form.begin_submit(&config());
        form.submitted();

        assert_eq!(form.status(), &FormStatus::Submitted);
        assert_eq!(form.rating(), None);
        assert_eq!(form.value(FormField::Email), "");
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in [FormField::Title, FormField::Body, FormField::Name, FormField::Email] {
            assert_eq!(FormField::parse(field.as_str()), Some(field));
        }
        assert_eq!(FormField::parse("phone"), None);
    }
}
