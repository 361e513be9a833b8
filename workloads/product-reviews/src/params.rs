//! Request parameter parsing.

use std::collections::HashMap;

use serde::Deserialize;
use turbo_reviews::config::{ATTR_APP_KEY, ATTR_PRODUCT_ID, VOTED_STORAGE_KEY};
use turbo_reviews::form::FormField;
use turbo_reviews::prelude::*;

/// Sort, filter and page requested in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewParams {
    pub sort: SortOption,
    pub star: Option<u8>,
    pub page: u32,
}

impl ViewParams {
    /// Read view parameters, ignoring values that do not parse.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        Self {
            sort: query
                .get("sort")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            star: query
                .get("star")
                .and_then(|s| s.parse::<u8>().ok())
                .filter(|s| (1..=5).contains(s)),
            page: query
                .get("page")
                .and_then(|p| p.parse::<u32>().ok())
                .unwrap_or(1)
                .max(1),
        }
    }
}

/// Decode an `application/x-www-form-urlencoded` query.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect()
}

/// Key of a visitor's voted set. Visitor IDs are reduced to a safe alphabet.
pub fn storage_key(visitor: Option<&str>) -> String {
    let visitor: String = visitor
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(64)
        .collect();
    if visitor.is_empty() {
        VOTED_STORAGE_KEY.to_string()
    } else {
        format!("{}:{}", VOTED_STORAGE_KEY, visitor)
    }
}

/// Body of `POST /reviews/vote`.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub app_key: String,
    pub product_id: String,
    pub review_id: ReviewId,
    pub direction: VoteDirection,
    #[serde(default)]
    pub visitor: Option<String>,
}

impl VoteRequest {
    pub fn attributes(&self) -> HashMap<String, String> {
        HashMap::from([
            (ATTR_APP_KEY.to_string(), self.app_key.clone()),
            (ATTR_PRODUCT_ID.to_string(), self.product_id.clone()),
        ])
    }

    /// Widget configuration for this vote, rejecting missing identifiers.
    pub fn config(&self) -> Result<WidgetConfig, WidgetError> {
        let config = WidgetConfig::from_attributes(&self.attributes(), "");
        config.identifiers()?;
        Ok(config)
    }
}

/// Body of `POST /reviews/submit`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Host attributes, keyed as on the host element.
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl SubmitRequest {
    /// Actions that fill the form from this request, ending with submit.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = vec![Action::ToggleForm];
        if let Some(rating) = self.rating {
            actions.push(Action::SetRating(rating));
        }
        for (field, value) in [
            (FormField::Title, &self.title),
            (FormField::Body, &self.body),
            (FormField::Name, &self.name),
            (FormField::Email, &self.email),
        ] {
            actions.push(Action::EditField(field, value.clone()));
        }
        actions.push(Action::SubmitForm);
        actions
    }
}
