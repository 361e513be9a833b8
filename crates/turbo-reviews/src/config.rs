//! Host attributes and API endpoint configuration.

use std::collections::HashMap;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::WidgetError;

/// Reviews requested per page.
pub const PER_PAGE: u32 = 10;

/// How long the submission confirmation stays visible before the form hides.
pub const FORM_HIDE_DELAY: Duration = Duration::from_secs(3);

/// Key of the local entry holding the voted review IDs.
pub const VOTED_STORAGE_KEY: &str = "reviews_voted";

/// Host attribute names.
pub const ATTR_APP_KEY: &str = "app-key";
pub const ATTR_PRODUCT_ID: &str = "product-id";
pub const ATTR_PRODUCT_TITLE: &str = "product-title";
pub const ATTR_PRODUCT_URL: &str = "product-url";
pub const ATTR_PRODUCT_IMAGE: &str = "product-image";

/// Characters escaped in a substituted path segment: controls, characters
/// not allowed in a path, and `/`, `%`, `+`.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'+')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'[')
    .add(b']');

/// Widget configuration taken from the host element's attributes.
///
/// Required identifiers may be empty here; `identifiers` checks them when a
/// fetch is about to be issued so the widget can render a configuration error
/// instead of failing construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Application key for the reviews service.
    #[serde(default)]
    pub app_key: String,
    /// Product identifier (SKU) the reviews belong to.
    #[serde(default)]
    pub product_id: String,
    /// Product title, sent with submitted reviews.
    #[serde(default)]
    pub product_title: String,
    /// Product page URL. Defaults to the current page URL.
    #[serde(default)]
    pub product_url: String,
    /// Product image URL.
    #[serde(default)]
    pub product_image: Option<String>,
}

impl WidgetConfig {
    /// Build from host attributes, defaulting the product URL to `page_url`.
    pub fn from_attributes(attributes: &HashMap<String, String>, page_url: &str) -> Self {
        let attr = |name: &str| {
            attributes
                .get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            app_key: attr(ATTR_APP_KEY).unwrap_or_default(),
            product_id: attr(ATTR_PRODUCT_ID).unwrap_or_default(),
            product_title: attr(ATTR_PRODUCT_TITLE).unwrap_or_default(),
            product_url: attr(ATTR_PRODUCT_URL).unwrap_or_else(|| page_url.to_string()),
            product_image: attr(ATTR_PRODUCT_IMAGE),
        }
    }

    /// The two identifiers every API call needs.
    pub fn identifiers(&self) -> Result<(&str, &str), WidgetError> {
        if self.app_key.trim().is_empty() {
            return Err(WidgetError::MissingAttribute(ATTR_APP_KEY));
        }
        if self.product_id.trim().is_empty() {
            return Err(WidgetError::MissingAttribute(ATTR_PRODUCT_ID));
        }
        Ok((&self.app_key, &self.product_id))
    }

    /// Host name of the product URL, sent as the originating domain.
    pub fn domain(&self) -> String {
        Url::parse(&self.product_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default()
    }
}

/// URL templates for the external reviews service.
///
/// Placeholders: `{app_key}`, `{product_id}`, `{review_id}`, `{direction}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEndpoints {
    /// Listing read endpoint.
    #[serde(default = "default_listing")]
    pub listing: String,
    /// Helpfulness vote endpoint.
    #[serde(default = "default_vote")]
    pub vote: String,
    /// Review submission endpoint.
    #[serde(default = "default_submit")]
    pub submit: String,
}

fn default_listing() -> String {
    "https://api-cdn.yotpo.com/v1/widget/{app_key}/products/{product_id}/reviews.json".to_string()
}

fn default_vote() -> String {
    "https://api.yotpo.com/reviews/{review_id}/vote/{direction}".to_string()
}

fn default_submit() -> String {
    "https://api.yotpo.com/v1/widget/reviews".to_string()
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            listing: default_listing(),
            vote: default_vote(),
            submit: default_submit(),
        }
    }
}

impl ApiEndpoints {
    /// Expand a template, percent-encoding each value as a path segment.
    pub fn expand(template: &str, params: &[(&str, &str)]) -> Result<Url, url::ParseError> {
        let mut expanded = template.to_string();
        for (name, value) in params {
            let encoded = utf8_percent_encode(value, PATH_SEGMENT).to_string();
            expanded = expanded.replace(&format!("{{{}}}", name), &encoded);
        }
        Url::parse(&expanded)
    }
}
