//! User actions and the host effects they produce.

use std::time::Duration;

use crate::form::FormField;
use crate::model::{ReviewId, ReviewSubmission};
use crate::sort::SortOption;
use crate::votes::VoteDirection;

/// Something the shopper did, or the host reports.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Initial load.
    Load,
    /// Re-issue the last fetch after an error.
    Retry,
    ChangeSort(SortOption),
    /// Select a histogram bar; selecting the active one clears it.
    ToggleStarFilter(u8),
    ClearFilter,
    GoToPage(u32),
    NextPage,
    PrevPage,
    ToggleForm,
    /// Hide the form, e.g. after the confirmation delay.
    HideForm,
    SetRating(u8),
    EditField(FormField, String),
    SubmitForm,
    Vote {
        review_id: ReviewId,
        direction: VoteDirection,
    },
    OpenImage {
        review_id: ReviewId,
        index: usize,
    },
    CloseLightbox,
    LightboxNext,
    LightboxPrev,
    /// Escape pressed while the document listener is installed.
    EscapePressed,
}

impl Action {
    /// Name used for `data-action` attributes and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Retry => "retry",
            Self::ChangeSort(_) => "sort",
            Self::ToggleStarFilter(_) => "filter",
            Self::ClearFilter => "clear-filter",
            Self::GoToPage(_) => "page",
            Self::NextPage => "next-page",
            Self::PrevPage => "prev-page",
            Self::ToggleForm => "toggle-form",
            Self::HideForm => "hide-form",
            Self::SetRating(_) => "set-rating",
            Self::EditField(..) => "edit-field",
            Self::SubmitForm => "submit-review",
            Self::Vote {
                direction: VoteDirection::Up,
                ..
            } => "vote-up",
            Self::Vote {
                direction: VoteDirection::Down,
                ..
            } => "vote-down",
            Self::OpenImage { .. } => "open-image",
            Self::CloseLightbox => "close-lightbox",
            Self::LightboxNext => "lightbox-next",
            Self::LightboxPrev => "lightbox-prev",
            Self::EscapePressed => "escape",
        }
    }

    /// Build an action from a rendered element's `data-action`,
    /// `data-value` and `data-review-id` attributes.
    pub fn from_dom(name: &str, value: Option<&str>, review_id: Option<&str>) -> Option<Self> {
        let number = || value.and_then(|v| v.trim().parse::<u32>().ok());
        let review = || review_id.map(ReviewId::from);

        let action = match name {
            "load" => Self::Load,
            "retry" => Self::Retry,
            "sort" => Self::ChangeSort(value?.parse().ok()?),
            "filter" => Self::ToggleStarFilter(u8::try_from(number()?).ok()?),
            "clear-filter" => Self::ClearFilter,
            "page" => Self::GoToPage(number()?),
            "next-page" => Self::NextPage,
            "prev-page" => Self::PrevPage,
            "toggle-form" => Self::ToggleForm,
            "hide-form" => Self::HideForm,
            "set-rating" => Self::SetRating(u8::try_from(number()?).ok()?),
            "submit-review" => Self::SubmitForm,
            "vote-up" => Self::Vote {
                review_id: review()?,
                direction: VoteDirection::Up,
            },
            "vote-down" => Self::Vote {
                review_id: review()?,
                direction: VoteDirection::Down,
            },
            "open-image" => Self::OpenImage {
                review_id: review()?,
                index: number()? as usize,
            },
            "close-lightbox" => Self::CloseLightbox,
            "lightbox-next" => Self::LightboxNext,
            "lightbox-prev" => Self::LightboxPrev,
            "escape" => Self::EscapePressed,
            _ => return None,
        };
        Some(action)
    }
}

/// Work the dispatcher leaves for its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// State changed; re-render.
    Render,
    /// Issue a listing fetch from current state.
    Fetch,
    /// Scroll the widget root into view.
    ScrollIntoView,
    InstallEscapeListener,
    RemoveEscapeListener,
    /// Fire-and-forget helpfulness vote.
    SendVote {
        review_id: ReviewId,
        direction: VoteDirection,
    },
    SubmitReview(ReviewSubmission),
    /// Dispatch `Action::HideForm` after the delay.
    HideFormAfter(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dom() {
        assert_eq!(
            Action::from_dom("filter", Some("4"), None),
            Some(Action::ToggleStarFilter(4))
        );
        assert_eq!(
            Action::from_dom("sort", Some("most-helpful"), None),
            Some(Action::ChangeSort(SortOption::MostHelpful))
        );
        assert_eq!(
            Action::from_dom("vote-down", None, Some("12")),
            Some(Action::Vote {
                review_id: ReviewId::new("12"),
                direction: VoteDirection::Down,
            })
        );
        assert_eq!(
            Action::from_dom("open-image", Some("1"), Some("12")),
            Some(Action::OpenImage {
                review_id: ReviewId::new("12"),
                index: 1,
            })
        );
    }

    #[test]
    fn test_from_dom_rejects_incomplete() {
        assert_eq!(Action::from_dom("page", Some("x"), None), None);
        assert_eq!(Action::from_dom("vote-up", None, None), None);
        assert_eq!(Action::from_dom("sort", Some("best"), None), None);
        assert_eq!(Action::from_dom("explode", None, None), None);
    }

    #[test]
    fn test_names_round_trip() {
        let actions = [
            Action::Retry,
            Action::GoToPage(3),
            Action::SetRating(2),
            Action::Vote {
                review_id: ReviewId::new("1"),
                direction: VoteDirection::Up,
            },
            Action::LightboxPrev,
        ];
        for action in actions {
            let value = match &action {
                Action::GoToPage(p) => Some(p.to_string()),
                Action::SetRating(r) => Some(r.to_string()),
                _ => None,
            };
            let parsed = Action::from_dom(action.name(), value.as_deref(), Some("1"));
            assert_eq!(parsed, Some(action));
        }
    }
}
