//! Image lightbox state.
//!
//! The document-level Escape listener is installed when the lightbox opens
//! and removed when it closes; `open` and `close` report which of those the
//! host has to do.

use crate::model::ReviewId;

/// The image currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxTarget {
    pub review_id: ReviewId,
    pub index: usize,
}

/// Listener change the host must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChange {
    Install,
    Remove,
}

#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    target: Option<LightboxTarget>,
    listening: bool,
}

impl Lightbox {
    pub fn target(&self) -> Option<&LightboxTarget> {
        self.target.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// Whether the Escape listener is currently installed.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Show `index` of `review_id`. Reopening keeps the existing listener.
    pub fn open(&mut self, review_id: ReviewId, index: usize) -> Option<ListenerChange> {
        self.target = Some(LightboxTarget { review_id, index });
        if self.listening {
            None
        } else {
            self.listening = true;
            Some(ListenerChange::Install)
        }
    }

    /// Close the lightbox.
    pub fn close(&mut self) -> Option<ListenerChange> {
        self.target = None;
        if self.listening {
            self.listening = false;
            Some(ListenerChange::Remove)
        } else {
            None
        }
    }

    /// Step through `image_count` images, wrapping at both ends.
    pub fn step(&mut self, forward: bool, image_count: usize) {
        let Some(target) = self.target.as_mut() else {
            return;
        };
        if image_count == 0 {
            return;
        }
        target.index = if forward {
            (target.index + 1) % image_count
        } else {
            (target.index + image_count - 1) % image_count
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_installed_once_and_removed() {
        let mut lightbox = Lightbox::default();
        assert_eq!(lightbox.open(ReviewId::new("1"), 0), Some(ListenerChange::Install));
        assert_eq!(lightbox.open(ReviewId::new("2"), 1), None);
        assert!(lightbox.is_listening());

        assert_eq!(lightbox.close(), Some(ListenerChange::Remove));
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.close(), None);
    }

    #[test]
    fn test_step_wraps() {
        let mut lightbox = Lightbox::default();
        lightbox.open(ReviewId::new("1"), 0);

        lightbox.step(false, 3);
        assert_eq!(lightbox.target().unwrap().index, 2);
        lightbox.step(true, 3);
        assert_eq!(lightbox.target().unwrap().index, 0);
    }

    #[test]
    fn test_step_when_closed_is_noop() {
        let mut lightbox = Lightbox::default();
        lightbox.step(true, 3);
        assert!(lightbox.target().is_none());
    }
}
