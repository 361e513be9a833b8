//! The client-local set of reviews already voted on.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ReviewId;
use crate::storage::KeyValueStore;
use crate::StorageError;

/// Helpfulness vote direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Path value used by the vote endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review IDs this client has voted on, persisted under a single key.
///
/// The set only grows. Unreadable or malformed stored data loads as empty.
pub struct VotedReviews {
    ids: BTreeSet<ReviewId>,
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl VotedReviews {
    /// Load the set stored under `key`.
    pub fn load(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let ids = match store.get(&key) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<ReviewId>>(&bytes) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Ignoring malformed voted reviews");
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read voted reviews");
                BTreeSet::new()
            }
        };

        Self { ids, store, key }
    }

    /// Whether this client already voted on `id`.
    pub fn contains(&self, id: &ReviewId) -> bool {
        self.ids.contains(id)
    }

    /// Record a vote. Returns `false` if `id` was already present.
    ///
    /// A failed write keeps the ID in memory for the rest of the session.
    pub fn record(&mut self, id: ReviewId) -> bool {
        if !self.ids.insert(id) {
            return false;
        }
        if let Err(e) = self.persist() {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist voted reviews");
        }
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(&self.ids)?;
        self.store.set(&self.key, &bytes)
    }
}

impl fmt::Debug for VotedReviews {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VotedReviews")
            .field("key", &self.key)
            .field("ids", &self.ids)
            .finish()
    }
}
