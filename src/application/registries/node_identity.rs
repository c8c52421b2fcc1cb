//! Node Identity
//!
//! The filter ID this node answers to.

use std::sync::{PoisonError, RwLock};

use crate::domain::models::envelope::{validate_filter_id, Filter, FILTER_ALL};
use crate::shared::errors::MessagingError;

#[derive(Debug, Default)]
pub struct NodeIdentity {
    filter_id: RwLock<Option<String>>,
}

impl NodeIdentity {
    #[must_use]
    pub fn new(filter_id: Option<String>) -> Self {
        Self {
            filter_id: RwLock::new(filter_id),
        }
    }

    #[must_use]
    pub fn filter_id(&self) -> Option<String> {
        self.filter_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the filter ID, keeping the old one if the new one is invalid
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::InvalidFilter` if the ID cannot be carried on
    /// the wire.
    pub fn set_filter_id(&self, filter_id: Option<String>) -> Result<(), MessagingError> {
        if let Some(id) = &filter_id {
            validate_filter_id(id)?;
        }
        *self.filter_id.write().unwrap_or_else(PoisonError::into_inner) = filter_id;
        Ok(())
    }

    /// Whether a message addressed to `filter` is for this node
    #[must_use]
    pub fn accepts(&self, filter: &Filter) -> bool {
        let guard = self.filter_id.read().unwrap_or_else(PoisonError::into_inner);
        filter.accepts(guard.as_deref())
    }

    /// Filter replies should be addressed to: the own ID, or `all` without one
    #[must_use]
    pub fn reply_filter(&self) -> String {
        self.filter_id().unwrap_or_else(|| FILTER_ALL.to_string())
    }
}
