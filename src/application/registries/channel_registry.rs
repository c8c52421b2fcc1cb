//! Channel Registry
//!
//! Channels known to this node, keyed by name.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::models::channel::RedisChannel;
use crate::shared::errors::MessagingError;

/// Registry of channels this node listens on
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: DashMap<String, RedisChannel>,
}

impl ChannelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a channel under its name
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::ChannelDefinition` for an empty name or one
    /// containing whitespace, and `MessagingError::ChannelAlreadyRegistered`
    /// if the name is taken.
    pub fn register(&self, channel: RedisChannel) -> Result<RedisChannel, MessagingError> {
        validate_name(channel.name())?;

        match self.channels.entry(channel.name().to_string()) {
            Entry::Occupied(_) => Err(MessagingError::ChannelAlreadyRegistered(
                channel.name().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(channel.clone());
                tracing::debug!(channel = %channel.name(), "Channel registered");
                Ok(channel)
            }
        }
    }

    /// Look up a registered channel
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::ChannelNotRegistered` if no channel has this name.
    pub fn get_from_name(&self, name: &str) -> Result<RedisChannel, MessagingError> {
        self.channels
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| MessagingError::ChannelNotRegistered(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Registered channel names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.channels.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

fn validate_name(name: &str) -> Result<(), MessagingError> {
    if name.is_empty() {
        return Err(MessagingError::ChannelDefinition(
            "channel name must not be empty".to_string(),
        ));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(MessagingError::ChannelDefinition(format!(
            "channel name '{name}' must not contain whitespace"
        )));
    }
    Ok(())
}
