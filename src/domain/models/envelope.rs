//! Envelope Domain Model
//!
//! Every message on the wire is `"<filter>;<payload>"`. The filter decides
//! which nodes handle the message.

use crate::shared::errors::MessagingError;

/// Wire value addressing every node
pub const FILTER_ALL: &str = "all";

/// Wire value for messages published without a target
pub const FILTER_NONE: &str = "none";

/// Separator between the filter and the payload on the wire
pub const FILTER_SEPARATOR: char = ';';

/// Check that `id` can be carried as a wire filter
///
/// # Errors
///
/// Returns `MessagingError::InvalidFilter` for an empty ID or one containing
/// the separator.
pub fn validate_filter_id(id: &str) -> Result<(), MessagingError> {
    if id.is_empty() || id.contains(FILTER_SEPARATOR) {
        return Err(MessagingError::InvalidFilter(id.to_string()));
    }
    Ok(())
}

/// Routing target of a published message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Handled by every node
    All,
    /// Published without a target, handled by every node
    Untargeted,
    /// Handled only by the node whose filter ID matches
    Id(String),
}

impl Filter {
    /// Whether a node with the given filter ID should handle this message
    #[must_use]
    pub fn accepts(&self, own_id: Option<&str>) -> bool {
        match self {
            Self::All | Self::Untargeted => true,
            Self::Id(id) => own_id == Some(id.as_str()),
        }
    }

    /// Whether this filter survives the wire unchanged
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::InvalidFilter` if the ID would be split on decode.
    pub fn validate(&self) -> Result<(), MessagingError> {
        match self {
            Self::All | Self::Untargeted => Ok(()),
            Self::Id(id) => validate_filter_id(id),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => FILTER_ALL,
            Self::Untargeted => FILTER_NONE,
            Self::Id(id) => id,
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        match value {
            FILTER_ALL => Self::All,
            FILTER_NONE => Self::Untargeted,
            other => Self::Id(other.to_string()),
        }
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        match value.as_str() {
            FILTER_ALL => Self::All,
            FILTER_NONE => Self::Untargeted,
            _ => Self::Id(value),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded wire message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub filter: Filter,
    pub payload: String,
}

impl Envelope {
    #[must_use]
    pub fn new(filter: Filter, payload: impl Into<String>) -> Self {
        Self {
            filter,
            payload: payload.into(),
        }
    }

    /// Encode as `"<filter>;<payload>"`
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}{FILTER_SEPARATOR}{}", self.filter, self.payload)
    }

    /// Split a wire message at its first `;`
    ///
    /// Returns `None` when the message carries no filter prefix.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        let (filter, payload) = raw.split_once(FILTER_SEPARATOR)?;
        Some(Self::new(Filter::from(filter), payload))
    }
}

/// A message delivered to a channel handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    /// Channel the message arrived on
    pub channel: String,
    /// Filter the sender addressed the message to
    pub filter: Filter,
    /// Message body without the filter prefix
    pub payload: String,
    /// Undecoded wire text
    pub raw: String,
}
