//! Error types for tally charts.

use thiserror::Error;

/// Errors raised while ingesting records, aggregating, or driving a chart.
#[derive(Error, Debug)]
pub enum TallyError {
    /// A record cannot be tallied.
    #[error("invalid record at index {index}: {reason}")]
    InvalidRecord {
        /// Position of the offending record in its input sequence
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Chart configuration is unusable.
    #[error("configuration error: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },

    /// An element id does not exist on the surface.
    #[error("unknown element: {id}")]
    UnknownElement {
        /// The id that could not be resolved
        id: usize,
    },

    /// Input could not be parsed as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TallyError {
    pub(crate) fn invalid_record(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_record_names_index_and_reason() {
        let err = TallyError::invalid_record(3, "missing field `color`");
        assert_eq!(
            err.to_string(),
            "invalid record at index 3: missing field `color`"
        );
    }
}
