//! Error type shared by the table, its configuration and the experiment driver.

use thiserror::Error;

/// Failure modes of the set. Only construction and growth can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// Threshold outside `(0, 1)`, or an unknown hash strategy name.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// What was wrong with the supplied configuration
        message: String,
    },

    /// The doubled slot array could not be allocated. The table is unchanged.
    #[error("Out of memory: could not allocate {requested_slots} slots")]
    OutOfMemory {
        /// Slot count of the array that failed to allocate
        requested_slots: usize,
    },
}

impl TableError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        TableError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let e = TableError::invalid_config("threshold 1.5 is outside (0, 1)");
        assert_eq!(
            e.to_string(),
            "Invalid configuration: threshold 1.5 is outside (0, 1)"
        );

        let e = TableError::OutOfMemory {
            requested_slots: 1 << 40,
        };
        assert!(e.to_string().contains("1099511627776 slots"));
    }
}
