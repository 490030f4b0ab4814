//! Table configuration.

use crate::error::{Result, TableError};
use crate::hashing::HashKind;

/// Load-factor threshold and hash strategy for one table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableConfig {
    pub load_factor_threshold: f64,
    pub hash: HashKind,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            load_factor_threshold: 0.75,
            hash: HashKind::Mix64,
        }
    }
}

impl TableConfig {
    pub fn new(load_factor_threshold: f64, hash: HashKind) -> Self {
        Self {
            load_factor_threshold,
            hash,
        }
    }

    pub fn with_threshold(mut self, load_factor_threshold: f64) -> Self {
        self.load_factor_threshold = load_factor_threshold;
        self
    }

    pub fn with_hash(mut self, hash: HashKind) -> Self {
        self.hash = hash;
        self
    }

    /// The threshold must lie strictly inside `(0, 1)`; NaN is rejected.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.load_factor_threshold)
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold > 0.0 && threshold < 1.0 {
        Ok(())
    } else {
        Err(TableError::invalid_config(format!(
            "load factor threshold {threshold} is outside (0, 1)"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(TableConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_thresholds_outside_open_interval() {
        for t in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let c = TableConfig::default().with_threshold(t);
            assert!(
                matches!(c.validate(), Err(TableError::InvalidConfiguration { .. })),
                "threshold {t} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_extremes_inside_interval() {
        for t in [f64::MIN_POSITIVE, 0.01, 0.5, 0.99, 1.0 - f64::EPSILON] {
            assert!(TableConfig::new(t, HashKind::Modulo).validate().is_ok());
        }
    }

    #[test]
    fn builder_overrides_fields() {
        let c = TableConfig::default()
            .with_threshold(0.9)
            .with_hash(HashKind::Xxh64);
        assert_eq!(c, TableConfig::new(0.9, HashKind::Xxh64));
    }
}
