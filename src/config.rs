//! MapConfig: sizing and resize thresholds for `ChainedHashMap`.

use crate::error::MapError;

pub const DEFAULT_CAPACITY: usize = 10;
pub const DEFAULT_LOAD_LIMIT: f64 = 0.75;

/// Construction parameters for a [`ChainedHashMap`](crate::ChainedHashMap).
///
/// The table grows (doubles) when `len / capacity` exceeds `load_limit`
/// after an insert, and halves when it drops below `shrink_limit` after a
/// removal. A `shrink_limit` of `0.0` disables shrinking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    pub initial_capacity: usize,
    pub load_limit: f64,
    pub shrink_limit: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_limit: DEFAULT_LOAD_LIMIT,
            shrink_limit: DEFAULT_LOAD_LIMIT / 4.0,
        }
    }
}

impl MapConfig {
    /// Config with the given capacity and load limit; the shrink limit
    /// follows the load limit at a quarter of its value.
    pub fn new(initial_capacity: usize, load_limit: f64) -> Self {
        Self {
            initial_capacity,
            load_limit,
            shrink_limit: load_limit / 4.0,
        }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_load_limit(mut self, load_limit: f64) -> Self {
        self.load_limit = load_limit;
        self
    }

    pub fn with_shrink_limit(mut self, shrink_limit: f64) -> Self {
        self.shrink_limit = shrink_limit;
        self
    }

    /// Checks the thresholds against each other.
    ///
    /// The shrink limit must stay strictly below half the load limit:
    /// halving the table doubles its load, and a table that shrank must
    /// not immediately qualify for growth.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.initial_capacity == 0 {
            return Err(MapError::InvalidCapacity(self.initial_capacity));
        }
        if !self.load_limit.is_finite() || self.load_limit <= 0.0 {
            return Err(MapError::InvalidLoadLimit(self.load_limit));
        }
        if !self.shrink_limit.is_finite()
            || self.shrink_limit < 0.0
            || self.shrink_limit >= self.load_limit / 2.0
        {
            return Err(MapError::InvalidLoadLimit(self.shrink_limit));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = MapConfig::default();
        assert_eq!(cfg.initial_capacity, 10);
        assert_eq!(cfg.load_limit, 0.75);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let cfg = MapConfig::default().with_initial_capacity(0);
        assert_eq!(cfg.validate(), Err(MapError::InvalidCapacity(0)));
    }

    #[test]
    fn bad_load_limits_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = MapConfig::new(8, bad).with_shrink_limit(0.0);
            assert!(
                matches!(cfg.validate(), Err(MapError::InvalidLoadLimit(_))),
                "load limit {bad} should be rejected"
            );
        }
    }

    #[test]
    fn shrink_limit_must_sit_below_half_the_load_limit() {
        let cfg = MapConfig::new(8, 1.0).with_shrink_limit(0.5);
        assert_eq!(cfg.validate(), Err(MapError::InvalidLoadLimit(0.5)));

        let cfg = MapConfig::new(8, 1.0).with_shrink_limit(-0.1);
        assert!(cfg.validate().is_err());

        let cfg = MapConfig::new(8, 1.0).with_shrink_limit(0.0);
        assert!(cfg.validate().is_ok());
    }
}
