//! Allocator configuration parameters.

use crate::error::ArenaError;

/// Configuration for one [`Allocator`](crate::Allocator).
///
/// Controls storage sizing and the chain length limit. Validated by
/// [`Allocator::new`](crate::Allocator::new); immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of slots in every storage of the chain.
    ///
    /// Default: 256. Must be non-zero.
    pub slots_per_storage: u32,

    /// Maximum number of storages in the chain.
    ///
    /// Default: `u32::MAX` (effectively unbounded). Once reached, further
    /// allocations fail with [`ArenaError::CapacityExceeded`] instead of
    /// growing the chain.
    pub max_storages: u32,
}

impl ArenaConfig {
    /// Default slots per storage.
    pub const DEFAULT_SLOTS_PER_STORAGE: u32 = 256;

    /// Create a config with the given storage size and an unbounded chain.
    pub fn new(slots_per_storage: u32) -> Self {
        Self {
            slots_per_storage,
            max_storages: u32::MAX,
        }
    }

    /// Limit the chain to `max_storages` storages.
    pub fn with_max_storages(mut self, max_storages: u32) -> Self {
        self.max_storages = max_storages;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.slots_per_storage == 0 {
            return Err(ArenaError::ZeroCapacity);
        }
        if self.max_storages == 0 {
            return Err(ArenaError::CapacityExceeded {
                storages: 0,
                slots_per_storage: self.slots_per_storage,
            });
        }
        Ok(())
    }

    /// Total slot count the chain may ever hold.
    pub fn max_slots(&self) -> u64 {
        u64::from(self.slots_per_storage) * u64::from(self.max_storages)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SLOTS_PER_STORAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = ArenaConfig::default();
        assert_eq!(config.slots_per_storage, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(ArenaConfig::new(0).validate(), Err(ArenaError::ZeroCapacity));
    }

    #[test]
    fn zero_storages_rejected() {
        let config = ArenaConfig::new(4).with_max_storages(0);
        assert!(matches!(
            config.validate(),
            Err(ArenaError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn max_slots_multiplies() {
        let config = ArenaConfig::new(16).with_max_storages(3);
        assert_eq!(config.max_slots(), 48);
    }
}
