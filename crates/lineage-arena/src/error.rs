//! Arena-specific error types.

/// Errors that can occur during allocator operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    /// The allocator was configured with zero slots per storage.
    #[error("allocator configured with zero slots per storage")]
    ZeroCapacity,

    /// Every storage is full and the chain may not grow further.
    #[error("allocator capacity exceeded: {storages} storages of {slots_per_storage} slots")]
    CapacityExceeded {
        /// Number of storages in the chain.
        storages: u32,
        /// Slots in each storage.
        slots_per_storage: u32,
    },

    /// A slot address was used for construction without a prior reservation.
    #[error("slot {storage_index}:{slot_index} is not reserved")]
    NotReserved {
        /// Storage index of the address.
        storage_index: u32,
        /// Slot index of the address.
        slot_index: u32,
    },
}
