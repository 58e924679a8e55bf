//! Per-tick controller signals.
//!
//! One [`Request`] is sampled and one [`Response`] is produced per tick. Both
//! are plain values; they own no cache state.

/// Inputs sampled by the controller on a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Request {
    /// Synchronous reset. Overrides every other field.
    pub reset: bool,
    /// Read the addressed block.
    pub read: bool,
    /// Write `write_data` to the addressed block.
    pub write: bool,
    /// Request address; bits above the configured width are ignored.
    pub address: u64,
    /// Data for a write; bits above the configured width are ignored.
    pub write_data: u64,
}

impl Request {
    /// A tick with no request asserted.
    pub const IDLE: Self = Self {
        reset: false,
        read: false,
        write: false,
        address: 0,
        write_data: 0,
    };

    /// A tick asserting only reset.
    pub const fn reset() -> Self {
        Self {
            reset: true,
            ..Self::IDLE
        }
    }

    /// A read of `address`.
    pub const fn read(address: u64) -> Self {
        Self {
            read: true,
            address,
            ..Self::IDLE
        }
    }

    /// A write of `data` to `address`.
    pub const fn write(address: u64, data: u64) -> Self {
        Self {
            write: true,
            address,
            write_data: data,
            ..Self::IDLE
        }
    }

    /// A combined read and write of `address`. The read observes the value
    /// held before the write.
    pub const fn read_write(address: u64, data: u64) -> Self {
        Self {
            read: true,
            write: true,
            address,
            write_data: data,
            ..Self::IDLE
        }
    }

    /// Whether the tick carries a read or a write.
    #[inline]
    pub const fn is_access(&self) -> bool {
        self.read || self.write
    }
}

/// Outputs driven by the controller for a tick.
///
/// Every field not set by the tick's outcome holds its cleared value (false or 0).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Response {
    /// The addressed block was resident.
    pub hit: bool,
    /// Data returned for a read.
    pub read_data: u64,
    /// A modified line was evicted and must be written back.
    pub dirty_evict: bool,
    /// Address to write the evicted block back to.
    pub evict_address: u64,
    /// Payload of the evicted block.
    pub evict_data: u64,
}

/// A block the host must write to backing storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteBack {
    /// Line the block was held in.
    pub index: usize,
    /// Block address.
    pub address: u64,
    /// Block payload.
    pub data: u64,
}

/// Controller operating state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerState {
    /// Held in reset; the table is cleared. Initial state.
    #[default]
    Reset,
    /// Accepting requests.
    Operating,
}
