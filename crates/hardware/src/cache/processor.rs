//! Per-tick request processing.
//!
//! The processor turns one request into one response plus a list of staged
//! line updates. It reads the line table but never writes it, so every
//! decision in a tick (lookup, victim choice, rank shifts, read data) is
//! taken from the same start-of-tick state.
//!
//! # Hit path
//!
//! A read returns the payload held at the start of the tick. A write stores
//! the new payload and marks the line dirty. When both are asserted the read
//! still observes the old payload. The line is then moved to the front.
//!
//! # Miss path
//!
//! The least recently used line is chosen as victim. If it holds a valid,
//! modified block, the response flags a dirty eviction at the address formed
//! from the victim's tag and the *request's* offset. The victim is then
//! overwritten with the incoming block (dirty only for a write miss) and moved
//! to the front. No fetch from backing storage is modelled: a read miss
//! returns [`MISS_FILL`].

use tracing::{debug, trace};

use super::decoder::{AddressDecoder, DecodedAddress};
use super::line::CacheLineTable;
use super::policies::{LruRankPolicy, ReplacementPolicy};
use super::signals::{Request, Response};
use super::staged::{LineUpdate, StagedUpdates};
use crate::config::CacheGeometry;

/// Payload installed by a read miss and returned as its read data.
pub const MISS_FILL: u64 = 0;

/// What happened to the victim line on a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eviction {
    /// The victim held no mapping.
    Cold,
    /// The victim held an unmodified block, dropped silently.
    Clean,
    /// The victim held a modified block that must be written back.
    Dirty,
}

/// Classification of a processed tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Neither read nor write was asserted.
    Idle,
    /// The block was resident in line `index`.
    Hit {
        /// Line that hit.
        index: usize,
    },
    /// The block was allocated into line `victim`.
    Miss {
        /// Line that was overwritten.
        victim: usize,
        /// State of the victim before it was overwritten.
        eviction: Eviction,
    },
}

/// Decides the response and state changes for one request.
#[derive(Clone, Debug)]
pub struct RequestProcessor {
    decoder: AddressDecoder,
    data_mask: u64,
    policy: LruRankPolicy,
}

impl RequestProcessor {
    /// Creates a processor for the given geometry and replacement policy.
    pub const fn new(geometry: &CacheGeometry, policy: LruRankPolicy) -> Self {
        Self {
            decoder: AddressDecoder::new(geometry),
            data_mask: geometry.data_mask(),
            policy,
        }
    }

    /// The address decoder used to split request addresses.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// The replacement policy.
    pub const fn policy(&self) -> &LruRankPolicy {
        &self.policy
    }

    /// Processes `request` against the start-of-tick `table`.
    ///
    /// All state changes are appended to `staged`; the caller applies them at
    /// the tick boundary. `table` must not be modified between this call and
    /// that application.
    pub fn process(
        &self,
        table: &CacheLineTable,
        request: &Request,
        staged: &mut StagedUpdates,
    ) -> (Response, TickOutcome) {
        if !request.is_access() {
            return (Response::default(), TickOutcome::Idle);
        }

        let decoded = self.decoder.decode(request.address);
        match table.lookup(decoded.tag) {
            Some(index) => self.hit(table, request, decoded, index, staged),
            None => self.miss(table, request, decoded, staged),
        }
    }

    fn hit(
        &self,
        table: &CacheLineTable,
        request: &Request,
        decoded: DecodedAddress,
        index: usize,
        staged: &mut StagedUpdates,
    ) -> (Response, TickOutcome) {
        let mut response = Response {
            hit: true,
            ..Response::default()
        };

        if request.read {
            response.read_data = table.read(index);
        }
        if request.write {
            staged.push(LineUpdate::Store {
                index,
                data: request.write_data & self.data_mask,
            });
            staged.push(LineUpdate::MarkDirty { index });
        }
        self.policy.touch(table, index, staged);

        trace!(
            index,
            tag = decoded.tag,
            offset = decoded.offset,
            read = request.read,
            write = request.write,
            "hit"
        );
        (response, TickOutcome::Hit { index })
    }

    fn miss(
        &self,
        table: &CacheLineTable,
        request: &Request,
        decoded: DecodedAddress,
        staged: &mut StagedUpdates,
    ) -> (Response, TickOutcome) {
        let victim = self.policy.select_victim(table);
        let line = table.line(victim);
        let mut response = Response::default();

        let eviction = if !line.valid {
            Eviction::Cold
        } else if line.dirty {
            // Old tag, current offset.
            response.dirty_evict = true;
            response.evict_address = self.decoder.encode(line.tag, decoded.offset);
            response.evict_data = line.data;
            Eviction::Dirty
        } else {
            Eviction::Clean
        };

        let data = if request.write {
            request.write_data & self.data_mask
        } else {
            MISS_FILL
        };
        staged.push(LineUpdate::Allocate {
            index: victim,
            tag: decoded.tag,
            dirty: request.write,
            data,
        });
        self.policy.touch(table, victim, staged);

        if request.read {
            response.read_data = MISS_FILL;
        }

        debug!(
            victim,
            tag = decoded.tag,
            offset = decoded.offset,
            read = request.read,
            write = request.write,
            ?eviction,
            evict_address = response.evict_address,
            "miss"
        );
        (response, TickOutcome::Miss { victim, eviction })
    }
}
