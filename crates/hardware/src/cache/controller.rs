//! Top-level cache controller.
//!
//! The controller owns the line table and drives one request per tick through
//! the request processor. A tick is atomic: the processor decides everything
//! from the start-of-tick table, and the resulting updates are applied in one
//! step before the response is returned.
//!
//! Reset is checked before anything else on a tick and overrides any request
//! sampled with it. The controller starts in reset and leaves it on the first
//! tick without reset asserted; that tick is processed normally.
//!
//! The controller is `Send` but has no interior synchronization. Hosts that
//! share it between threads must serialize calls to [`CacheController::tick`],
//! for example by owning it behind a `Mutex` or inside a single actor.

use tracing::{debug, error, info};

use super::line::{CacheLine, CacheLineTable};
use super::policies::{LruRankPolicy, ReplacementPolicy};
use super::processor::RequestProcessor;
use super::signals::{ControllerState, Request, Response, WriteBack};
use super::staged::StagedUpdates;
use crate::common::error::{ConfigError, InvariantViolation};
use crate::config::{CacheGeometry, Config, GeneralConfig};
use crate::stats::CacheStats;

/// Fully-associative, write-back, write-allocate LRU cache controller.
#[derive(Debug)]
pub struct CacheController {
    geometry: CacheGeometry,
    general: GeneralConfig,
    table: CacheLineTable,
    processor: RequestProcessor,
    staged: StagedUpdates,
    state: ControllerState,
    stats: CacheStats,
}

impl CacheController {
    /// Creates a controller from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache geometry is invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let geometry = config.cache.geometry()?;
        Ok(Self::with_geometry(geometry, config.general.clone()))
    }

    /// Creates a controller from an already validated geometry.
    pub fn with_geometry(geometry: CacheGeometry, general: GeneralConfig) -> Self {
        let table = CacheLineTable::new(geometry.capacity);
        let processor = RequestProcessor::new(&geometry, LruRankPolicy::new());
        debug!(
            capacity = geometry.capacity,
            block_size = geometry.block_size,
            offset_width = geometry.offset_width,
            tag_width = geometry.tag_width,
            data_width = geometry.data_width,
            "cache controller created"
        );
        Self {
            staged: StagedUpdates::for_capacity(geometry.capacity),
            geometry,
            general,
            table,
            processor,
            state: ControllerState::Reset,
            stats: CacheStats::default(),
        }
    }

    /// Processes one request and returns the tick's response.
    pub fn tick(&mut self, request: &Request) -> Response {
        self.stats.ticks += 1;

        if request.reset {
            self.reset();
            return Response::default();
        }

        if self.state == ControllerState::Reset {
            self.state = ControllerState::Operating;
            debug!("leaving reset");
        }

        self.staged.clear();
        let (response, outcome) = self
            .processor
            .process(&self.table, request, &mut self.staged);
        debug_assert!(
            self.staged.len() <= StagedUpdates::max_len(self.table.len()),
            "tick staged {} updates",
            self.staged.len()
        );
        self.table.apply(&mut self.staged);
        self.stats.record(request, outcome);

        if self.general.trace_ticks {
            debug!(?request, ?response, ?outcome, "tick");
        }
        self.verify();

        response
    }

    /// Clears every line, restores the initial ranking and enters reset.
    pub fn reset(&mut self) {
        self.table.clear();
        self.processor.policy().reset_ranks(&mut self.table);
        self.staged.clear();
        self.state = ControllerState::Reset;
        self.stats.resets += 1;
        info!(capacity = self.table.len(), "cache reset");
    }

    /// Cleans every modified line and returns the blocks to write back.
    ///
    /// Lines stay valid and keep their ranks. Write-back addresses use offset 0.
    pub fn flush(&mut self) -> Vec<WriteBack> {
        let decoder = *self.processor.decoder();
        let mut write_backs = Vec::new();

        for index in 0..self.table.len() {
            let line = *self.table.line(index);
            if line.needs_write_back() {
                write_backs.push(WriteBack {
                    index,
                    address: decoder.encode(line.tag, 0),
                    data: line.data,
                });
                self.table.mark_clean(index);
            }
        }

        self.stats.flushed_lines += write_backs.len() as u64;
        info!(lines = write_backs.len(), "cache flushed");
        write_backs
    }

    /// Drops every mapping without writing anything back. Ranks are kept.
    ///
    /// Modified data is lost; call [`flush`](Self::flush) first to keep it.
    pub fn invalidate_all(&mut self) {
        for index in 0..self.table.len() {
            self.table.invalidate(index);
        }
        info!("cache invalidated");
    }

    /// Index of the line holding the block of `address`, if resident.
    pub fn find(&self, address: u64) -> Option<usize> {
        let decoded = self.processor.decoder().decode(address);
        self.table.lookup(decoded.tag)
    }

    /// Whether the block holding `address` is resident.
    pub fn contains(&self, address: u64) -> bool {
        self.find(address).is_some()
    }

    /// Verifies the line table invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.table.check_invariants()
    }

    /// All lines in index order.
    pub fn lines(&self) -> &[CacheLine] {
        self.table.lines()
    }

    /// The line table.
    pub const fn table(&self) -> &CacheLineTable {
        &self.table
    }

    /// Current operating state.
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Validated geometry.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Statistics gathered since construction.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn verify(&self) {
        if !(cfg!(debug_assertions) || self.general.check_invariants) {
            return;
        }
        let result = self.table.check_invariants();
        if let Err(violation) = &result {
            error!(%violation, "line table invariant broken");
        }
        debug_assert!(result.is_ok(), "line table invariant broken: {result:?}");
    }
}
