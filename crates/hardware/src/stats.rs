//! Controller statistics collection and reporting.
//!
//! This module tracks what the controller did, tick by tick. It provides:
//! 1. **Ticks:** Total, idle, and reset ticks.
//! 2. **Accesses:** Read and write hits and misses, and derived hit rates.
//! 3. **Evictions:** Cold fills, clean drops, dirty write-backs, and flushed lines.

use std::io::{self, Write};

use tracing::warn;

use crate::cache::processor::{Eviction, TickOutcome};
use crate::cache::signals::Request;

/// Controller statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Ticks processed, including reset and idle ticks.
    pub ticks: u64,
    /// Ticks with neither read nor write asserted.
    pub idle_ticks: u64,
    /// Resets, whether requested on a tick or directly.
    pub resets: u64,

    /// Ticks that found the block resident. A read-write tick counts once.
    pub hits: u64,
    /// Ticks that allocated a line. A read-write tick counts once.
    pub misses: u64,

    /// Hits on ticks that asserted read.
    pub read_hits: u64,
    /// Misses on ticks that asserted read.
    pub read_misses: u64,
    /// Hits on ticks that asserted write.
    pub write_hits: u64,
    /// Misses on ticks that asserted write.
    pub write_misses: u64,

    /// Misses that filled a line holding no mapping.
    pub cold_fills: u64,
    /// Misses that dropped an unmodified block.
    pub clean_evictions: u64,
    /// Misses that signalled a write-back.
    pub dirty_evictions: u64,
    /// Lines written back by flushes.
    pub flushed_lines: u64,
}

/// Names of the sections written by [`CacheStats::write_sections`].
pub const STATS_SECTIONS: &[&str] = &["summary", "access", "eviction"];

const HEAVY_RULE: &str = "==========================================================";
const LIGHT_RULE: &str = "----------------------------------------------------------";

impl CacheStats {
    /// All counters at zero.
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            idle_ticks: 0,
            resets: 0,
            hits: 0,
            misses: 0,
            read_hits: 0,
            read_misses: 0,
            write_hits: 0,
            write_misses: 0,
            cold_fills: 0,
            clean_evictions: 0,
            dirty_evictions: 0,
            flushed_lines: 0,
        }
    }

    /// Records the outcome of one processed (non-reset) tick.
    ///
    /// Does not count the tick itself; the controller increments `ticks`.
    pub const fn record(&mut self, request: &Request, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Idle => self.idle_ticks += 1,
            TickOutcome::Hit { .. } => {
                self.hits += 1;
                if request.read {
                    self.read_hits += 1;
                }
                if request.write {
                    self.write_hits += 1;
                }
            }
            TickOutcome::Miss { eviction, .. } => {
                self.misses += 1;
                if request.read {
                    self.read_misses += 1;
                }
                if request.write {
                    self.write_misses += 1;
                }
                match eviction {
                    Eviction::Cold => self.cold_fills += 1,
                    Eviction::Clean => self.clean_evictions += 1,
                    Eviction::Dirty => self.dirty_evictions += 1,
                }
            }
        }
    }

    /// Ticks that asserted read or write.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.accesses())
    }

    /// Fraction of reads that hit, or 0 when nothing was read.
    pub fn read_hit_rate(&self) -> f64 {
        ratio(self.read_hits, self.read_hits + self.read_misses)
    }

    /// Fraction of writes that hit, or 0 when nothing was written.
    pub fn write_hit_rate(&self) -> f64 {
        ratio(self.write_hits, self.write_hits + self.write_misses)
    }

    /// Prints the requested report sections to stdout; all sections when empty.
    pub fn print_sections(&self, sections: &[String]) {
        let stdout = io::stdout();
        if let Err(err) = self.write_sections(&mut stdout.lock(), sections) {
            warn!(%err, "failed to print statistics");
        }
    }

    /// Writes the requested report sections to `out`; all sections when empty.
    ///
    /// Section names are those in [`STATS_SECTIONS`]. Unknown names are ignored.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `out`.
    pub fn write_sections(&self, out: &mut impl Write, sections: &[String]) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        if want("summary") {
            writeln!(out, "\n{HEAVY_RULE}")?;
            writeln!(out, "CACHE CONTROLLER STATISTICS")?;
            writeln!(out, "{HEAVY_RULE}")?;
            writeln!(out, "ticks                    {}", self.ticks)?;
            writeln!(out, "ticks.idle               {}", self.idle_ticks)?;
            writeln!(out, "resets                   {}", self.resets)?;
            writeln!(out, "hits                     {}", self.hits)?;
            writeln!(out, "misses                   {}", self.misses)?;
            writeln!(
                out,
                "hit_rate                 {:.2}%",
                self.hit_rate() * 100.0
            )?;
            writeln!(out, "{LIGHT_RULE}")?;
        }
        if want("access") {
            writeln!(out, "ACCESS BREAKDOWN")?;
            writeln!(
                out,
                "  read.hits              {} ({:.2}%)",
                self.read_hits,
                self.read_hit_rate() * 100.0
            )?;
            writeln!(out, "  read.misses            {}", self.read_misses)?;
            writeln!(
                out,
                "  write.hits             {} ({:.2}%)",
                self.write_hits,
                self.write_hit_rate() * 100.0
            )?;
            writeln!(out, "  write.misses           {}", self.write_misses)?;
            writeln!(out, "{LIGHT_RULE}")?;
        }
        if want("eviction") {
            writeln!(out, "EVICTIONS")?;
            writeln!(out, "  fill.cold              {}", self.cold_fills)?;
            writeln!(out, "  evict.clean            {}", self.clean_evictions)?;
            writeln!(out, "  evict.dirty            {}", self.dirty_evictions)?;
            writeln!(out, "  flush.lines            {}", self.flushed_lines)?;
            writeln!(out, "{HEAVY_RULE}")?;
        }
        Ok(())
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
