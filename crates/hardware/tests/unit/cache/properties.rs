//! Randomized checks over request streams.
//!
//! Each case builds a small cache (address space of 32 units, so blocks
//! collide often) and drives it with a random mix of reads, writes, combined
//! accesses, idle ticks and resets. The harness checks the table invariants
//! after every tick; the properties below add behavioral checks, including a
//! comparison against a move-to-front list model of an LRU cache.

use lrucache_core::cache::{Request, Response};
use lrucache_core::config::CacheConfig;
use proptest::prelude::*;

use crate::common::harness::{TestContext, assert_permutation};

const ADDRESS_WIDTH: u32 = 5;
const DATA_WIDTH: u32 = 8;

fn request() -> impl Strategy<Value = Request> {
    (0u8..20, any::<u64>(), any::<u64>()).prop_map(|(kind, address, data)| match kind {
        0 => Request::reset(),
        1..=2 => Request {
            address,
            write_data: data,
            ..Request::IDLE
        },
        3..=9 => Request::read(address),
        10..=17 => Request::write(address, data),
        _ => Request::read_write(address, data),
    })
}

fn cache_config() -> impl Strategy<Value = CacheConfig> {
    (1usize..=6, prop::sample::select(vec![1u64, 2, 4])).prop_map(|(capacity, block_size)| {
        CacheConfig {
            capacity,
            block_size,
            address_width: ADDRESS_WIDTH,
            data_width: DATA_WIDTH,
        }
    })
}

#[derive(Clone, Copy, Debug)]
struct ModelLine {
    tag: u64,
    dirty: bool,
    data: u64,
}

/// LRU cache as a list of blocks, most recently used first.
#[derive(Debug)]
struct Model {
    capacity: usize,
    offset_width: u32,
    lines: Vec<ModelLine>,
}

impl Model {
    fn new(config: &CacheConfig) -> Self {
        Self {
            capacity: config.capacity,
            offset_width: config.block_size.trailing_zeros(),
            lines: Vec::new(),
        }
    }

    fn tick(&mut self, request: &Request) -> Response {
        let mut response = Response::default();
        if request.reset {
            self.lines.clear();
            return response;
        }
        if !request.read && !request.write {
            return response;
        }

        let address = request.address & ((1 << ADDRESS_WIDTH) - 1);
        let tag = address >> self.offset_width;
        let offset = address & ((1 << self.offset_width) - 1);
        let data = request.write_data & ((1 << DATA_WIDTH) - 1);

        if let Some(pos) = self.lines.iter().position(|line| line.tag == tag) {
            let mut line = self.lines.remove(pos);
            response.hit = true;
            if request.read {
                response.read_data = line.data;
            }
            if request.write {
                line.data = data;
                line.dirty = true;
            }
            self.lines.insert(0, line);
        } else {
            if self.lines.len() == self.capacity {
                if let Some(victim) = self.lines.pop() {
                    if victim.dirty {
                        response.dirty_evict = true;
                        response.evict_address = (victim.tag << self.offset_width) | offset;
                        response.evict_data = victim.data;
                    }
                }
            }
            self.lines.insert(
                0,
                ModelLine {
                    tag,
                    dirty: request.write,
                    data: if request.write { data } else { 0 },
                },
            );
        }
        response
    }
}

proptest! {
    /// The controller produces exactly the responses of the list model.
    #[test]
    fn matches_reference_model(
        config in cache_config(),
        requests in prop::collection::vec(request(), 0..200),
    ) {
        let mut ctx = TestContext::with_cache(config);
        let mut model = Model::new(&config);

        for (tick, request) in requests.iter().enumerate() {
            let expected = model.tick(request);
            let actual = ctx.tick(*request);
            prop_assert_eq!(actual, expected, "tick {} request {:?}", tick, request);
        }
    }

    /// Ranks form a permutation after every tick.
    #[test]
    fn ranks_stay_a_permutation(
        config in cache_config(),
        requests in prop::collection::vec(request(), 0..200),
    ) {
        let mut ctx = TestContext::with_cache(config);
        for request in requests {
            let _ = ctx.tick(request);
            assert_permutation(&ctx.ranks());
        }
    }

    /// Valid lines never share a tag.
    #[test]
    fn valid_tags_stay_unique(
        config in cache_config(),
        requests in prop::collection::vec(request(), 0..200),
    ) {
        let mut ctx = TestContext::with_cache(config);
        for request in requests {
            let _ = ctx.tick(request);
            let mut tags: Vec<u64> = ctx
                .cache
                .lines()
                .iter()
                .filter(|line| line.valid)
                .map(|line| line.tag)
                .collect();
            let valid = tags.len();
            tags.sort_unstable();
            tags.dedup();
            prop_assert_eq!(tags.len(), valid);
        }
    }

    /// A write followed directly by a read of the same address hits and
    /// returns the written data.
    #[test]
    fn write_then_read_round_trips(
        config in cache_config(),
        prefix in prop::collection::vec(request(), 0..50),
        address in any::<u64>(),
        data in any::<u64>(),
    ) {
        let mut ctx = TestContext::with_cache(config);
        for request in prefix {
            let _ = ctx.tick(request);
        }

        let _ = ctx.write(address, data);
        let r = ctx.read(address);
        prop_assert!(r.hit);
        prop_assert_eq!(r.read_data, data & ((1 << DATA_WIDTH) - 1));
    }

    /// Whatever came before, a read right after reset misses.
    #[test]
    fn read_after_reset_misses(
        config in cache_config(),
        prefix in prop::collection::vec(request(), 0..50),
        address in any::<u64>(),
    ) {
        let mut ctx = TestContext::with_cache(config);
        for request in prefix {
            let _ = ctx.tick(request);
        }

        let _ = ctx.reset();
        let r = ctx.read(address);
        prop_assert!(!r.hit);
        prop_assert!(!r.dirty_evict);
    }
}
