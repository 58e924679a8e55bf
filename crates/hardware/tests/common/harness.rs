use lrucache_core::cache::{CacheController, Request, Response};
use lrucache_core::config::{CacheConfig, Config, GeneralConfig};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer tracing subscriber once per test binary.
///
/// Filtering follows `RUST_LOG`, e.g. `RUST_LOG=lrucache_core=trace`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a cache configuration with 32-bit data.
pub fn geometry(capacity: usize, block_size: u64, address_width: u32) -> CacheConfig {
    CacheConfig {
        capacity,
        block_size,
        address_width,
        data_width: 32,
    }
}

pub struct TestContext {
    pub cache: CacheController,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Default geometry: 16 lines, 1-byte blocks, 8-bit addresses, 32-bit data.
    pub fn new() -> Self {
        Self::with_cache(CacheConfig::default())
    }

    pub fn with_cache(cache: CacheConfig) -> Self {
        init_tracing();

        let config = Config {
            general: GeneralConfig {
                trace_ticks: true,
                check_invariants: true,
            },
            cache,
        };
        let cache = match CacheController::new(&config) {
            Ok(cache) => cache,
            Err(e) => panic!("test configuration rejected: {e}"),
        };
        Self { cache }
    }

    /// Runs one tick and checks the table invariants afterwards.
    pub fn tick(&mut self, request: Request) -> Response {
        let response = self.cache.tick(&request);
        self.assert_invariants();
        response
    }

    pub fn read(&mut self, address: u64) -> Response {
        self.tick(Request::read(address))
    }

    pub fn write(&mut self, address: u64, data: u64) -> Response {
        self.tick(Request::write(address, data))
    }

    pub fn idle(&mut self) -> Response {
        self.tick(Request::IDLE)
    }

    pub fn reset(&mut self) -> Response {
        self.tick(Request::reset())
    }

    /// Writes `address` with its own value as data, for each address in order.
    pub fn fill(&mut self, addresses: impl IntoIterator<Item = u64>) {
        for address in addresses {
            let _ = self.write(address, address);
        }
    }

    /// Ranks of all lines in index order.
    pub fn ranks(&self) -> Vec<usize> {
        self.cache.lines().iter().map(|line| line.rank).collect()
    }

    /// Index of the line with the highest rank.
    pub fn lru_line(&self) -> usize {
        let lines = self.cache.lines();
        let mut best = 0;
        for (i, line) in lines.iter().enumerate() {
            if line.rank > lines[best].rank {
                best = i;
            }
        }
        best
    }

    pub fn assert_invariants(&self) {
        if let Err(violation) = self.cache.check_invariants() {
            panic!("invariant violated: {violation}");
        }
    }
}

/// Asserts that `ranks` is a permutation of `0..ranks.len()`.
pub fn assert_permutation(ranks: &[usize]) {
    let mut sorted = ranks.to_vec();
    sorted.sort_unstable();
    let expected: Vec<usize> = (0..ranks.len()).collect();
    assert_eq!(sorted, expected, "ranks {ranks:?} are not a permutation");
}
