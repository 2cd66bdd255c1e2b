use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use common::Bar;

/// Synthetic random-walk bar source for demos and tests.
///
/// Each bar opens at the previous close, extends its high and low by a random
/// 1–5 pip offset, and closes uniformly inside that range. Prices are rounded
/// to 5 decimals. Seeded feeds are fully reproducible.
pub struct MockFeed {
    rng: StdRng,
    /// Next bar's open.
    price: f64,
}

impl MockFeed {
    pub const START_PRICE: f64 = 1.100;
    pub const DEFAULT_ROWS: usize = 220;
    const MIN_OFFSET: f64 = 0.0001;
    const MAX_OFFSET: f64 = 0.0005;

    /// Reproducible feed.
    pub fn seeded(seed: u64) -> Self {
        info!(seed, start = Self::START_PRICE, "MockFeed initialized");
        Self {
            rng: StdRng::seed_from_u64(seed),
            price: Self::START_PRICE,
        }
    }

    /// Feed seeded from OS entropy.
    pub fn from_entropy() -> Self {
        info!(start = Self::START_PRICE, "MockFeed initialized from entropy");
        Self {
            rng: StdRng::from_entropy(),
            price: Self::START_PRICE,
        }
    }

    /// Generate the next bar and advance the walk.
    pub fn next_bar(&mut self) -> Bar {
        let open = self.price;
        let high = open + self.rng.gen_range(Self::MIN_OFFSET..Self::MAX_OFFSET);
        let low = open - self.rng.gen_range(Self::MIN_OFFSET..Self::MAX_OFFSET);
        let close = self.rng.gen_range(low..=high);

        let bar = Bar::new(round5(open), round5(high), round5(low), round5(close));
        self.price = close;
        bar
    }

    /// Generate `rows` consecutive bars (oldest first).
    pub fn take_bars(&mut self, rows: usize) -> Vec<Bar> {
        let bars: Vec<Bar> = (0..rows).map(|_| self.next_bar()).collect();
        debug!(rows, last_close = ?bars.last().map(|b| b.close), "Mock bars generated");
        bars
    }
}

impl Iterator for MockFeed {
    type Item = Bar;

    fn next(&mut self) -> Option<Bar> {
        Some(self.next_bar())
    }
}

fn round5(v: f64) -> f64 {
    (v * 100_000.0).round() / 100_000.0
}
