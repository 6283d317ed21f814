//! Shared test setup.
//!
//! Set `RUST_LOG` (e.g. `radix_tree=trace`) and build with `--features tracing`
//! to see split/collapse events while a test runs.

#![allow(dead_code)]

use std::sync::Once;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a console subscriber once per test binary.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Deterministic generator so failures reproduce.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_key<const N: usize>(rng: &mut StdRng) -> [u8; N] {
    let mut key = [0u8; N];
    rng.fill(&mut key[..]);
    key
}
