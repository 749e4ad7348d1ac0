use rand_chacha::rand_core::{RngCore, SeedableRng};

/// Fixed seed so every fixture draws the same byte stream.
const FIXTURE_SEED: u64 = 0x0ff5_e7c0_de;

/// Deterministic byte source for repeatable fixtures.
pub struct TestRng(rand_chacha::ChaCha8Rng);

impl TestRng {
    pub fn new() -> Self {
        Self(rand_chacha::ChaCha8Rng::seed_from_u64(FIXTURE_SEED))
    }

    pub fn fill(&mut self, buf: &mut [u8]) {
        self.0.fill_bytes(buf);
    }
}

impl Default for TestRng {
    fn default() -> Self {
        Self::new()
    }
}
