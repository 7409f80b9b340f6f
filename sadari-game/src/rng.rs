//! Seedable random source for ladder generation.
//!
//! Every game draws from an explicitly passed generator rather than global
//! state, so a user-visible seed replays the exact same ladder.
use hmac::{Hmac, Mac};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

use crate::constants::LADDER_STREAM_TAG;

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

/// Generator used for ladder rows.
pub type LadderRng = CountingRng<ChaCha20Rng>;

impl CountingRng<ChaCha20Rng> {
    /// Build the ladder stream for a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(derive_stream_seed(seed, LADDER_STREAM_TAG)),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

/// Ladder stream for `seed`.
#[must_use]
pub fn ladder_rng(seed: u64) -> LadderRng {
    LadderRng::from_user_seed(seed)
}

/// Fresh seed for unseeded play, drawn from the thread-local OS-seeded RNG.
#[must_use]
pub fn entropy_seed() -> u64 {
    rand::thread_rng().next_u64()
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> [u8; 32] {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_replays_stream() {
        let mut a = ladder_rng(0xC0FFEE);
        let mut b = ladder_rng(0xC0FFEE);
        let left: Vec<u32> = (0..16).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..16).map(|_| b.next_u32()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn distinct_seeds_diverge() {
        let mut a = ladder_rng(1);
        let mut b = ladder_rng(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn stream_is_domain_separated_from_raw_seed() {
        let mut derived = ladder_rng(7);
        let mut raw = ChaCha20Rng::seed_from_u64(7);
        assert_ne!(derived.next_u64(), raw.next_u64());
    }

    #[test]
    fn counts_draws() {
        let mut rng = ladder_rng(99);
        assert_eq!(rng.draws(), 0);
        let _: f64 = rng.r#gen();
        let _ = rng.next_u32();
        assert!(rng.draws() >= 2);
    }
}
