//! 64-bit Mersenne Twister PRNG (MT19937-64).
//!
//! Non-cryptographic generator used for two jobs: drawing the padding byte
//! during key stretching (seeded from an avalanche hash) and serving as the
//! default wall-clock-seeded entropy source for the encoders. Implements
//! [`RngCore`] and [`SeedableRng`] so any other `rand_core` generator can be
//! injected in its place.

use rand_core::{impls, Error, RngCore, SeedableRng};

const NN: usize = 312;
const MM: usize = 156;
const MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;
const UM: u64 = 0xFFFF_FFFF_8000_0000; // upper 33 bits
const LM: u64 = 0x7FFF_FFFF; // lower 31 bits

/// Fallback seed when the system clock is before the UNIX epoch.
const DEFAULT_SEED: u64 = 5489;

/// 64-bit Mersenne Twister with period 2^19937-1.
///
/// Output for a fixed seed is deterministic and matches the reference
/// `init_genrand64` / `genrand64_int64` sequence.
#[derive(Clone)]
pub struct MersenneTwister {
    mt: [u64; NN],
    mti: usize,
}

impl std::fmt::Debug for MersenneTwister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MersenneTwister")
            .field("mti", &self.mti)
            .finish_non_exhaustive()
    }
}

impl MersenneTwister {
    /// Creates a new PRNG with a seed derived from system time.
    pub fn from_time() -> Self {
        let now = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH);
        let seed = now
            .map(|d| (d.as_millis() as u64) ^ (d.as_nanos() as u64).rotate_left(32))
            .unwrap_or(DEFAULT_SEED);
        Self::with_seed(seed)
    }

    /// Creates a new PRNG with a fixed, deterministic seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut mt = [0u64; NN];
        mt[0] = seed;
        for i in 1..NN {
            let prev = mt[i - 1];
            mt[i] = 6364136223846793005u64
                .wrapping_mul(prev ^ (prev >> 62))
                .wrapping_add(i as u64);
        }
        MersenneTwister { mt, mti: NN }
    }

    /// Regenerates the full state block.
    fn twist(&mut self) {
        let mag01: [u64; 2] = [0, MATRIX_A];
        for i in 0..(NN - MM) {
            let x = (self.mt[i] & UM) | (self.mt[i + 1] & LM);
            self.mt[i] = self.mt[i + MM] ^ (x >> 1) ^ mag01[(x & 1) as usize];
        }
        for i in (NN - MM)..(NN - 1) {
            let x = (self.mt[i] & UM) | (self.mt[i + 1] & LM);
            self.mt[i] = self.mt[i + MM - NN] ^ (x >> 1) ^ mag01[(x & 1) as usize];
        }
        let x = (self.mt[NN - 1] & UM) | (self.mt[0] & LM);
        self.mt[NN - 1] = self.mt[MM - 1] ^ (x >> 1) ^ mag01[(x & 1) as usize];
        self.mti = 0;
    }

    /// Generates the next 64-bit pseudorandom value.
    pub fn next_long(&mut self) -> u64 {
        if self.mti >= NN {
            self.twist();
        }

        let mut x = self.mt[self.mti];
        self.mti += 1;

        // Tempering
        x ^= (x >> 29) & 0x5555_5555_5555_5555;
        x ^= (x << 17) & 0x71D6_7FFF_EDA6_0000;
        x ^= (x << 37) & 0xFFF7_EEE0_0000_0000;
        x ^= x >> 43;
        x
    }

    /// Generates a bounded pseudorandom value in range `[0, n)`.
    ///
    /// Uses rejection sampling so every value is equally likely.
    /// Returns 0 when `n == 0`.
    pub fn next_bounded(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        // Largest multiple of n that fits in u64, minus one.
        let zone = u64::MAX - (u64::MAX % n) - 1;
        loop {
            let v = self.next_long();
            if v <= zone {
                return v % n;
            }
        }
    }

    /// Draws a value uniformly from the inclusive range `[low, high]`.
    pub fn next_in_range(&mut self, low: u8, high: u8) -> u8 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let span = (high - low) as u64 + 1;
        low + self.next_bounded(span) as u8
    }
}

impl RngCore for MersenneTwister {
    fn next_u32(&mut self) -> u32 {
        (self.next_long() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_long()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MersenneTwister {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::with_seed(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::with_seed(state)
    }
}
