//! Deterministic sequence generator using xorshift32 with BLAKE3 seed derivation.
//!
//! All randomness in the backend flows through [`XorShift32`]. Each output
//! file owns exactly one generator, and the same seed with the same call
//! sequence always reproduces the same stream of draws.

use rand::{RngCore, SeedableRng};
use tonemend_spec::Role;

/// Replacement state for a zero seed (xorshift has an all-zero fixed point).
pub const ZERO_SEED_REPLACEMENT: u32 = 0x9E37_79B9;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// 32-bit xorshift generator (shifts 13, 17, 5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Creates a generator from a seed. A zero seed is remapped to
    /// [`ZERO_SEED_REPLACEMENT`].
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            seed
        };
        Self { state }
    }

    /// Current internal state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns it.
    #[inline]
    pub fn next_word(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        f64::from(self.next_word()) / TWO_POW_32
    }

    /// Uniform draw in `[low, high)`.
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_uniform()
    }
}

impl RngCore for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_word());
        let high = u64::from(self.next_word());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

/// Derives the seed for one output file from the request's base seed.
///
/// Uses BLAKE3 over the base seed (little-endian) followed by the role name,
/// so active and sham files draw from independent streams.
///
/// # Arguments
/// * `base_seed` - The request's seed
/// * `role` - Which output file the seed is for
///
/// # Returns
/// A derived u32 seed for the file's generator
pub fn derive_role_seed(base_seed: u32, role: Role) -> u32 {
    derive_component_seed(base_seed, role.as_str())
}

/// Derives a seed for a named component from a base seed.
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);

    // Truncate to u32 (first 4 bytes, little-endian)
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&hash.as_bytes()[..4]);
    u32::from_le_bytes(bytes)
}

/// Creates the generator for one output file.
pub fn create_role_rng(base_seed: u32, role: Role) -> XorShift32 {
    XorShift32::new(derive_role_seed(base_seed, role))
}
