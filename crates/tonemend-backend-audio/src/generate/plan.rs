//! Block schedule for one output file.

use crate::synthesis::{block_len, SAMPLE_RATE};

/// How a file's duration splits into full blocks plus a shorter tail.
///
/// All arithmetic is in samples, so the sum of block lengths always equals
/// `total_samples` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPlan {
    /// Samples in the whole file.
    pub total_samples: u64,
    /// Samples in one full block.
    pub block_samples: u64,
    /// Number of full-length blocks.
    pub full_blocks: u64,
    /// Samples in the trailing partial block, zero when none.
    pub remainder_samples: u64,
}

impl BlockPlan {
    /// Plans `total_seconds` of audio in blocks of `block_seconds`.
    ///
    /// A block length that rounds to zero samples is treated as one sample.
    pub fn new(total_seconds: f64, block_seconds: f64) -> Self {
        let total_samples = (f64::from(SAMPLE_RATE) * total_seconds).round().max(0.0) as u64;
        let block_samples = (block_len(block_seconds) as u64).max(1);

        Self {
            total_samples,
            block_samples,
            full_blocks: total_samples / block_samples,
            remainder_samples: total_samples % block_samples,
        }
    }

    /// Full blocks plus the partial one, if any.
    pub fn total_blocks(&self) -> usize {
        (self.full_blocks + u64::from(self.remainder_samples > 0)) as usize
    }

    /// Length in samples of each block, in order.
    pub fn block_lengths(&self) -> impl Iterator<Item = usize> {
        let full = std::iter::repeat(self.block_samples as usize).take(self.full_blocks as usize);
        let tail = (self.remainder_samples > 0).then_some(self.remainder_samples as usize);
        full.chain(tail)
    }

    /// Duration of the planned file in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.total_samples as f64 / f64::from(SAMPLE_RATE)
    }
}
