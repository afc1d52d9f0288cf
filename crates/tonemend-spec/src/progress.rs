//! Progress events emitted between blocks.

use serde::{Deserialize, Serialize};

use crate::band::Role;

/// Progress after one block has been synthesized and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    /// File being rendered.
    pub role: Role,
    /// Blocks finished for this file.
    pub blocks_completed: usize,
    /// Blocks planned for this file.
    pub total_blocks: usize,
    /// Overall fraction of the whole request, in `[0, 1]`.
    pub fraction: f64,
}

impl ProgressEvent {
    /// Builds an event, mapping per-file progress onto the request-wide range.
    ///
    /// With a sham file following, the active file covers `[0, 0.5]` and the
    /// sham file `[0.5, 1]`; a lone active file covers `[0, 1]`.
    pub fn new(role: Role, blocks_completed: usize, total_blocks: usize, with_sham: bool) -> Self {
        let local = if total_blocks == 0 {
            1.0
        } else {
            blocks_completed as f64 / total_blocks as f64
        };
        let fraction = match (role, with_sham) {
            (Role::Active, false) => local,
            (Role::Active, true) => 0.5 * local,
            (Role::Sham, _) => 0.5 + 0.5 * local,
        };

        Self {
            role,
            blocks_completed,
            total_blocks,
            fraction: fraction.clamp(0.0, 1.0),
        }
    }
}
