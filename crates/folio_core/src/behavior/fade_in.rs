//! Load-time staggered fade-in.

use crate::dom::NodeId;

/// Delay for the fade target at `index`: `(index + 1) × interval`.
pub fn fade_delay_ms(index: usize, interval_ms: u64) -> u64 {
    interval_ms.saturating_mul(index as u64 + 1)
}

/// Pairs every target with its fade delay, in ascending index order.
pub fn fade_schedule(targets: &[NodeId], interval_ms: u64) -> Vec<(NodeId, u64)> {
    targets
        .iter()
        .enumerate()
        .map(|(index, node)| (*node, fade_delay_ms(index, interval_ms)))
        .collect()
}
