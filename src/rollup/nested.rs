//! Nested rollups
//!
//! Applies the top-N shape one level further down, to the categories of each
//! kept node.

use super::accumulator::descending;
use super::merger::{rollup, RollupLimits, RolledUpGroup};
use crate::models::{AggregateNode, CategoryAmount, ChildMetrics, OTHER_KEY};

/// Replace a node's categories by its `keep` largest plus one Other category
/// holding the rest. Dated series are returned unchanged.
pub fn collapse_children(mut node: AggregateNode, keep: usize) -> AggregateNode {
    if let ChildMetrics::Categories(categories) = &mut node.children {
        if categories.len() > keep {
            categories.sort_by(|a, b| descending(a.value, b.value));
            let rest: f64 = categories.split_off(keep).iter().map(|c| c.value).sum();
            categories.push(CategoryAmount::new(OTHER_KEY, rest));
        }
    }
    node
}

/// Roll up nodes, then collapse the categories of every leader.
///
/// The Other node's children are already limited by the rollup itself.
pub fn rollup_nested(nodes: Vec<AggregateNode>, limits: &RollupLimits) -> RolledUpGroup {
    let group = rollup(nodes, limits.keep_top, limits.child_keep_top);

    match limits.child_keep_top {
        Some(keep) => RolledUpGroup {
            leaders: group
                .leaders
                .into_iter()
                .map(|node| collapse_children(node, keep))
                .collect(),
            other: group.other,
        },
        None => group,
    }
}
