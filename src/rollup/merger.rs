//! Top-N rollup
//!
//! Collapses an arbitrary number of grouped nodes into the top K by total
//! plus one merged "Other" node.

use serde::{Deserialize, Serialize};

use super::accumulator::{descending, ChildrenAccumulator, TotalsAccumulator};
use crate::models::{AggregateNode, OTHER_KEY};

/// How many nodes and Other-children a rollup keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupLimits {
    #[serde(default = "default_keep_top")]
    pub keep_top: usize,
    /// `None` keeps every merged child
    #[serde(default = "default_child_keep_top")]
    pub child_keep_top: Option<usize>,
}

fn default_keep_top() -> usize {
    5
}

fn default_child_keep_top() -> Option<usize> {
    Some(3)
}

impl Default for RollupLimits {
    fn default() -> Self {
        Self {
            keep_top: default_keep_top(),
            child_keep_top: default_child_keep_top(),
        }
    }
}

impl RollupLimits {
    /// Limits for plain listings: keep `count` nodes, never truncate children
    pub fn keep_all(count: usize) -> Self {
        Self {
            keep_top: count,
            child_keep_top: None,
        }
    }
}

/// Result of a rollup: leaders by total, then an optional Other node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RolledUpGroup {
    pub leaders: Vec<AggregateNode>,
    pub other: Option<AggregateNode>,
}

impl RolledUpGroup {
    /// Leaders followed by Other
    pub fn nodes(&self) -> impl Iterator<Item = &AggregateNode> {
        self.leaders.iter().chain(self.other.iter())
    }

    pub fn into_nodes(self) -> Vec<AggregateNode> {
        let mut nodes = self.leaders;
        nodes.extend(self.other);
        nodes
    }

    pub fn len(&self) -> usize {
        self.leaders.len() + usize::from(self.other.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of every node's total, 0 for an empty group
    pub fn total(&self) -> f64 {
        self.nodes().map(|n| n.total).sum()
    }
}

/// Stable sort by total, largest first
pub fn sort_by_total_desc(nodes: &mut [AggregateNode]) {
    nodes.sort_by(|a, b| descending(a.total, b.total));
}

/// Merge `remainder` into a single Other node.
///
/// Total is the sum of the remainder's totals and avg/min/max are taken over
/// those totals. Children are merged by key and truncated to `child_keep_top`.
pub fn merge_into_other(remainder: &[AggregateNode], child_keep_top: Option<usize>) -> AggregateNode {
    let mut totals = TotalsAccumulator::default();
    let mut children = ChildrenAccumulator::default();

    for node in remainder {
        totals.push(node.total);
        children.add(&node.children);
    }

    AggregateNode {
        key: OTHER_KEY.to_string(),
        total: totals.sum(),
        avg: totals.avg(),
        min: totals.min(),
        max: totals.max(),
        children: children.finish(child_keep_top),
    }
}

/// Keep the `keep_top` largest nodes and merge the rest into Other.
///
/// With no more than `keep_top` nodes they are returned sorted and no Other
/// node is built. Ties keep input order.
pub fn rollup(mut nodes: Vec<AggregateNode>, keep_top: usize, child_keep_top: Option<usize>) -> RolledUpGroup {
    sort_by_total_desc(&mut nodes);

    if nodes.len() <= keep_top {
        return RolledUpGroup {
            leaders: nodes,
            other: None,
        };
    }

    let remainder = nodes.split_off(keep_top);
    let other = merge_into_other(&remainder, child_keep_top);

    tracing::debug!(
        "Rolled up {} nodes: kept {}, merged {} into {} (total {:.2})",
        nodes.len() + remainder.len(),
        nodes.len(),
        remainder.len(),
        OTHER_KEY,
        other.total
    );

    RolledUpGroup {
        leaders: nodes,
        other: Some(other),
    }
}

/// [`rollup`] with limits taken from configuration
pub fn rollup_with(nodes: Vec<AggregateNode>, limits: &RollupLimits) -> RolledUpGroup {
    rollup(nodes, limits.keep_top, limits.child_keep_top)
}
