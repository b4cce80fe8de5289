//! Rollup module
//!
//! Bounds arbitrarily large sets of grouped nodes for display:
//! - Top-N by total with one merged "Other" node
//! - The same shape applied to each kept node's categories
//! - A shared top-N selection across several independently fetched groups

pub mod accumulator;
pub mod coordinator;
pub mod merger;
pub mod nested;

pub use coordinator::{
    coordinate_groups, select_global, CoordinatedGroup, CoordinationOptions, GlobalSelection,
    NodeGroup, OtherPresence,
};
pub use merger::{merge_into_other, rollup, rollup_with, RollupLimits, RolledUpGroup};
pub use nested::{collapse_children, rollup_nested};
