//! Cross-group rollups
//!
//! When several account groups are compared side by side, the top areas and
//! their categories are chosen once over all groups so every group reports
//! the same labels. Magnitudes stay per group.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::accumulator::{ChildrenAccumulator, RankedSums, TotalsAccumulator};
use crate::models::{AggregateNode, CategoryAmount, ChildMetrics, OTHER_KEY};

/// When a group emits an Other node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherPresence {
    /// Only groups with areas outside the global top emit Other
    #[default]
    PerGroup,
    /// Once any group needs Other, every group emits one (zeroed if empty)
    Uniform,
}

/// Parameters of a coordinated rollup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinationOptions {
    #[serde(default = "default_keep_top")]
    pub keep_top: usize,
    #[serde(default = "default_child_keep_top")]
    pub child_keep_top: usize,
    #[serde(default)]
    pub other_presence: OtherPresence,
}

fn default_keep_top() -> usize {
    5
}

fn default_child_keep_top() -> usize {
    3
}

impl Default for CoordinationOptions {
    fn default() -> Self {
        Self {
            keep_top: default_keep_top(),
            child_keep_top: default_child_keep_top(),
            other_presence: OtherPresence::default(),
        }
    }
}

/// Nodes fetched for one account group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGroup {
    pub group: String,
    pub nodes: Vec<AggregateNode>,
}

/// Output series of one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatedGroup {
    pub group: String,
    pub nodes: Vec<AggregateNode>,
}

/// Labels chosen over all groups together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSelection {
    /// Top area keys, largest summed total first
    pub top_keys: Vec<String>,
    /// Top category labels per top area, same order as `top_keys`
    pub top_categories: Vec<Vec<String>>,
    /// Top category labels across every area outside `top_keys`
    pub other_categories: Vec<String>,
    /// Whether any group has an area outside `top_keys`
    pub has_residual: bool,
}

impl GlobalSelection {
    fn categories_for(&self, key: &str) -> &[String] {
        self.top_keys
            .iter()
            .position(|k| k == key)
            .map(|i| self.top_categories[i].as_slice())
            .unwrap_or(&[])
    }
}

/// Rank areas and categories over every group's nodes
pub fn select_global(groups: &[NodeGroup], options: &CoordinationOptions) -> GlobalSelection {
    let all_nodes = || groups.iter().flat_map(|g| g.nodes.iter());

    let mut area_sums = RankedSums::default();
    for node in all_nodes() {
        area_sums.add(&node.key, node.total);
    }
    let top_keys = area_sums.top_keys(Some(options.keep_top));
    let top_set: HashSet<&str> = top_keys.iter().map(String::as_str).collect();

    let top_categories = top_keys
        .iter()
        .map(|key| {
            let mut sums = RankedSums::default();
            for node in all_nodes().filter(|n| &n.key == key) {
                if let Some(categories) = node.children.categories() {
                    sums.add_categories(categories);
                }
            }
            sums.top_keys(Some(options.child_keep_top))
        })
        .collect();

    let mut other_sums = RankedSums::default();
    let mut has_residual = false;
    for node in all_nodes().filter(|n| !top_set.contains(n.key.as_str())) {
        has_residual = true;
        if let Some(categories) = node.children.categories() {
            other_sums.add_categories(categories);
        }
    }

    GlobalSelection {
        top_keys,
        top_categories,
        other_categories: other_sums.top_keys(Some(options.child_keep_top)),
        has_residual,
    }
}

/// Categories of `children` restricted to `labels`, in label order.
/// Labels the node lacks are reported as 0. Series children pass through.
fn restrict_categories(children: &ChildMetrics, labels: &[String]) -> ChildMetrics {
    match children {
        ChildMetrics::Categories(items) => {
            let mut sums = RankedSums::default();
            sums.add_categories(items);
            ChildMetrics::Categories(
                labels
                    .iter()
                    .map(|label| CategoryAmount::new(label.clone(), sums.get(label).unwrap_or(0.0)))
                    .collect(),
            )
        }
        ChildMetrics::Series(_) => children.clone(),
    }
}

/// Merge a group's residual nodes into its Other node, labelled with the
/// globally chosen other categories
fn build_other(residual: &[&AggregateNode], labels: &[String]) -> AggregateNode {
    let mut totals = TotalsAccumulator::default();
    let mut children = ChildrenAccumulator::default();

    for node in residual {
        totals.push(node.total);
        children.add(&node.children);
    }

    let merged = match children.finish(None) {
        ChildMetrics::Series(items) => ChildMetrics::Series(items),
        categories => restrict_categories(&categories, labels),
    };

    AggregateNode {
        key: OTHER_KEY.to_string(),
        total: totals.sum(),
        avg: totals.avg(),
        min: totals.min(),
        max: totals.max(),
        children: merged,
    }
}

/// Rows sharing a key merged into one node, in first-seen key order
fn merge_by_key(nodes: &[AggregateNode]) -> Vec<AggregateNode> {
    let mut order: Vec<&str> = Vec::new();
    let mut rows: HashMap<&str, Vec<&AggregateNode>> = HashMap::new();

    for node in nodes {
        rows.entry(node.key.as_str())
            .or_insert_with(|| {
                order.push(node.key.as_str());
                Vec::new()
            })
            .push(node);
    }

    order
        .into_iter()
        .filter_map(|key| rows.remove(key))
        .map(|rows| merge_rows(&rows))
        .collect()
}

/// Sum totals, keep the extreme min/max and average the avgs of `rows`
fn merge_rows(rows: &[&AggregateNode]) -> AggregateNode {
    if let [single] = rows {
        return (*single).clone();
    }

    let mut children = ChildrenAccumulator::default();
    for row in rows {
        children.add(&row.children);
    }

    AggregateNode {
        key: rows[0].key.clone(),
        total: rows.iter().map(|n| n.total).sum(),
        avg: rows.iter().map(|n| n.avg).sum::<f64>() / rows.len() as f64,
        min: rows.iter().map(|n| n.min).fold(f64::INFINITY, f64::min),
        max: rows.iter().map(|n| n.max).fold(f64::NEG_INFINITY, f64::max),
        children: children.finish(None),
    }
}

/// Shape one group's nodes after the global selection
fn shape_group(group: &NodeGroup, selection: &GlobalSelection, presence: OtherPresence) -> CoordinatedGroup {
    let merged = merge_by_key(&group.nodes);

    let mut nodes: Vec<AggregateNode> = selection
        .top_keys
        .iter()
        .filter_map(|key| merged.iter().find(|n| &n.key == key))
        .map(|node| AggregateNode {
            children: restrict_categories(&node.children, selection.categories_for(&node.key)),
            ..node.clone()
        })
        .collect();

    let residual: Vec<&AggregateNode> = merged
        .iter()
        .filter(|n| !selection.top_keys.contains(&n.key))
        .collect();

    let emit_other = match presence {
        OtherPresence::PerGroup => !residual.is_empty(),
        OtherPresence::Uniform => selection.has_residual,
    };

    if emit_other {
        nodes.push(build_other(&residual, &selection.other_categories));
    }

    CoordinatedGroup {
        group: group.group.clone(),
        nodes,
    }
}

/// Roll up several groups with one shared top-N selection.
///
/// Areas are ranked by their total summed over all groups; each kept area
/// carries the categories ranked over all groups for that area. Everything
/// else is merged per group into Other, whose categories are the ones ranked
/// over all residual areas of all groups.
pub fn coordinate_groups(groups: &[NodeGroup], options: &CoordinationOptions) -> Vec<CoordinatedGroup> {
    let selection = select_global(groups, options);

    tracing::debug!(
        "Coordinated {} groups on top areas {:?} (other categories {:?})",
        groups.len(),
        selection.top_keys,
        selection.other_categories
    );

    groups
        .iter()
        .map(|group| shape_group(group, &selection, options.other_presence))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(key: &str, total: f64, categories: Vec<(&str, f64)>) -> AggregateNode {
        AggregateNode::new(key, total).with_categories(categories)
    }

    fn group(name: &str, nodes: Vec<AggregateNode>) -> NodeGroup {
        NodeGroup {
            group: name.to_string(),
            nodes,
        }
    }

    fn keys(group: &CoordinatedGroup) -> Vec<&str> {
        group.nodes.iter().map(|n| n.key.as_str()).collect()
    }

    fn labels(node: &AggregateNode) -> Vec<&str> {
        node.children
            .categories()
            .unwrap_or(&[])
            .iter()
            .map(|c| c.label.as_str())
            .collect()
    }

    fn options(keep_top: usize, child_keep_top: usize, other_presence: OtherPresence) -> CoordinationOptions {
        CoordinationOptions {
            keep_top,
            child_keep_top,
            other_presence,
        }
    }

    fn sample_groups() -> Vec<NodeGroup> {
        vec![
            group(
                "north",
                vec![
                    area("Kitchen", 50.0, vec![("Bread", 30.0), ("Fish", 20.0)]),
                    area("Bar", 5.0, vec![("Ice", 5.0)]),
                    area("Cafe", 4.0, vec![("Milk", 3.0), ("Cake", 1.0)]),
                ],
            ),
            group(
                "south",
                vec![
                    area("Bar", 40.0, vec![("Lemons", 25.0), ("Ice", 15.0)]),
                    area("Kitchen", 10.0, vec![("Fish", 15.0)]),
                    area("Buffet", 8.0, vec![("Cake", 8.0)]),
                ],
            ),
        ]
    }

    #[test]
    fn test_global_selection() {
        let selection = select_global(&sample_groups(), &options(2, 1, OtherPresence::PerGroup));

        // Kitchen 60, Bar 45, Buffet 8, Cafe 4
        assert_eq!(selection.top_keys, vec!["Kitchen", "Bar"]);
        // Fish 35 beats Bread 30 once merged across groups
        assert_eq!(selection.top_categories, vec![vec!["Fish"], vec!["Lemons"]]);
        // Cake 9 over Milk 3
        assert_eq!(selection.other_categories, vec!["Cake"]);
        assert!(selection.has_residual);
    }

    #[test]
    fn test_labels_consistent_across_groups() {
        let result = coordinate_groups(&sample_groups(), &options(2, 1, OtherPresence::PerGroup));

        assert_eq!(result.len(), 2);
        assert_eq!(keys(&result[0]), vec!["Kitchen", "Bar", "Other"]);
        assert_eq!(keys(&result[1]), vec!["Kitchen", "Bar", "Other"]);

        for group in &result {
            assert_eq!(labels(&group.nodes[0]), vec!["Fish"]);
            assert_eq!(labels(&group.nodes[1]), vec!["Lemons"]);
            assert_eq!(labels(&group.nodes[2]), vec!["Cake"]);
        }
    }

    #[test]
    fn test_magnitudes_stay_local() {
        let result = coordinate_groups(&sample_groups(), &options(2, 1, OtherPresence::PerGroup));
        let north = &result[0];
        let south = &result[1];

        assert_eq!(north.nodes[0].total, 50.0);
        assert_eq!(south.nodes[0].total, 10.0);

        // North's Bar has no Lemons
        assert_eq!(
            north.nodes[1].children,
            ChildMetrics::Categories(vec![CategoryAmount::new("Lemons", 0.0)])
        );

        let north_other = &north.nodes[2];
        assert_eq!(north_other.total, 4.0);
        assert_eq!(
            north_other.children,
            ChildMetrics::Categories(vec![CategoryAmount::new("Cake", 1.0)])
        );
        assert_eq!(south.nodes[2].total, 8.0);
    }

    #[test]
    fn test_per_group_presence_skips_other_when_everything_fits() {
        let groups = vec![
            group("a", vec![area("Kitchen", 10.0, vec![]), area("Bar", 1.0, vec![])]),
            group("b", vec![area("Kitchen", 5.0, vec![])]),
        ];

        let result = coordinate_groups(&groups, &options(1, 3, OtherPresence::PerGroup));

        assert_eq!(keys(&result[0]), vec!["Kitchen", "Other"]);
        assert_eq!(keys(&result[1]), vec!["Kitchen"]);
    }

    #[test]
    fn test_uniform_presence_emits_zeroed_other() {
        let groups = vec![
            group("a", vec![area("Kitchen", 10.0, vec![]), area("Bar", 1.0, vec![("Ice", 1.0)])]),
            group("b", vec![area("Kitchen", 5.0, vec![])]),
        ];

        let result = coordinate_groups(&groups, &options(1, 3, OtherPresence::Uniform));

        assert_eq!(keys(&result[1]), vec!["Kitchen", "Other"]);
        let other = &result[1].nodes[1];
        assert_eq!(other.total, 0.0);
        assert_eq!(other.avg, 0.0);
        assert_eq!(
            other.children,
            ChildMetrics::Categories(vec![CategoryAmount::new("Ice", 0.0)])
        );
    }

    #[test]
    fn test_uniform_presence_without_residual() {
        let groups = vec![group("a", vec![area("Kitchen", 10.0, vec![])])];
        let result = coordinate_groups(&groups, &options(5, 3, OtherPresence::Uniform));
        assert_eq!(keys(&result[0]), vec!["Kitchen"]);
    }

    #[test]
    fn test_group_missing_top_area() {
        let groups = vec![
            group("a", vec![area("Kitchen", 10.0, vec![]), area("Bar", 9.0, vec![])]),
            group("b", vec![area("Bar", 1.0, vec![])]),
        ];

        let result = coordinate_groups(&groups, &options(2, 3, OtherPresence::PerGroup));

        assert_eq!(keys(&result[0]), vec!["Kitchen", "Bar"]);
        assert_eq!(keys(&result[1]), vec!["Bar"]);
    }

    #[test]
    fn test_repeated_key_rows_are_merged() {
        let groups = vec![group(
            "a",
            vec![
                area("Kitchen", 10.0, vec![("Bread", 10.0)]),
                area("Kitchen", 7.0, vec![("Bread", 3.0), ("Fish", 4.0)]),
                area("Bar", 1.0, vec![]),
            ],
        )];

        let result = coordinate_groups(&groups, &CoordinationOptions::default());

        assert_eq!(keys(&result[0]), vec!["Kitchen", "Bar"]);
        let kitchen = &result[0].nodes[0];
        assert_eq!(kitchen.total, 17.0);
        assert_eq!(kitchen.min, 7.0);
        assert_eq!(kitchen.max, 10.0);
        assert_eq!(
            kitchen.children,
            ChildMetrics::Categories(vec![
                CategoryAmount::new("Bread", 13.0),
                CategoryAmount::new("Fish", 4.0),
            ])
        );
        let total: f64 = result[0].nodes.iter().map(|n| n.total).sum();
        assert_eq!(total, 18.0);
    }

    #[test]
    fn test_repeated_key_rows_merged_into_other() {
        let groups = vec![group(
            "a",
            vec![
                area("Kitchen", 10.0, vec![]),
                area("Bar", 2.0, vec![]),
                area("Bar", 3.0, vec![]),
            ],
        )];

        let result = coordinate_groups(&groups, &options(1, 3, OtherPresence::PerGroup));

        assert_eq!(keys(&result[0]), vec!["Kitchen", "Other"]);
        assert_eq!(result[0].nodes[1].total, 5.0);
    }

    #[test]
    fn test_global_selection_with_nan_totals() {
        let groups = vec![
            group("a", vec![area("Kitchen", f64::NAN, vec![("Bread", f64::NAN)]), area("Bar", 3.0, vec![])]),
            group("b", vec![area("Buffet", 2.0, vec![("Salad", 2.0)])]),
        ];

        let selection = select_global(&groups, &options(2, 3, OtherPresence::PerGroup));

        assert_eq!(selection.top_keys, vec!["Bar", "Buffet"]);
        assert!(selection.has_residual);
    }

    #[test]
    fn test_no_groups() {
        assert!(coordinate_groups(&[], &CoordinationOptions::default()).is_empty());
        let selection = select_global(&[], &CoordinationOptions::default());
        assert!(selection.top_keys.is_empty());
        assert!(!selection.has_residual);
    }

    #[test]
    fn test_options_deserialize() {
        let opts: CoordinationOptions = serde_json::from_str(r#"{"other_presence":"uniform"}"#).unwrap();
        assert_eq!(opts.keep_top, 5);
        assert_eq!(opts.child_keep_top, 3);
        assert_eq!(opts.other_presence, OtherPresence::Uniform);
    }
}
