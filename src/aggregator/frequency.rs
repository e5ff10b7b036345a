//! Nested frequency counting over the grouping dimensions.
//!
//! Records are partitioned by the first dimension's label, then within each
//! partition by the second, and so on; the leaf holds the count of records
//! in that fully-specified partition.
//!
//! The tree is an explicit tagged variant (`Branch`/`Leaf`) so consumers
//! dispatch on the tag instead of inspecting the shape of an untyped map.

use super::labels::LabeledStudent;
use log::{debug, warn};

/// Label extractor for one grouping dimension
pub type LabelFn = fn(&LabeledStudent) -> &'static str;

/// The standard dimension order: debt, tuition, scholarship, outcome
pub fn default_dimensions() -> [LabelFn; 4] {
    [
        |s| s.debt.label(),
        |s| s.tuition.label(),
        |s| s.scholarship.label(),
        |s| s.outcome.label(),
    ]
}

/// One level of the nested frequency count
///
/// Branch entries preserve first-seen insertion order; consumers that care
/// about ordering re-sort descending by count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrequencyNode {
    Branch(Vec<(String, FrequencyNode)>),
    Leaf(u64),
}

impl FrequencyNode {
    /// A root with no children and a total of zero
    pub fn empty() -> Self {
        Self::Branch(Vec::new())
    }

    /// Number of records under this node
    pub fn total(&self) -> u64 {
        match self {
            Self::Leaf(count) => *count,
            Self::Branch(entries) => entries.iter().map(|(_, child)| child.total()).sum(),
        }
    }

    /// Child entries, or None for a leaf
    pub fn children(&self) -> Option<&[(String, FrequencyNode)]> {
        match self {
            Self::Branch(entries) => Some(entries),
            Self::Leaf(_) => None,
        }
    }

    /// Look up the count at a fully-specified label path
    pub fn count_at(&self, path: &[&str]) -> Option<u64> {
        match path.split_first() {
            None => Some(self.total()),
            Some((head, tail)) => match self {
                Self::Branch(entries) => entries
                    .iter()
                    .find(|(label, _)| label == head)
                    .and_then(|(_, child)| child.count_at(tail)),
                Self::Leaf(_) => None,
            },
        }
    }

    /// Count one record under the given label path, creating intermediate
    /// branches as needed
    fn record(&mut self, path: &[&str]) {
        let Some((head, tail)) = path.split_first() else {
            if let Self::Leaf(count) = self {
                *count += 1;
            }
            return;
        };

        let Self::Branch(entries) = self else {
            // Paths have a fixed depth, a leaf is never extended
            return;
        };

        let index = match entries.iter().position(|(label, _)| label == head) {
            Some(i) => i,
            None => {
                let child = if tail.is_empty() {
                    Self::Leaf(0)
                } else {
                    Self::Branch(Vec::new())
                };
                entries.push((head.to_string(), child));
                entries.len() - 1
            }
        };

        entries[index].1.record(tail);
    }
}

/// Build the nested frequency count
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `students` - labeled records (derivation already applied)
/// * `dimensions` - label extractors in grouping order
///
/// # Returns
/// The root frequency node. Never fails; an empty input produces a
/// zero-count root and logs a warning.
pub fn build_frequency_tree(
    students: &[LabeledStudent],
    dimensions: &[LabelFn],
) -> FrequencyNode {
    debug!(
        "Aggregating {} records across {} dimensions",
        students.len(),
        dimensions.len()
    );

    if students.is_empty() {
        warn!("Aggregation input is empty, producing a zero-count root");
    }

    let mut root = FrequencyNode::empty();
    for student in students {
        let path: Vec<&str> = dimensions.iter().map(|dim| dim(student)).collect();
        root.record(&path);
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::labels::{
        DebtStatus, Outcome, ScholarshipStatus, TuitionStatus,
    };

    fn student(
        debt: DebtStatus,
        tuition: TuitionStatus,
        scholarship: ScholarshipStatus,
        outcome: Outcome,
    ) -> LabeledStudent {
        LabeledStudent {
            debt,
            tuition,
            scholarship,
            outcome,
        }
    }

    fn sample_cohort() -> Vec<LabeledStudent> {
        vec![
            student(
                DebtStatus::HasDebt,
                TuitionStatus::NotUpToDate,
                ScholarshipStatus::Holder,
                Outcome::Graduate,
            ),
            student(
                DebtStatus::HasDebt,
                TuitionStatus::NotUpToDate,
                ScholarshipStatus::Holder,
                Outcome::Graduate,
            ),
            student(
                DebtStatus::NoDebt,
                TuitionStatus::UpToDate,
                ScholarshipStatus::NonHolder,
                Outcome::Dropout,
            ),
        ]
    }

    #[test]
    fn test_root_total_equals_record_count() {
        let tree = build_frequency_tree(&sample_cohort(), &default_dimensions());
        assert_eq!(tree.total(), 3);
    }

    #[test]
    fn test_counts_at_full_paths() {
        let tree = build_frequency_tree(&sample_cohort(), &default_dimensions());

        assert_eq!(
            tree.count_at(&[
                "Has Debt",
                "Tuition Not Up to Date",
                "Holds Scholarship",
                "Graduate"
            ]),
            Some(2)
        );
        assert_eq!(
            tree.count_at(&[
                "No Debt",
                "Tuition Up to Date",
                "No Scholarship",
                "Dropout"
            ]),
            Some(1)
        );
        assert_eq!(tree.count_at(&["Has Debt", "Tuition Up to Date"]), None);
    }

    #[test]
    fn test_tree_sum_invariant() {
        fn check(node: &FrequencyNode) {
            if let Some(entries) = node.children() {
                let child_sum: u64 = entries.iter().map(|(_, c)| c.total()).sum();
                assert_eq!(node.total(), child_sum);
                for (_, child) in entries {
                    check(child);
                }
            }
        }

        let tree = build_frequency_tree(&sample_cohort(), &default_dimensions());
        check(&tree);
    }

    #[test]
    fn test_empty_input() {
        let tree = build_frequency_tree(&[], &default_dimensions());
        assert_eq!(tree, FrequencyNode::empty());
        assert_eq!(tree.total(), 0);
        assert_eq!(tree.children().map(|entries| entries.len()), Some(0));
    }

    #[test]
    fn test_determinism() {
        let cohort = sample_cohort();
        let first = build_frequency_tree(&cohort, &default_dimensions());
        let second = build_frequency_tree(&cohort, &default_dimensions());
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_seen_label_order_is_preserved() {
        let tree = build_frequency_tree(&sample_cohort(), &default_dimensions());
        let labels: Vec<&str> = tree
            .children()
            .unwrap()
            .iter()
            .map(|(label, _)| label.as_str())
            .collect();
        assert_eq!(labels, vec!["Has Debt", "No Debt"]);
    }

    #[test]
    fn test_custom_dimension_order() {
        // outcome first instead of last
        let dims: [LabelFn; 2] = [|s| s.outcome.label(), |s| s.debt.label()];
        let tree = build_frequency_tree(&sample_cohort(), &dims);

        assert_eq!(tree.count_at(&["Graduate", "Has Debt"]), Some(2));
        assert_eq!(tree.count_at(&["Dropout", "No Debt"]), Some(1));
    }
}
