//! End-to-end tests over the whole pipeline: CSV bytes in, hierarchy,
//! charts and summary JSON out.

use cohort_charts::aggregator::{
    build_frequency_tree, default_dimensions, label_records, CohortStats,
};
use cohort_charts::aggregator::metrics::calculate_top_segments;
use cohort_charts::chart::{generate_sunburst, generate_treemap, ChartConfig};
use cohort_charts::hierarchy::{percent, HierarchyNode};
use cohort_charts::output::{read_summary, write_summary};
use cohort_charts::parser::{read_students_from_reader, to_summary};

const DATASET: &str = "\
Debtor;Tuition fees up to date;Scholarship holder;Target
1;0;1;Graduate
1;0;1;Graduate
0;1;0;Dropout
0;1;1;Enrolled
0;1;0;Dropout
1;1;0;Graduate
";

fn build_hierarchy(root_name: &str) -> (HierarchyNode, u64) {
    let records = read_students_from_reader(DATASET.as_bytes()).unwrap();
    let students = label_records(&records);
    let tree = build_frequency_tree(&students, &default_dimensions());
    let total = tree.total();
    (HierarchyNode::from_frequency(&tree, root_name), total)
}

#[test]
fn test_csv_to_hierarchy() {
    let (root, total) = build_hierarchy("Students");

    assert_eq!(total, 6);
    assert_eq!(root.name, "Students");
    assert_eq!(root.value(), 6);
    assert_eq!(root.max_depth(), 4);

    // depth-1 groups are the debt labels
    let names: Vec<&str> = root.children().iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"Has Debt"));
    assert!(names.contains(&"No Debt"));
}

#[test]
fn test_empty_dataset_produces_zero_count_root() {
    let records =
        read_students_from_reader("Debtor;Tuition fees up to date;Scholarship holder;Target\n".as_bytes())
            .unwrap();
    let students = label_records(&records);
    let tree = build_frequency_tree(&students, &default_dimensions());
    let root = HierarchyNode::from_frequency(&tree, "Students");

    assert_eq!(root.name, "Students");
    assert!(root.children().is_empty());
    assert_eq!(root.value(), 0);
}

#[test]
fn test_charts_render_from_csv() {
    let (root, _) = build_hierarchy("Students");
    let config = ChartConfig::new().with_title("Student Cohort");

    let treemap = generate_treemap(&root, Some(&config)).unwrap();
    let sunburst = generate_sunburst(&root, Some(&config)).unwrap();

    for svg in [&treemap, &sunburst] {
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Student Cohort"));
        assert!(svg.contains("<title>"));
        assert!(svg.contains("Graduate") || svg.contains("Dropout"));
    }

    // treemap cells and sunburst arcs both carry the ancestor-path tooltip
    assert!(treemap.contains("\u{2192}"));
    assert!(sunburst.contains("\u{2192}"));
}

#[test]
fn test_summary_round_trip() {
    let records = read_students_from_reader(DATASET.as_bytes()).unwrap();
    let students = label_records(&records);
    let tree = build_frequency_tree(&students, &default_dimensions());
    let stats = CohortStats::collect(&students);
    let segments = calculate_top_segments(&tree, tree.total(), 20);

    let summary = to_summary("student.csv", tree.total(), stats.to_breakdown(), segments);

    let temp_file = tempfile::NamedTempFile::new().unwrap();
    write_summary(&summary, temp_file.path()).unwrap();
    let loaded = read_summary(temp_file.path()).unwrap();

    assert_eq!(loaded.total_students, 6);
    assert_eq!(loaded.source, "student.csv");
    assert_eq!(loaded.breakdown.by_outcome.get("Graduate"), Some(&3));
    assert_eq!(loaded.breakdown.by_outcome.get("Dropout"), Some(&2));
    assert_eq!(loaded.breakdown.by_outcome.get("Enrolled"), Some(&1));

    let leaf_total: u64 = loaded.top_segments.iter().map(|s| s.count).sum();
    assert_eq!(leaf_total, 6);
}

#[test]
fn test_percent_display_rounding() {
    assert_eq!(percent(1, 3), 33.3);
    assert_eq!(percent(1, 6), 16.7);
}
