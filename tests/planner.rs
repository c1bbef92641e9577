// Integration tests for the planner's public pipeline: config parsing
// through to plan_all_partitions.

use std::collections::HashMap;

use compactcore::planner::{plan_all_partitions, PlannerConfig, SimpleScanTask};

fn opts(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn end_to_end_plan_skips_well_sized_files_and_groups_the_rest() {
    let options = opts(&[
        ("target-file-size-bytes", "1000"),
        ("min-file-size-bytes", "500"),
        ("max-file-size-bytes", "2000"),
        ("min-input-files", "2"),
    ]);
    let config = PlannerConfig::from_options(&options).unwrap();

    let tasks = vec![
        SimpleScanTask::new("a", 900, "p1"),   // well-sized, skipped
        SimpleScanTask::new("b", 100, "p1"),   // small, rewrite candidate
        SimpleScanTask::new("c", 150, "p1"),   // small, rewrite candidate
        SimpleScanTask::new("d", 5000, "p2"),  // oversize, its own group
    ];

    let planned = plan_all_partitions(tasks, &config);
    let p1_groups: usize = planned
        .iter()
        .find(|(p, _)| p == "p1")
        .map(|(_, g)| g.len())
        .unwrap_or(0);
    assert_eq!(p1_groups, 1, "the two small p1 files should form one group");

    let p2_groups = planned.iter().find(|(p, _)| p == "p2").unwrap();
    assert_eq!(p2_groups.1.len(), 1);
    assert_eq!(p2_groups.1[0].total_size(), 5000);
}

#[test]
fn config_rejects_target_not_strictly_between_min_and_max() {
    let options = opts(&[
        ("target-file-size-bytes", "1000"),
        ("min-file-size-bytes", "1000"),
    ]);
    assert!(PlannerConfig::from_options(&options).is_err());
}

#[test]
fn groups_never_mix_partitions() {
    let config = PlannerConfig::with_target(100);
    let tasks = vec![
        SimpleScanTask::new("a", 10, "p1"),
        SimpleScanTask::new("b", 10, "p2"),
        SimpleScanTask::new("c", 10, "p1"),
        SimpleScanTask::new("d", 10, "p2"),
        SimpleScanTask::new("e", 10, "p1"),
    ];
    let planned = plan_all_partitions(tasks, &config);
    for (partition, groups) in &planned {
        for group in groups {
            assert!(group.tasks.iter().all(|t| t.partition == *partition));
        }
    }
}
