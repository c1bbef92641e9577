//! Assigns dispatch order and identifiers to planned groups before rewriting.

use crate::planner::{next_group_id, FileGroup, FileGroupInfo, ScanTask};

/// Enumerates partitions in the order given, and within each partition the
/// groups in planner order, assigning a fresh `group_id`, a monotonically
/// increasing `global_index` across the whole run, and a per-partition
/// `partition_index`.
///
/// The order groups appear in the returned `Vec` is the dispatch order; the
/// order workers actually execute them in once submitted to the worker pool
/// is unspecified.
pub fn dispatch_order<T: ScanTask>(
    planned: Vec<(String, Vec<FileGroup<T>>)>,
) -> Vec<(FileGroupInfo, FileGroup<T>)> {
    let mut out = Vec::new();
    let mut global_index = 0usize;
    for (partition, groups) in planned {
        for (partition_index, group) in groups.into_iter().enumerate() {
            global_index += 1;
            let info = FileGroupInfo {
                group_id: next_group_id(),
                global_index,
                partition_index: partition_index + 1,
                partition: partition.clone(),
            };
            out.push((info, group));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::SimpleScanTask;

    fn group(partition: &str, len: u64) -> FileGroup<SimpleScanTask> {
        FileGroup::new(
            partition.to_string(),
            vec![SimpleScanTask::new("t", len, partition)],
        )
    }

    #[test]
    fn global_index_is_monotone_across_partitions() {
        let planned = vec![
            ("a".to_string(), vec![group("a", 1), group("a", 2)]),
            ("b".to_string(), vec![group("b", 3)]),
        ];
        let dispatched = dispatch_order(planned);
        let indices: Vec<usize> = dispatched.iter().map(|(info, _)| info.global_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn partition_index_restarts_per_partition() {
        let planned = vec![
            ("a".to_string(), vec![group("a", 1), group("a", 2)]),
            ("b".to_string(), vec![group("b", 3), group("b", 4)]),
        ];
        let dispatched = dispatch_order(planned);
        let per_partition: Vec<(String, usize)> = dispatched
            .iter()
            .map(|(info, _)| (info.partition.clone(), info.partition_index))
            .collect();
        assert_eq!(
            per_partition,
            vec![
                ("a".to_string(), 1),
                ("a".to_string(), 2),
                ("b".to_string(), 1),
                ("b".to_string(), 2),
            ]
        );
    }

    #[test]
    fn group_ids_are_unique_across_dispatch() {
        let planned = vec![("a".to_string(), vec![group("a", 1), group("a", 2), group("a", 3)])];
        let dispatched = dispatch_order(planned);
        let mut ids: Vec<u64> = dispatched.iter().map(|(info, _)| info.group_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
