//! Output-file-count and split-size rounding policy.

use super::config::PlannerConfig;

/// `writeMaxFileSize = target + (max - target) / 2`: the planner writes
/// slightly above `target` to absorb serialization expansion and avoid
/// sliver remainder files.
pub fn write_max_file_size(config: &PlannerConfig) -> u64 {
    config.target_file_size + (config.max_file_size - config.target_file_size) / 2
}

fn ceil_div(a: u64, b: u64) -> u64 {
    (a + b - 1) / b
}

/// Computes how many output files a group totaling `total` bytes should
/// split into, per the rounding policy below.
pub fn num_output_files(total: u64, config: &PlannerConfig) -> u64 {
    let target = config.target_file_size;
    if total < target {
        return 1;
    }

    let hi = ceil_div(total, target);
    let lo = total / target;
    let remainder = total % target;

    if remainder > config.min_file_size {
        return hi;
    }

    // remainder <= min_file_size, and total >= target so lo >= 1.
    let avg = total as f64 / lo as f64;
    let write_max = write_max_file_size(config) as f64;
    let cap = (1.1 * target as f64).min(write_max);
    if avg < cap {
        lo
    } else {
        hi
    }
}

/// `splitSize = min(T / numOutputFiles(T), writeMaxFileSize)`.
pub fn split_size(total: u64, config: &PlannerConfig) -> u64 {
    let files = num_output_files(total, config);
    (total / files).min(write_max_file_size(config))
}
