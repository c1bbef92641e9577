//! Planner configuration: recognized options and their invariants.

use std::collections::HashMap;

use crate::error::ConfigError;

/// Default max-group-size when `max-file-group-size-bytes` is not set:
/// 100 GiB, matching the documented default for this option in the table
/// formats this subsystem's options surface is modeled on.
pub const DEFAULT_MAX_GROUP_SIZE_BYTES: u64 = 100 * 1024 * 1024 * 1024;

/// Planner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    pub target_file_size: u64,
    pub min_file_size: u64,
    pub max_file_size: u64,
    pub max_group_size: u64,
    pub min_input_files: usize,
}

impl PlannerConfig {
    /// Builds a config from an explicit `target_file_size`, applying the
    /// documented defaults for every other field:
    /// `minFileSize = 0.75 * target`, `maxFileSize = 1.80 * target`,
    /// `maxGroupSize = 100 GiB`, `minInputFiles = 5`.
    pub fn with_target(target_file_size: u64) -> Self {
        PlannerConfig {
            target_file_size,
            min_file_size: (target_file_size as f64 * 0.75) as u64,
            max_file_size: (target_file_size as f64 * 1.80) as u64,
            max_group_size: DEFAULT_MAX_GROUP_SIZE_BYTES,
            min_input_files: 5,
        }
    }

    /// Parses the recognized string-keyed options into a validated
    /// [`PlannerConfig`]. Unknown keys and invariant violations are rejected
    /// before any planning work begins.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, ConfigError> {
        const RECOGNIZED: &[&str] = &[
            "target-file-size-bytes",
            "min-file-size-bytes",
            "max-file-size-bytes",
            "min-input-files",
            "max-file-group-size-bytes",
        ];
        for key in options.keys() {
            if !RECOGNIZED.contains(&key.as_str()) {
                return Err(ConfigError::UnknownOption(key.clone()));
            }
        }

        let target_file_size = parse_required_u64(options, "target-file-size-bytes")?;
        let mut config = PlannerConfig::with_target(target_file_size);

        if let Some(v) = parse_optional_u64(options, "min-file-size-bytes")? {
            config.min_file_size = v;
        }
        if let Some(v) = parse_optional_u64(options, "max-file-size-bytes")? {
            config.max_file_size = v;
        }
        if let Some(v) = parse_optional_u64(options, "max-file-group-size-bytes")? {
            config.max_group_size = v;
        }
        if let Some(v) = parse_optional_usize(options, "min-input-files")? {
            config.min_input_files = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants `minFileSize < targetFileSize < maxFileSize`
    /// and `minInputFiles >= 1`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_input_files < 1 {
            return Err(ConfigError::InvariantViolation(
                "minInputFiles must be >= 1".to_string(),
            ));
        }
        if !(self.min_file_size < self.target_file_size) {
            return Err(ConfigError::InvariantViolation(
                "minFileSize must be < targetFileSize".to_string(),
            ));
        }
        if !(self.target_file_size < self.max_file_size) {
            return Err(ConfigError::InvariantViolation(
                "targetFileSize must be < maxFileSize".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_required_u64(options: &HashMap<String, String>, key: &str) -> Result<u64, ConfigError> {
    let raw = options
        .get(key)
        .ok_or_else(|| ConfigError::MissingRequired(key.to_string()))?;
    raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: format!("`{raw}` is not a non-negative integer"),
    })
}

fn parse_optional_u64(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<u64>, ConfigError> {
    match options.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: format!("`{raw}` is not a non-negative integer"),
            }),
    }
}

fn parse_optional_usize(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<usize>, ConfigError> {
    match options.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: format!("`{raw}` is not a non-negative integer"),
            }),
    }
}
