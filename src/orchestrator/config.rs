//! Orchestrator configuration: concurrency and commit-batching options.

use std::collections::HashMap;

use crate::error::ConfigError;

/// Controls how rewritten groups are dispatched and committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub max_concurrent_groups: usize,
    pub partial_progress_enabled: bool,
    pub max_commits: usize,
}

impl OrchestratorConfig {
    /// A single-group-at-a-time, all-or-nothing orchestrator: the simplest
    /// valid configuration.
    pub fn new(max_concurrent_groups: usize) -> Self {
        OrchestratorConfig {
            max_concurrent_groups,
            partial_progress_enabled: false,
            max_commits: 1,
        }
    }

    pub fn with_partial_progress(mut self, max_commits: usize) -> Self {
        self.partial_progress_enabled = true;
        self.max_commits = max_commits;
        self
    }

    /// Parses the recognized orchestrator options. Unknown keys are rejected
    /// before any rewrite work begins.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, ConfigError> {
        const RECOGNIZED: &[&str] = &[
            "max-concurrent-file-group-actions",
            "partial-progress.enabled",
            "partial-progress.max-commits",
        ];
        for key in options.keys() {
            if !RECOGNIZED.contains(&key.as_str()) {
                return Err(ConfigError::UnknownOption(key.clone()));
            }
        }

        let max_concurrent_groups =
            match options.get("max-concurrent-file-group-actions") {
                Some(raw) => raw.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                    key: "max-concurrent-file-group-actions".to_string(),
                    reason: format!("`{raw}` is not a positive integer"),
                })?,
                None => 1,
            };

        let partial_progress_enabled = match options.get("partial-progress.enabled") {
            Some(raw) => raw.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                key: "partial-progress.enabled".to_string(),
                reason: format!("`{raw}` is not a boolean"),
            })?,
            None => false,
        };

        let max_commits = match options.get("partial-progress.max-commits") {
            Some(raw) => raw.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                key: "partial-progress.max-commits".to_string(),
                reason: format!("`{raw}` is not a positive integer"),
            })?,
            None => 1,
        };

        let config = OrchestratorConfig {
            max_concurrent_groups,
            partial_progress_enabled,
            max_commits,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks `maxConcurrentGroups >= 1` always, and `maxCommits >= 1` when
    /// partial progress is enabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_groups < 1 {
            return Err(ConfigError::InvariantViolation(
                "maxConcurrentGroups must be >= 1".to_string(),
            ));
        }
        if self.partial_progress_enabled && self.max_commits < 1 {
            return Err(ConfigError::InvariantViolation(
                "maxCommits must be >= 1 when partial progress is enabled".to_string(),
            ));
        }
        Ok(())
    }
}
