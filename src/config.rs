use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tool configuration, loaded from TOML with per-field defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GreenlightConfig {
    /// Optional sweeps are skipped for checkers with at least this many
    /// optional parameters.
    #[serde(default = "default_op_args_limit")]
    pub op_args_limit: usize,

    /// Optional sweeps are skipped when any optional parameter has more
    /// candidate values than this.
    #[serde(default = "default_value_to_op_args_limit")]
    pub value_to_op_args_limit: usize,

    /// Glob patterns excluded from the project file set, in addition to
    /// `.gitignore`.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// A sweep making no progress for this long marks its outstanding
    /// trials non-green and moves on.
    #[serde(default = "default_trial_timeout_secs")]
    pub trial_timeout_secs: u64,

    /// Worker count override; 0 means processing units minus one.
    #[serde(default)]
    pub jobs: usize,
}

fn default_op_args_limit() -> usize {
    3
}

fn default_value_to_op_args_limit() -> usize {
    4
}

fn default_trial_timeout_secs() -> u64 {
    30
}

impl Default for GreenlightConfig {
    fn default() -> Self {
        Self {
            op_args_limit: default_op_args_limit(),
            value_to_op_args_limit: default_value_to_op_args_limit(),
            ignore: Vec::new(),
            trial_timeout_secs: default_trial_timeout_secs(),
            jobs: 0,
        }
    }
}

impl GreenlightConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn trial_timeout(&self) -> Duration {
        Duration::from_secs(self.trial_timeout_secs)
    }

    /// Worker pool size: the configured override, or processing units minus
    /// one, never below one.
    pub fn worker_count(&self) -> usize {
        if self.jobs > 0 {
            self.jobs
        } else {
            num_cpus::get().saturating_sub(1).max(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GreenlightConfig::default();
        assert_eq!(config.op_args_limit, 3);
        assert_eq!(config.value_to_op_args_limit, 4);
        assert_eq!(config.trial_timeout_secs, 30);
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_partial_toml_uses_field_defaults() {
        let config: GreenlightConfig = toml::from_str("op_args_limit = 5").unwrap();
        assert_eq!(config.op_args_limit, 5);
        assert_eq!(config.value_to_op_args_limit, 4);
    }

    #[test]
    fn test_worker_count_override() {
        let config = GreenlightConfig {
            jobs: 2,
            ..Default::default()
        };
        assert_eq!(config.worker_count(), 2);
        assert!(GreenlightConfig::default().worker_count() >= 1);
    }
}
