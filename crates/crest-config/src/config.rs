//! The plugin configuration document.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crest_scoring::{InvalidConfig, ScoringConfig};

use crate::error::ConfigError;

/// Where the scheduler deployment mounts the policy ConfigMap.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/crest/scheduler-policy.json";

/// Global configuration for the scheduler plugin.
///
/// Parsed from a JSON file in a separate ConfigMap. Everything outside
/// `scoring` parameterizes plugin plumbing — reconcile workers, Kubernetes
/// CRUD timeouts, metric labels. It is decoded and validated here so the
/// process can refuse to start on a bad document; the knobs themselves are
/// consumed by the subsystems they name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Node-scoring policy: where pods should land, by resource fullness.
    pub scoring: ScoringConfig,

    /// Fraction of total allocated resources above which VMs should be
    /// migrated off a node to bring usage back down.
    pub watermark: f64,

    /// Name this scheduler registers under, so it can recognize pods that
    /// a previous version of itself handled.
    pub scheduler_name: String,

    /// Number of parallel workers draining the global reconcile queue.
    pub reconcile_workers: i64,

    /// Consecutive reconcile failures after which the failing object gets
    /// its own log line, bridging from "N objects failing" metrics to the
    /// objects in question.
    pub log_successive_failures_threshold: i64,

    /// Maximum time, in seconds, allowed for handling the initial event
    /// backlog from reading cluster state on startup. Running over fails
    /// plugin creation and the scheduler pod retries.
    pub startup_event_handling_timeout_seconds: i64,

    /// Timeout, in seconds, for creating, updating, or deleting singular
    /// Kubernetes objects.
    #[serde(rename = "k8sCRUDTimeoutSeconds")]
    pub k8s_crud_timeout_seconds: i64,

    /// Minimum wait, in seconds, between successive patches of the same
    /// VirtualMachine object.
    pub patch_retry_wait_seconds: i64,

    /// Extra labels to annotate node metrics with, keyed by metric label
    /// name, valued by the Kubernetes node label to read it from.
    #[serde(default)]
    pub node_metric_labels: HashMap<String, String>,

    /// Namespaces the plugin treats as if their pods do not exist — used
    /// for the overprovisioning namespace whose paused pods only exist to
    /// trigger cluster-autoscaler. Filter-time resource counting still sees
    /// them, so they stay evictable; that exception lives with the caller.
    #[serde(default)]
    pub ignored_namespaces: Vec<String>,
}

impl Config {
    /// Validate the whole document, reporting the first violation with its
    /// JSON path.
    ///
    /// Called once by [`Config::from_file`]; a config that passed is never
    /// mutated afterwards.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        self.scoring.validate().map_err(|e| e.nested("scoring"))?;

        if self.scheduler_name.is_empty() {
            return Err(InvalidConfig::new("schedulerName", "string cannot be empty"));
        }
        if self.reconcile_workers <= 0 {
            return Err(InvalidConfig::new("reconcileWorkers", "value must be > 0"));
        }
        if self.log_successive_failures_threshold <= 0 {
            return Err(InvalidConfig::new(
                "logSuccessiveFailuresThreshold",
                "value must be > 0",
            ));
        }
        if self.startup_event_handling_timeout_seconds <= 0 {
            return Err(InvalidConfig::new(
                "startupEventHandlingTimeoutSeconds",
                "value must be > 0",
            ));
        }
        if self.k8s_crud_timeout_seconds <= 0 {
            return Err(InvalidConfig::new(
                "k8sCRUDTimeoutSeconds",
                "value must be > 0",
            ));
        }
        if self.patch_retry_wait_seconds <= 0 {
            return Err(InvalidConfig::new(
                "patchRetryWaitSeconds",
                "value must be > 0",
            ));
        }
        if self.watermark <= 0.0 {
            return Err(InvalidConfig::new("watermark", "value must be > 0"));
        }
        if self.watermark > 1.0 {
            return Err(InvalidConfig::new("watermark", "value must be <= 1"));
        }

        Ok(())
    }

    /// Load and validate a configuration file.
    ///
    /// Decoding is strict: unknown fields anywhere in the document are a
    /// [`ConfigError::Parse`]. The returned config has already passed
    /// [`Config::validate`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(?path, scheduler = %config.scheduler_name, "configuration loaded");
        Ok(config)
    }

    /// Whether the plugin should pretend pods in `namespace` do not exist.
    pub fn ignored_namespace(&self, namespace: &str) -> bool {
        self.ignored_namespaces.iter().any(|ns| ns == namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            scoring: ScoringConfig {
                min_usage_score: 0.2,
                max_usage_score: 0.5,
                score_peak: 0.7,
                randomize: false,
            },
            watermark: 0.9,
            scheduler_name: "crest-scheduler".to_string(),
            reconcile_workers: 4,
            log_successive_failures_threshold: 10,
            startup_event_handling_timeout_seconds: 60,
            k8s_crud_timeout_seconds: 5,
            patch_retry_wait_seconds: 3,
            node_metric_labels: HashMap::new(),
            ignored_namespaces: Vec::new(),
        }
    }

    #[test]
    fn accepts_a_valid_document() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn scoring_violations_carry_the_nested_path() {
        let mut config = valid_config();
        config.scoring.min_usage_score = 1.5;

        let err = config.validate().unwrap_err();
        assert_eq!(err.path, "scoring.minUsageScore");
        assert_eq!(err.message, "value must be between 0 and 1, inclusive");
    }

    #[test]
    fn rejects_empty_scheduler_name() {
        let mut config = valid_config();
        config.scheduler_name.clear();

        let err = config.validate().unwrap_err();
        assert_eq!(err.path, "schedulerName");
        assert_eq!(err.message, "string cannot be empty");
    }

    #[test]
    fn rejects_non_positive_worker_and_timeout_knobs() {
        let cases: [(&str, fn(&mut Config)); 5] = [
            ("reconcileWorkers", |c| c.reconcile_workers = 0),
            ("logSuccessiveFailuresThreshold", |c| {
                c.log_successive_failures_threshold = -1
            }),
            ("startupEventHandlingTimeoutSeconds", |c| {
                c.startup_event_handling_timeout_seconds = 0
            }),
            ("k8sCRUDTimeoutSeconds", |c| c.k8s_crud_timeout_seconds = -5),
            ("patchRetryWaitSeconds", |c| c.patch_retry_wait_seconds = 0),
        ];

        for (path, break_field) in cases {
            let mut config = valid_config();
            break_field(&mut config);

            let err = config.validate().unwrap_err();
            assert_eq!(err.path, path);
            assert_eq!(err.message, "value must be > 0");
        }
    }

    #[test]
    fn watermark_must_be_a_usable_fraction() {
        let mut config = valid_config();
        config.watermark = 0.0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.path, "watermark");
        assert_eq!(err.message, "value must be > 0");

        config.watermark = 1.2;
        let err = config.validate().unwrap_err();
        assert_eq!(err.path, "watermark");
        assert_eq!(err.message, "value must be <= 1");

        config.watermark = 1.0;
        assert!(config.validate().is_ok(), "a full watermark is allowed");
    }

    #[test]
    fn scoring_is_checked_before_everything_else() {
        let mut config = valid_config();
        config.scoring.score_peak = 2.0;
        config.scheduler_name.clear();
        config.watermark = 0.0;

        let err = config.validate().unwrap_err();
        assert_eq!(err.path, "scoring.scorePeak");
    }

    #[test]
    fn ignored_namespace_is_plain_membership() {
        let mut config = valid_config();
        config.ignored_namespaces = vec!["overprovisioning".to_string(), "kube-system".to_string()];

        assert!(config.ignored_namespace("overprovisioning"));
        assert!(config.ignored_namespace("kube-system"));
        assert!(!config.ignored_namespace("default"));
        assert!(!config.ignored_namespace(""));
    }

    #[test]
    fn decodes_every_wire_field() {
        let config: Config = serde_json::from_str(
            r#"{
                "scoring": {
                    "minUsageScore": 0.2,
                    "maxUsageScore": 0.5,
                    "scorePeak": 0.7,
                    "randomize": true
                },
                "watermark": 0.85,
                "schedulerName": "crest-scheduler",
                "reconcileWorkers": 8,
                "logSuccessiveFailuresThreshold": 25,
                "startupEventHandlingTimeoutSeconds": 120,
                "k8sCRUDTimeoutSeconds": 10,
                "patchRetryWaitSeconds": 2,
                "nodeMetricLabels": {
                    "availability_zone": "topology.kubernetes.io/zone"
                },
                "ignoredNamespaces": ["overprovisioning"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.scoring.score_peak, 0.7);
        assert!(config.scoring.randomize);
        assert_eq!(config.watermark, 0.85);
        assert_eq!(config.scheduler_name, "crest-scheduler");
        assert_eq!(config.reconcile_workers, 8);
        assert_eq!(config.log_successive_failures_threshold, 25);
        assert_eq!(config.startup_event_handling_timeout_seconds, 120);
        assert_eq!(config.k8s_crud_timeout_seconds, 10);
        assert_eq!(config.patch_retry_wait_seconds, 2);
        assert_eq!(
            config.node_metric_labels.get("availability_zone").map(String::as_str),
            Some("topology.kubernetes.io/zone")
        );
        assert_eq!(config.ignored_namespaces, vec!["overprovisioning"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn optional_collections_default_to_empty() {
        let config: Config = serde_json::from_str(
            r#"{
                "scoring": {"minUsageScore": 0.0, "maxUsageScore": 1.0, "scorePeak": 0.5},
                "watermark": 0.9,
                "schedulerName": "crest-scheduler",
                "reconcileWorkers": 1,
                "logSuccessiveFailuresThreshold": 1,
                "startupEventHandlingTimeoutSeconds": 1,
                "k8sCRUDTimeoutSeconds": 1,
                "patchRetryWaitSeconds": 1
            }"#,
        )
        .unwrap();

        assert!(config.node_metric_labels.is_empty());
        assert!(config.ignored_namespaces.is_empty());
        assert!(!config.scoring.randomize);
    }

    #[test]
    fn rejects_unknown_top_level_fields() {
        let result = serde_json::from_str::<Config>(
            r#"{
                "scoring": {"minUsageScore": 0.0, "maxUsageScore": 1.0, "scorePeak": 0.5},
                "watermark": 0.9,
                "schedulerName": "crest-scheduler",
                "reconcileWorkers": 1,
                "logSuccessiveFailuresThreshold": 1,
                "startupEventHandlingTimeoutSeconds": 1,
                "k8sCRUDTimeoutSeconds": 1,
                "patchRetryWaitSeconds": 1,
                "watermerk": 0.5
            }"#,
        );
        assert!(result.is_err(), "typoed field should fail to decode");
    }

    #[test]
    fn missing_required_fields_fail_at_decode_time() {
        // No watermark.
        let result = serde_json::from_str::<Config>(
            r#"{
                "scoring": {"minUsageScore": 0.0, "maxUsageScore": 1.0, "scorePeak": 0.5},
                "schedulerName": "crest-scheduler",
                "reconcileWorkers": 1,
                "logSuccessiveFailuresThreshold": 1,
                "startupEventHandlingTimeoutSeconds": 1,
                "k8sCRUDTimeoutSeconds": 1,
                "patchRetryWaitSeconds": 1
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn crud_timeout_uses_the_exact_wire_spelling() {
        // The rename matters: plain camelCase would produce
        // "k8sCrudTimeoutSeconds" and silently break existing documents.
        let json = serde_json::to_string(&valid_config()).unwrap();
        assert!(json.contains("\"k8sCRUDTimeoutSeconds\""));
        assert!(!json.contains("k8sCrudTimeoutSeconds"));
    }
}
