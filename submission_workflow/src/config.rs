use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use crate::modules::submission_log::DEFAULT_STORAGE_KEY;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub submission_client: SubmissionClientConfig,
    pub submission_log: SubmissionLogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubmissionClientConfig {
    // Simulated round-trip before the mock answers
    pub latency_ms: u64,
    // Probability in [0, 1] that an otherwise valid submission fails
    pub failure_rate: f64,
    // Attempts the binary makes before giving up on transient errors
    pub max_retry_attempts: u32,
    // Seconds between those attempts
    pub retry_interval: u64,
    // Fixed seed for the failure roll, random when unset
    pub seed: Option<u64>,
}

impl Default for SubmissionClientConfig {
    fn default() -> Self {
        Self {
            latency_ms: 2000,
            failure_rate: 0.05,
            max_retry_attempts: 3,
            retry_interval: 1,
            seed: None,
        }
    }
}

impl SubmissionClientConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubmissionLogConfig {
    // Relative to the workspace root, like the default config path
    pub path: PathBuf,
    pub storage_key: String,
}

impl Default for SubmissionLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("submission_workflow/data/local_storage.json"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

pub fn load_config(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let config: Config = toml::from_str(contents)?;

    let rate = config.submission_client.failure_rate;
    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("failure_rate must be within [0, 1], got {}", rate).into());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.submission_client.latency_ms, 2000);
        assert_eq!(config.submission_client.failure_rate, 0.05);
        assert_eq!(config.submission_log.storage_key, "malama_submissions");
    }

    #[test]
    fn reads_partial_sections() {
        let config = parse_config(
            r#"
            [submission_client]
            latency_ms = 10
            seed = 7

            [submission_log]
            path = "/tmp/store.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.submission_client.latency(), Duration::from_millis(10));
        assert_eq!(config.submission_client.seed, Some(7));
        assert_eq!(config.submission_client.max_retry_attempts, 3);
        assert_eq!(config.submission_log.path, PathBuf::from("/tmp/store.json"));
        assert_eq!(config.submission_log.storage_key, "malama_submissions");
    }

    #[test]
    fn rejects_out_of_range_failure_rate() {
        let err = parse_config("[submission_client]\nfailure_rate = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("failure_rate"));
    }

    #[test]
    fn shipped_config_parses() {
        let contents = include_str!("../Config.toml");
        let config = parse_config(contents).unwrap();
        assert_eq!(config.submission_client.failure_rate, 0.05);
        assert_eq!(config.submission_log.path, SubmissionLogConfig::default().path);
    }
}
