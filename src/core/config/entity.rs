use super::constant::*;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    // app_name represents the name of current running service.
    pub app_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            app_name: DEFAULT_APP_NAME.into(),
        }
    }
}

// ExporterConfig represents exporter settings
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExporterConfig {
    // enabled decides whether the initialization starts the metrics endpoint
    pub enabled: bool,
    pub addr: String,
    pub metrics_path: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        ExporterConfig {
            enabled: false,
            addr: EXPORTER_ADDR.into(),
            metrics_path: EXPORTER_METRICS_PATH.into(),
        }
    }
}

// LogConfig represent the configuration of logging.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub exporter: ExporterConfig,
    // config_file is only read by the log4rs adapter
    pub config_file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            exporter: ExporterConfig::default(),
            config_file: LOG_CONFIG_FILE.into(),
        }
    }
}

// PoolConfig holds the defaults used when a batch does not specify its own sizes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PoolConfig {
    pub worker_count: usize,
    // queue_capacity bounds both the job queue and the result queue
    pub queue_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            worker_count: DEFAULT_WORKER_COUNT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

// BreakerConfig is the default rule of breakers built from configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BreakerConfig {
    pub threshold: u32,
    pub retry_timeout_ms: u64,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        BreakerConfig {
            threshold: DEFAULT_BREAKER_THRESHOLD,
            retry_timeout_ms: DEFAULT_RETRY_TIMEOUT_MS,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct JobguardConfig {
    pub app: AppConfig,
    pub log: LogConfig,
    pub pool: PoolConfig,
    pub breaker: BreakerConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConfigEntity {
    pub version: String,
    #[serde(default)]
    pub config: JobguardConfig,
}

impl Default for ConfigEntity {
    fn default() -> Self {
        ConfigEntity {
            version: JOBGUARD_VERSION.into(),
            config: JobguardConfig::default(),
        }
    }
}

impl ConfigEntity {
    pub fn new() -> Self {
        ConfigEntity::default()
    }

    pub fn check(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(Error::msg("empty version"));
        }
        if self.config.app.app_name.is_empty() {
            return Err(Error::msg("empty app name"));
        }
        if self.config.pool.worker_count == 0 {
            return Err(Error::msg(
                "illegal pool configuration: worker_count must be at least 1",
            ));
        }
        if self.config.pool.queue_capacity == 0 {
            return Err(Error::msg(
                "illegal pool configuration: queue_capacity must be at least 1",
            ));
        }
        if self.config.breaker.threshold == 0 {
            return Err(Error::msg(
                "illegal breaker configuration: threshold must be at least 1",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ConfigEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmtted = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", fmtted)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(ConfigEntity::new().check().is_ok());
    }

    #[test]
    fn invalid_items() {
        let mut entity = ConfigEntity::new();
        entity.version = String::new();
        assert!(entity.check().is_err());

        let mut entity = ConfigEntity::new();
        entity.config.app.app_name = String::new();
        assert!(entity.check().is_err());

        let mut entity = ConfigEntity::new();
        entity.config.pool.worker_count = 0;
        assert!(entity.check().is_err());

        let mut entity = ConfigEntity::new();
        entity.config.pool.queue_capacity = 0;
        assert!(entity.check().is_err());

        let mut entity = ConfigEntity::new();
        entity.config.breaker.threshold = 0;
        assert!(entity.check().is_err());
    }

    #[test]
    fn partial_yaml() {
        let entity: ConfigEntity = serde_yaml::from_str(
            "version: v1\nconfig:\n  pool:\n    worker_count: 8\n",
        )
        .unwrap();
        assert_eq!(entity.config.pool.worker_count, 8);
        assert_eq!(entity.config.pool.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(entity.config.breaker, BreakerConfig::default());
        assert_eq!(entity.config.app.app_name, DEFAULT_APP_NAME);
    }

    #[test]
    fn display_as_json() {
        let fmtted = format!("{}", ConfigEntity::new());
        assert!(fmtted.contains("\"worker_count\": 3"));
    }
}
