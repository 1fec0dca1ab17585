// default app settings
pub const JOBGUARD_VERSION: &str = "v1";
pub const DEFAULT_APP_NAME: &str = "unknown_service";
pub const APP_NAME_ENV_KEY: &str = "JOBGUARD_APP_NAME";
pub const WORKER_COUNT_ENV_KEY: &str = "JOBGUARD_WORKER_COUNT";
pub const QUEUE_CAPACITY_ENV_KEY: &str = "JOBGUARD_QUEUE_CAPACITY";
pub const CONF_FILE_PATH_ENV_KEY: &str = "JOBGUARD_CONFIG_FILE_PATH";
pub const CONFIG_FILENAME: &str = "USE_DEFAULT_CONFIGURATION";

// default pool settings
pub const DEFAULT_WORKER_COUNT: usize = 3;
pub const DEFAULT_QUEUE_CAPACITY: usize = 20;

// default circuit breaker settings
pub const DEFAULT_BREAKER_THRESHOLD: u32 = 3;
pub const DEFAULT_RETRY_TIMEOUT_MS: u64 = 1000;

// default exporter settings
pub const EXPORTER_ADDR: &str = "127.0.0.1:9091";
pub const EXPORTER_METRICS_PATH: &str = "/metrics";

// default log settings
pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const LOG_CONFIG_FILE: &str = "testdata/config/log4rs.yaml";
