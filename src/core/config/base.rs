use super::{constant::*, ConfigEntity};
use crate::{logging, utils, Error, Result};
use lazy_static::lazy_static;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

lazy_static! {
    static ref GLOBAL_CONFIG: RwLock<ConfigEntity> = RwLock::new(ConfigEntity::new());
}

#[inline]
fn global_config() -> RwLockReadGuard<'static, ConfigEntity> {
    GLOBAL_CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
}

pub fn reset_global_config(entity: ConfigEntity) {
    *GLOBAL_CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner) = entity;
}

/// Returns a copy of the effective global configuration.
pub fn global_config_entity() -> ConfigEntity {
    global_config().clone()
}

// init_config_with_yaml loads general configuration from the YAML file under provided path.
// The global config is left untouched unless the merged result is valid.
pub fn init_config_with_yaml(config_path: &mut String) -> Result<()> {
    // Priority: system environment > YAML file > default config
    let entity = resolve_yaml_config_file(config_path)?;
    apply_config_and_init_log(entity)
}

/// `init_config_with_entity` applies env overrides on top of `entity`
/// and installs the result as the global config.
pub fn init_config_with_entity(entity: ConfigEntity) -> Result<()> {
    entity.check()?;
    apply_config_and_init_log(entity)
}

pub fn override_config_from_env_and_init_log() -> Result<()> {
    apply_config_and_init_log(global_config_entity())
}

fn apply_config_and_init_log(entity: ConfigEntity) -> Result<()> {
    let entity = override_items_from_system_env(entity)?;
    entity.check()?;
    reset_global_config(entity);
    init_log();
    Ok(())
}

// resolve_yaml_config_file reads the given YAML file, without installing it.
fn resolve_yaml_config_file(config_path: &mut String) -> Result<ConfigEntity> {
    if utils::is_blank(config_path) {
        // If the config file path is absent, try to resolve it from the system env.
        *config_path = env::var(CONF_FILE_PATH_ENV_KEY).unwrap_or_else(|_| CONFIG_FILENAME.into());
    }
    load_config_from_yaml_file(config_path)
}

fn load_config_from_yaml_file(path_str: &str) -> Result<ConfigEntity> {
    if path_str == CONFIG_FILENAME {
        // keep the current global config
        return Ok(global_config_entity());
    }
    let path = Path::new(path_str);
    if !path.exists() {
        return Err(Error::msg(format!(
            "jobguard YAML configuration file does not exist: {}",
            path_str
        )));
    }
    let content = fs::read_to_string(path)?;
    let entity: ConfigEntity = serde_yaml::from_str(&content)?;
    logging::info!(
        "[Config] Resolving jobguard config from file, file {}",
        path_str
    );
    Ok(entity)
}

fn env_item<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(value) if !utils::is_blank(&value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::msg(format!("invalid value of env {}: {}", key, value))),
        _ => Ok(None),
    }
}

fn override_items_from_system_env(mut cfg: ConfigEntity) -> Result<ConfigEntity> {
    if let Ok(app_name) = env::var(APP_NAME_ENV_KEY) {
        if !utils::is_blank(&app_name) {
            cfg.config.app.app_name = app_name;
        }
    }
    if let Some(worker_count) = env_item::<usize>(WORKER_COUNT_ENV_KEY)? {
        cfg.config.pool.worker_count = worker_count;
    }
    if let Some(queue_capacity) = env_item::<usize>(QUEUE_CAPACITY_ENV_KEY)? {
        cfg.config.pool.queue_capacity = queue_capacity;
    }
    Ok(cfg)
}

fn init_log() {
    logging::logger_init(log_config_file());
    logging::info!("[Config] App name resolved, appName {}", app_name());
    logging::info!(
        "[Config] Print effective global config, globalConfig {}",
        *global_config()
    );
}

#[inline]
pub fn log_config_file() -> Option<String> {
    let file = global_config().config.log.config_file.clone();
    if utils::is_blank(&file) {
        None
    } else {
        Some(file)
    }
}

#[inline]
pub fn app_name() -> String {
    global_config().config.app.app_name.clone()
}

#[inline]
pub fn worker_count() -> usize {
    global_config().config.pool.worker_count
}

#[inline]
pub fn queue_capacity() -> usize {
    global_config().config.pool.queue_capacity
}

#[inline]
pub fn breaker_threshold() -> u32 {
    global_config().config.breaker.threshold
}

#[inline]
pub fn breaker_retry_timeout_ms() -> u64 {
    global_config().config.breaker.retry_timeout_ms
}

#[inline]
pub fn exporter_enabled() -> bool {
    global_config().config.log.exporter.enabled
}

#[inline]
pub fn exporter_addr() -> String {
    global_config().config.log.exporter.addr.clone()
}

#[inline]
pub fn exporter_metrics_path() -> String {
    global_config().config.log.exporter.metrics_path.clone()
}
