//! Initialization func initialize the jobguard runtime environment, including:
//! 1. override global config, from manually config or yaml file or env variable
//! 2. initialize global logger
//! 3. start the metric exporter, if it is enabled

use crate::{config, config::ConfigEntity, logging, Result};

/// `init_default` initializes jobguard using the configuration from system
/// environment and the default value.
#[inline]
pub fn init_default() -> Result<()> {
    init_jobguard(&mut String::new())
}

/// `init_with_config` initializes jobguard using given config.
#[inline]
pub fn init_with_config(config_entity: ConfigEntity) -> Result<()> {
    config::init_config_with_entity(config_entity)?;
    init_core_components()
}

/// `init_with_config_file` loads general configuration from the given YAML file
/// and initializes jobguard. A blank path is resolved from `JOBGUARD_CONFIG_FILE_PATH`.
#[inline]
pub fn init_with_config_file(config_path: &mut String) -> Result<()> {
    init_jobguard(config_path)
}

#[inline]
fn init_jobguard(config_path: &mut String) -> Result<()> {
    config::init_config_with_yaml(config_path)?;
    init_core_components()
}

fn init_core_components() -> Result<()> {
    if !config::exporter_enabled() {
        return Ok(());
    }
    cfg_if::cfg_if! {
        if #[cfg(feature = "exporter")] {
            crate::exporter::init()?;
            logging::info!(
                "[Init] Metric exporter started, addr {}{}",
                config::exporter_addr(),
                config::exporter_metrics_path()
            );
        } else {
            logging::warn!("[Init] Exporter is enabled in config, but the `exporter` feature is not compiled in");
        }
    }
    Ok(())
}
