//! mod `api` provides the topmost fundamental APIs for users using jobguard.
//! Initialization is optional, without it every pool and breaker uses the default config.
//! There are three ways to perform initialization:
//!
//!  1. `init_default()`, using the system environment and default config to initialize.
//!  2. `init_with_config(config_entity: config::ConfigEntity)`, using customized config entity to initialize.
//!  3. `init_with_config_file(config_path: &mut String)`, using yaml file to initialize.
//!
//! Then a whole batch is carried out by `BatchBuilder`, and breakers following the
//! configured rule are built by `breaker_from_config`.

mod batch;
mod init;

pub use batch::*;
pub use init::*;

use crate::{circuitbreaker::{CircuitBreaker, Rule}, Result};
use std::sync::Arc;

/// `breaker_from_config` builds a shareable breaker named `name`,
/// with the threshold and retry timeout of the global config.
pub fn breaker_from_config<S: Into<String>>(name: S) -> Result<Arc<CircuitBreaker>> {
    let breaker = CircuitBreaker::from_rule(Arc::new(Rule::from_config(name)))?;
    Ok(Arc::new(breaker))
}
