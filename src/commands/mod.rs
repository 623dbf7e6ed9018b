pub mod aggregate;
pub mod init;
pub mod score;

pub use aggregate::handle_aggregate;
pub use init::init_config;
pub use score::handle_score;

use crate::config::{load_config, load_config_file, CorridormapConfig};
use anyhow::Result;
use std::path::Path;

/// Explicit config file if given, otherwise the discovered one.
pub fn load_configuration(explicit: Option<&Path>) -> Result<CorridormapConfig> {
    match explicit {
        Some(path) => Ok(load_config_file(path)?),
        None => Ok(load_config()),
    }
}
