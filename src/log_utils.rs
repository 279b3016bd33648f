//! Logger setup for the binary and tests.

use anyhow::Result;
use log::LevelFilter;

/// Installs `env_logger` at `Debug`, overridable through `RUST_LOG`.
pub fn init_logging() -> Result<()> {
    env_logger::builder().filter_level(LevelFilter::Debug).parse_default_env().try_init()?;
    Ok(())
}

/// Test-friendly logger; repeated calls are ignored.
pub fn init_test_logging() {
    let _ = env_logger::builder().filter_level(LevelFilter::Warn).is_test(true).try_init();
}
