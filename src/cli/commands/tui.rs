//! TUI launcher command.

use crate::config::Config;
use crate::error::Result;

use super::connect;

/// Run the TUI against the configured server.
pub fn run(config: &Config) -> Result<()> {
    let client = connect(config)?;
    crate::tui::run(config, client)
}
