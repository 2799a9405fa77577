//! Health command implementation.

use serde_json::json;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;

use super::{block_on, connect};

/// Run the health command.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let client = connect(config)?;
    block_on(client.health())??;

    match cli.effective_output() {
        OutputFormat::Json => {
            let output = json!({ "status": "ok", "server": client.base_url() });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => println!("OK {}", client.base_url()),
    }
    Ok(())
}
