//! The `version` and `stats` subcommands.

use anyhow::Result;
use spamwatch_api::Client;

use crate::output::print_json;

pub async fn version(client: &Client) -> Result<()> {
    let version = client.version().await?;
    print_json(&version);
    Ok(())
}

pub async fn stats(client: &Client) -> Result<()> {
    let stats = client.stats().await?;
    print_json(&stats);
    Ok(())
}
