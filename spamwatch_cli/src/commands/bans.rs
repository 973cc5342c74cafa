use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use spamwatch_api::types::{BanLookup, NewBan};
use spamwatch_api::Client;

use crate::output::{print_ban_ids, print_bans, print_json, OutputFormat};

#[derive(Args)]
pub struct BansArgs {
    #[command(subcommand)]
    pub command: BansCommand,
}

#[derive(Subcommand)]
pub enum BansCommand {
    /// Look up the ban for a Telegram user
    Get { userid: i64 },
    /// List all bans (Admin)
    List,
    /// List only the banned user IDs (Admin)
    Ids,
    /// Ban a single user (Admin)
    Add {
        userid: i64,
        reason: String,
        /// Message that got the user banned
        #[arg(long)]
        message: Option<String>,
    },
    /// Ban every user listed in a JSON or CSV file (Admin)
    Import {
        /// JSON array or CSV with columns id,reason[,message]
        file: PathBuf,
    },
    /// Lift the ban on a user (Admin)
    Delete { userid: i64 },
}

pub async fn run(args: &BansArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        BansCommand::Get { userid } => match client.get_ban(*userid).await? {
            BanLookup::Banned(ban) => print_bans(&[ban], format)?,
            BanLookup::NotBanned => match format {
                OutputFormat::Json => {
                    print_json(&serde_json::json!({ "id": userid, "banned": false }))
                }
                _ => println!("User {} is not banned", userid),
            },
        },
        BansCommand::List => {
            let bans = client.list_bans().await?;
            eprintln!("{} bans", bans.len());
            print_bans(&bans, format)?;
        }
        BansCommand::Ids => {
            let ids = client.list_ban_ids().await?;
            print_ban_ids(&ids, format);
        }
        BansCommand::Add {
            userid,
            reason,
            message,
        } => {
            client.add_ban(*userid, reason, message.as_deref()).await?;
            eprintln!("User {} banned", userid);
        }
        BansCommand::Import { file } => {
            let contents = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let bans = parse_ban_file(file, &contents)?;
            if bans.is_empty() {
                bail!("no bans found in {}", file.display());
            }
            if bans.iter().any(|b| b.message.is_some()) {
                tracing::warn!("Messages are not sent when importing bans in bulk");
            }
            client.add_bans(&bans).await?;
            eprintln!("Imported {} bans", bans.len());
        }
        BansCommand::Delete { userid } => {
            client.delete_ban(*userid).await?;
            eprintln!("Ban on user {} lifted", userid);
        }
    }
    Ok(())
}

/// Reads bans from CSV when the file ends in `.csv`, JSON otherwise.
fn parse_ban_file(path: &Path, contents: &str) -> Result<Vec<NewBan>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        let mut reader = csv::Reader::from_reader(contents.as_bytes());
        let bans = reader
            .deserialize::<NewBan>()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("invalid ban row in {}", path.display()))?;
        return Ok(bans);
    }

    serde_json::from_str(contents)
        .with_context(|| format!("{} is not a JSON array of bans", path.display()))
}
