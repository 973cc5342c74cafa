use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use spamwatch_api::types::{CreatedToken, Permission};
use spamwatch_api::Client;

use crate::output::{print_tokens, OutputFormat};

#[derive(Args)]
pub struct TokensArgs {
    #[command(subcommand)]
    pub command: TokensCommand,
}

#[derive(Subcommand)]
pub enum TokensCommand {
    /// List all tokens (Root only)
    List,
    /// Show the token this client authenticates with
    #[command(name = "self")]
    Own,
    /// Get a token by its ID (Root only)
    Get { id: i64 },
    /// List the tokens owned by a Telegram user (Root only)
    User { userid: i64 },
    /// Create a token for a Telegram user (Root only)
    Create {
        userid: i64,
        /// Permission tier: root, admin, user
        permission: Permission,
    },
    /// Retire a token by its ID (Root only)
    Delete { id: i64 },
}

pub async fn run(args: &TokensArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        TokensCommand::List => {
            let tokens = client.list_tokens().await?;
            print_tokens(&tokens, format)?;
        }
        TokensCommand::Own => {
            let token = client.get_self_token().await?;
            print_tokens(&[token], format)?;
        }
        TokensCommand::Get { id } => {
            let token = client.get_token(*id).await?;
            print_tokens(&[token], format)?;
        }
        TokensCommand::User { userid } => {
            let tokens = client.get_tokens_by_user(*userid).await?;
            print_tokens(&tokens, format)?;
        }
        TokensCommand::Create { userid, permission } => {
            match client.create_token(*userid, *permission).await? {
                CreatedToken::Created(token) => {
                    tracing::info!(
                        "Created {} token {} for user {}",
                        token.permission,
                        token.id,
                        userid
                    );
                    print_tokens(&[token], format)?;
                }
                CreatedToken::Rejected => {
                    bail!("token creation for user {} was rejected by the API", userid)
                }
            }
        }
        TokensCommand::Delete { id } => {
            client.delete_token(*id).await?;
            eprintln!("Token {} deleted", id);
        }
    }
    Ok(())
}
