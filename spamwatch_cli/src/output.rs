use anyhow::Result;
use serde::Serialize;
use spamwatch_api::types::{Ban, Token};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct TokenRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Permission")]
    #[serde(rename = "Permission")]
    permission: String,
    #[tabled(rename = "User ID")]
    #[serde(rename = "User ID")]
    userid: i64,
    #[tabled(rename = "Retired")]
    #[serde(rename = "Retired")]
    retired: bool,
    #[tabled(rename = "Token")]
    #[serde(rename = "Token")]
    token: String,
}

#[derive(Tabled, Serialize)]
struct BanRow {
    #[tabled(rename = "User ID")]
    #[serde(rename = "User ID")]
    id: i64,
    #[tabled(rename = "Reason")]
    #[serde(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Admin")]
    #[serde(rename = "Admin")]
    admin: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Message")]
    #[serde(rename = "Message")]
    message: String,
}

// -- Row builders --

fn build_token_rows(tokens: &[Token]) -> Vec<TokenRow> {
    tokens
        .iter()
        .map(|t| TokenRow {
            id: t.id,
            permission: t.permission.to_string(),
            userid: t.userid,
            retired: t.retired,
            token: mask_token(&t.token),
        })
        .collect()
}

fn build_ban_rows(bans: &[Ban]) -> Vec<BanRow> {
    bans.iter()
        .map(|b| BanRow {
            id: b.id,
            reason: b.reason.clone(),
            admin: b.admin.map(|a| a.to_string()).unwrap_or_default(),
            date: b.date.format("%Y-%m-%d %H:%M:%S").to_string(),
            message: b.message.clone().unwrap_or_default(),
        })
        .collect()
}

/// Keeps the first four characters of a secret.
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 4 {
        "*".repeat(visible.chars().count())
    } else {
        format!("{}…", visible)
    }
}

// -- Dispatch --

pub fn print_tokens(tokens: &[Token], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&tokens),
        OutputFormat::Csv => print_csv(build_token_rows(tokens))?,
        OutputFormat::Table => println!("{}", Table::new(build_token_rows(tokens))),
        OutputFormat::Markdown => print_markdown(build_token_rows(tokens)),
    }
    Ok(())
}

pub fn print_bans(bans: &[Ban], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&bans),
        OutputFormat::Csv => print_csv(build_ban_rows(bans))?,
        OutputFormat::Table => println!("{}", Table::new(build_ban_rows(bans))),
        OutputFormat::Markdown => print_markdown(build_ban_rows(bans)),
    }
    Ok(())
}

/// One id per line, except JSON which prints an array.
pub fn print_ban_ids(ids: &[i64], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&ids),
        _ => {
            for id in ids {
                println!("{}", id);
            }
        }
    }
}

// -- Markdown output --

fn print_markdown<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

fn print_csv<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
