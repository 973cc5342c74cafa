//! Parsing for the `banlist/all` endpoint.
//!
//! That endpoint answers with plain text rather than JSON: one banned user id
//! per line, or a single bare id when only one ban exists.

use crate::Error;

/// Parses a `banlist/all` body into user ids.
///
/// An empty body yields no ids. A body without line breaks is a single id.
pub fn parse_ban_ids(body: &str) -> Result<Vec<i64>, Error> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    if !body.contains('\n') {
        return parse_id(body).map(|id| vec![id]);
    }

    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_id)
        .collect()
}

fn parse_id(line: &str) -> Result<i64, Error> {
    line.parse::<i64>()
        .map_err(|e| Error::Decode(format!("invalid user id '{}' in ban list: {}", line, e)))
}
