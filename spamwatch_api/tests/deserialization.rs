use spamwatch_api::types::{Ban, Permission, Token};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_tokens() {
    let json = load_fixture("tokens.json");
    let tokens: Vec<Token> = serde_json::from_str(&json).unwrap();
    assert_eq!(tokens.len(), 3);

    let root = &tokens[0];
    assert_eq!(root.id, 1);
    assert_eq!(root.permission, Permission::Root);
    assert_eq!(root.userid, 175844556);
    assert!(!root.retired);

    let user = &tokens[2];
    assert_eq!(user.permission, Permission::User);
    assert!(user.retired);
}

#[test]
fn deserialize_single_token() {
    let json = load_fixture("token.json");
    let token: Token = serde_json::from_str(&json).unwrap();
    assert_eq!(token.id, 2);
    assert_eq!(token.permission, Permission::Admin);
    assert!(token.token.starts_with("adminToken"));
}

#[test]
fn deserialize_bans() {
    let json = load_fixture("bans.json");
    let bans: Vec<Ban> = serde_json::from_str(&json).unwrap();
    assert_eq!(bans.len(), 3);

    let first = &bans[0];
    assert_eq!(first.id, 777000);
    assert_eq!(first.reason, "spam");
    assert_eq!(first.admin, Some(175844556));
    assert_eq!(first.timestamp, 1581014400);
    assert_eq!(first.date.timestamp_millis(), 1581014400 * 1000);
    assert_eq!(first.message.as_deref(), Some("crypto giveaway bot"));

    assert_eq!(bans[1].message, None);

    // older API versions do not report the banning admin
    assert_eq!(bans[2].admin, None);
    assert_eq!(bans[2].date.to_rfc3339(), "2017-07-14T02:40:00+00:00");
}

#[test]
fn deserialize_unknown_permission_returns_error() {
    let json = r#"{"id": 1, "permission": "Moderator", "token": "x", "userid": 1}"#;
    assert!(serde_json::from_str::<Token>(json).is_err());
}

#[test]
fn deserialize_missing_required_fields_returns_error() {
    let json = r#"{"id": 1, "date": 0}"#;
    assert!(serde_json::from_str::<Ban>(json).is_err());
}
