#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn make_token(id: &str, kind: TokenKind) -> Token {
    Token { id: id.to_owned(), kind, x: 10.0, y: 20.0 }
}

// =============================================================
// TokenKind serde
// =============================================================

#[test]
fn kind_serde_wire_names() {
    assert_eq!(serde_json::to_string(&TokenKind::Pc).unwrap(), "\"pc\"");
    assert_eq!(serde_json::to_string(&TokenKind::Enemy).unwrap(), "\"enemy\"");
}

#[test]
fn kind_deserialize_wire_names() {
    let pc: TokenKind = serde_json::from_str("\"pc\"").unwrap();
    assert_eq!(pc, TokenKind::Pc);
    let enemy: TokenKind = serde_json::from_str("\"enemy\"").unwrap();
    assert_eq!(enemy, TokenKind::Enemy);
}

#[test]
fn kind_glyphs() {
    assert_eq!(TokenKind::Pc.glyph(), 'P');
    assert_eq!(TokenKind::Enemy.glyph(), 'E');
}

// =============================================================
// Token serde
// =============================================================

#[test]
fn token_serializes_kind_as_type_field() {
    let token = make_token("token-1-1", TokenKind::Enemy);
    let value = serde_json::to_value(&token).unwrap();
    assert_eq!(value, json!({ "id": "token-1-1", "type": "enemy", "x": 10.0, "y": 20.0 }));
}

#[test]
fn token_deserializes_from_wire_shape() {
    let token: Token =
        serde_json::from_value(json!({ "id": "t", "type": "pc", "x": 1.5, "y": -2.0 })).unwrap();
    assert_eq!(token.id, "t");
    assert_eq!(token.kind, TokenKind::Pc);
    assert_eq!(token.x, 1.5);
    assert_eq!(token.y, -2.0);
}

// =============================================================
// TokenStore insert
// =============================================================

#[test]
fn insert_adds_token() {
    let mut store = TokenStore::new();
    assert!(store.insert(make_token("a", TokenKind::Pc)));
    assert_eq!(store.len(), 1);
    assert!(store.contains("a"));
}

#[test]
fn insert_same_id_is_ignored() {
    let mut store = TokenStore::new();
    assert!(store.insert(make_token("a", TokenKind::Pc)));

    let mut dup = make_token("a", TokenKind::Enemy);
    dup.x = 999.0;
    assert!(!store.insert(dup));

    assert_eq!(store.len(), 1);
    let kept = store.get("a").unwrap();
    assert_eq!(kept.kind, TokenKind::Pc);
    assert_eq!(kept.x, 10.0);
}

#[test]
fn insert_preserves_order() {
    let mut store = TokenStore::new();
    store.insert(make_token("first", TokenKind::Pc));
    store.insert(make_token("second", TokenKind::Enemy));
    store.insert(make_token("third", TokenKind::Pc));

    let ids: Vec<&str> = store.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["first", "second", "third"]);
}

// =============================================================
// TokenStore move_to
// =============================================================

#[test]
fn move_to_repositions_existing_token() {
    let mut store = TokenStore::new();
    store.insert(make_token("a", TokenKind::Pc));

    assert!(store.move_to("a", 77.0, -3.0));
    let token = store.get("a").unwrap();
    assert_eq!(token.x, 77.0);
    assert_eq!(token.y, -3.0);
}

#[test]
fn move_to_missing_id_is_noop() {
    let mut store = TokenStore::new();
    store.insert(make_token("a", TokenKind::Pc));

    assert!(!store.move_to("ghost", 1.0, 2.0));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a").unwrap().x, 10.0);
}

#[test]
fn move_to_on_empty_store_is_noop() {
    let mut store = TokenStore::new();
    assert!(!store.move_to("a", 0.0, 0.0));
    assert!(store.is_empty());
}

// =============================================================
// TokenStore queries
// =============================================================

#[test]
fn get_missing_returns_none() {
    let store = TokenStore::new();
    assert!(store.get("nope").is_none());
}

#[test]
fn len_and_is_empty() {
    let mut store = TokenStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);

    store.insert(make_token("a", TokenKind::Pc));
    assert!(!store.is_empty());
    assert_eq!(store.len(), 1);
}
