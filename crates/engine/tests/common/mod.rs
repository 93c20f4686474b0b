#![allow(dead_code)]

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};

use engine::{Customer, Engine, Identity, Order};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build();
    (engine, db)
}

/// Forges an unsigned bearer token the way the identity issuer shapes them.
pub fn bearer(uid: &str, roles: &[&str]) -> Identity {
    let payload = serde_json::json!({
        "preferred_username": uid,
        "groups": roles,
        "name": "Test User",
    });
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    Identity::bearer(format!("{header}.{body}.sig"))
}

pub fn admin() -> Identity {
    bearer("frboss", &["T27FrAdmins"])
}

pub fn seller(uid: &str) -> Identity {
    bearer(uid, &["T27FrSellers"])
}

pub fn dec(text: &str) -> Decimal {
    text.parse().unwrap()
}

pub fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn sample_order(owner: &str, total: &str) -> Order {
    Order {
        owner_id: owner.to_string(),
        amount_total_collected: Some(dec(total)),
        customer: Customer {
            name: "Pat Customer".to_string(),
            addr1: "12 Elm St".to_string(),
            phone: "555-0100".to_string(),
            neighborhood: "Avondale".to_string(),
            ..Customer::default()
        },
        ..Order::default()
    }
}
