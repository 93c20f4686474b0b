use sea_orm::{ConnectionTrait, Statement};

use engine::{EngineError, Identity, OrderFilter};

mod common;
use common::{admin, dec, engine_with_db, fields, sample_order, seller};

#[tokio::test]
async fn create_then_fetch_with_projection() {
    let (engine, _db) = engine_with_db().await;

    let mut order = sample_order("fruser1", "45.50");
    order.amount_from_donations = Some(dec("5.50"));
    order.purchases = vec![engine::ProductSale {
        product_id: "bags".to_string(),
        num_sold: 10,
        amount_charged: "40.00".to_string(),
    }];
    let id = engine.create_order(&seller("fruser1"), order).await.unwrap();
    assert!(!id.is_empty());

    let fetched = engine
        .order_by_id(
            &id,
            &fields(&[
                "orderId",
                "ownerId",
                "amountTotalCollected",
                "amountFromDonations",
                "purchases",
                "customer",
            ]),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.order_id, id);
    assert_eq!(fetched.owner_id, "fruser1");
    assert_eq!(fetched.amount_total_collected, Some(dec("45.50")));
    assert_eq!(fetched.amount_from_donations, Some(dec("5.50")));
    assert_eq!(fetched.purchases.len(), 1);
    assert_eq!(fetched.purchases[0].num_sold, 10);
    assert_eq!(fetched.customer.name, "Pat Customer");
    assert_eq!(fetched.customer.neighborhood, "Avondale");
    // Unselected fields stay at their defaults.
    assert!(fetched.last_modified_time.is_none());
}

#[tokio::test]
async fn empty_projection_defaults_to_the_id() {
    let (engine, _db) = engine_with_db().await;
    let id = engine
        .create_order(&seller("fruser1"), sample_order("fruser1", "10.00"))
        .await
        .unwrap();

    let fetched = engine.order_by_id(&id, &[]).await.unwrap().unwrap();
    assert_eq!(fetched.order_id, id);
    assert!(fetched.owner_id.is_empty());
}

#[tokio::test]
async fn zero_money_is_stored_as_absent() {
    let (engine, _db) = engine_with_db().await;

    let mut order = sample_order("fruser1", "0.00");
    order.amount_from_cash_collected = Some(dec("0"));
    let id = engine.create_order(&seller("fruser1"), order).await.unwrap();

    let fetched = engine
        .order_by_id(
            &id,
            &fields(&["amountTotalCollected", "amountFromCashCollected"]),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.amount_total_collected, None);
    assert_eq!(fetched.amount_from_cash_collected, None);
}

#[tokio::test]
async fn create_validates_the_customer_record() {
    let (engine, _db) = engine_with_db().await;

    let mut order = sample_order("fruser1", "10.00");
    order.customer.neighborhood = "none".to_string();
    let err = engine
        .create_order(&seller("fruser1"), order)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let mut order = sample_order("fruser1", "10.00");
    order.customer.phone = String::new();
    let err = engine
        .create_order(&seller("fruser1"), order)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("customer phone must be provided".to_string())
    );

    let mut order = sample_order("fruser1", "10.00");
    order.amount_total_collected = None;
    let err = engine
        .create_order(&seller("fruser1"), order)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    // A total that disagrees with the per-method amounts is rejected.
    let mut order = sample_order("fruser1", "10.00");
    order.amount_from_cash_collected = Some(dec("4.00"));
    order.amount_from_checks_collected = Some(dec("5.00"));
    let err = engine
        .create_order(&seller("fruser1"), order)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn create_for_someone_else_requires_admin() {
    let (engine, db) = engine_with_db().await;

    let err = engine
        .create_order(&seller("fruser2"), sample_order("fruser1", "10.00"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine
        .create_order(&Identity::anonymous(), sample_order("fruser1", "10.00"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Unauthenticated(_)));

    // Nothing landed in the store.
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "select count(*) from orders",
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.try_get_by_index::<i64>(0).unwrap(), 0);

    engine
        .create_order(&admin(), sample_order("fruser1", "10.00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn replace_rolls_back_on_a_bad_record() {
    let (engine, _db) = engine_with_db().await;

    let id = engine
        .create_order(&seller("fruser1"), sample_order("fruser1", "20.00"))
        .await
        .unwrap();

    // The negative zipcode violates the table's check constraint after
    // the stored row was already deleted inside the transaction.
    let mut replacement = sample_order("fruser1", "99.00");
    replacement.order_id = id.clone();
    replacement.customer.zipcode = Some(-1);
    let result = engine.replace_order(&seller("fruser1"), &replacement).await;
    assert!(result.is_err());

    let fetched = engine
        .order_by_id(&id, &fields(&["orderId", "amountTotalCollected"]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.amount_total_collected, Some(dec("20.00")));
}

#[tokio::test]
async fn replace_of_an_unknown_id_inserts() {
    let (engine, _db) = engine_with_db().await;

    let mut order = sample_order("fruser1", "20.00");
    order.order_id = "order-77".to_string();
    engine
        .replace_order(&seller("fruser1"), &order)
        .await
        .unwrap();

    let fetched = engine
        .order_by_id("order-77", &fields(&["orderId", "ownerId"]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.owner_id, "fruser1");
}

#[tokio::test]
async fn delete_checks_the_stored_owner() {
    let (engine, _db) = engine_with_db().await;

    let id = engine
        .create_order(&seller("fruser1"), sample_order("fruser1", "20.00"))
        .await
        .unwrap();

    let err = engine
        .delete_order(&seller("fruser2"), &id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
    assert!(engine.order_by_id(&id, &[]).await.unwrap().is_some());

    engine.delete_order(&seller("fruser1"), &id).await.unwrap();
    assert!(engine.order_by_id(&id, &[]).await.unwrap().is_none());

    let err = engine.delete_order(&admin(), &id).await.unwrap_err();
    assert!(matches!(err, EngineError::Database(_)));
}

#[tokio::test]
async fn unknown_projection_field_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .order_by_id("order-1", &fields(&["orderId", "shoeSize"]))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::UnknownField("shoeSize".to_string()));
}

#[tokio::test]
async fn listing_narrows_by_owner() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_order(&seller("fruser1"), sample_order("fruser1", "10.00"))
        .await
        .unwrap();
    engine
        .create_order(&seller("fruser1"), sample_order("fruser1", "20.00"))
        .await
        .unwrap();
    engine
        .create_order(&seller("fruser2"), sample_order("fruser2", "30.00"))
        .await
        .unwrap();

    let all = engine.orders(&OrderFilter::All, &[]).await.unwrap();
    assert_eq!(all.len(), 3);
    let mine = engine
        .orders(&OrderFilter::Owner("fruser1".to_string()), &[])
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);
}

#[tokio::test]
async fn spreader_listing_follows_the_attached_list() {
    let (engine, _db) = engine_with_db().await;

    let first = engine
        .create_order(&seller("fruser1"), sample_order("fruser1", "10.00"))
        .await
        .unwrap();
    let second = engine
        .create_order(&seller("fruser1"), sample_order("fruser1", "20.00"))
        .await
        .unwrap();

    let crew = vec!["fruser3".to_string(), "fruser4".to_string()];
    let err = engine
        .set_spreaders(&seller("fruser1"), &first, &crew)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    engine.set_spreaders(&admin(), &first, &crew).await.unwrap();
    engine
        .set_spreaders(&admin(), &second, &crew[1..])
        .await
        .unwrap();

    // The filter works whether or not the spreader list is selected.
    let spread = engine
        .orders(&OrderFilter::Spreader("fruser3".to_string()), &[])
        .await
        .unwrap();
    assert_eq!(spread.len(), 1);
    assert_eq!(spread[0].order_id, first);

    let spread = engine
        .orders(
            &OrderFilter::Spreader("fruser4".to_string()),
            &fields(&["orderId", "spreaders"]),
        )
        .await
        .unwrap();
    assert_eq!(spread.len(), 2);
    assert!(spread.iter().all(|o| o.spreaders.contains(&"fruser4".to_string())));

    // An empty list clears the attachment.
    engine.set_spreaders(&admin(), &first, &[]).await.unwrap();
    let spread = engine
        .orders(&OrderFilter::Spreader("fruser3".to_string()), &[])
        .await
        .unwrap();
    assert!(spread.is_empty());
}

#[tokio::test]
async fn money_collected_groups_per_owner_and_delivery() {
    let (engine, _db) = engine_with_db().await;

    let mut order = sample_order("fruser1", "10.10");
    order.delivery_id = Some(1);
    order.amount_from_cash_collected = Some(dec("10.10"));
    engine.create_order(&seller("fruser1"), order).await.unwrap();

    let mut order = sample_order("fruser1", "20.20");
    order.delivery_id = Some(1);
    order.amount_from_checks_collected = Some(dec("20.20"));
    engine.create_order(&seller("fruser1"), order).await.unwrap();

    let mut order = sample_order("fruser1", "5.00");
    order.delivery_id = Some(2);
    engine.create_order(&seller("fruser1"), order).await.unwrap();

    let mut order = sample_order("fruser2", "7.00");
    order.delivery_id = Some(1);
    engine.create_order(&seller("fruser2"), order).await.unwrap();

    let rollup = engine.orders_money_collected(None).await.unwrap();
    assert_eq!(rollup.len(), 3);
    let first = &rollup[0];
    assert_eq!(first.owner_id, "fruser1");
    assert_eq!(first.delivery_id, Some(1));
    assert_eq!(first.total_collected, dec("30.30"));
    assert_eq!(first.from_cash_collected, dec("10.10"));
    assert_eq!(first.from_checks_collected, dec("20.20"));

    let mine = engine.orders_money_collected(Some("fruser2")).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].total_collected, dec("7.00"));
}
