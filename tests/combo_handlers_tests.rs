//! Combo handlers over the in-memory store
use std::sync::Arc;

use combo_handler_patcher::combo::codec::{StoredCombo, StoredProduct};
use combo_handler_patcher::combo::{
    ComboHandlers, ComboInput, ComboItem, ComboStore, ComboUpdate, MemoryStore, Product, Variant,
};
use serde_json::json;

fn product(id: i64, stock: i64, variants: Option<Vec<i64>>) -> Product {
    Product {
        id,
        sku: format!("P{}", id),
        name: format!("Product {}", id),
        stock,
        variants: variants.map(|stocks| {
            stocks
                .into_iter()
                .map(|stock| Variant { name: None, stock })
                .collect()
        }),
    }
}

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.put_product(&product(1, 10, None)).await.expect("put");
    store.put_product(&product(2, 25, None)).await.expect("put");
    store
        .put_product(&product(3, 0, Some(vec![6, 1])))
        .await
        .expect("put");
    store
}

fn input(sku: &str, items: Vec<ComboItem>) -> ComboInput {
    ComboInput {
        sku: sku.to_string(),
        name: format!("Combo {}", sku),
        items,
        price: 199.0,
        cost: 120.0,
    }
}

#[tokio::test]
async fn test_get_all_computes_available_stock() {
    let store = seeded_store().await;
    let handlers = ComboHandlers::new(store.clone());

    handlers
        .create(input("SINGLE", vec![ComboItem::new(1, 3)]))
        .await;
    handlers
        .create(input(
            "PAIR",
            vec![ComboItem::new(1, 3), ComboItem::new(2, 5)],
        ))
        .await;
    handlers.create(input("EMPTY", vec![])).await;
    handlers
        .create(input("VARIANT", vec![ComboItem::new(3, 2).with_variant(0)]))
        .await;

    let response = handlers.get_all().await;
    assert!(response.success);
    let stocks: Vec<(String, i64)> = response
        .data
        .expect("data")
        .into_iter()
        .map(|c| (c.sku, c.stock))
        .collect();

    assert_eq!(
        stocks,
        vec![
            ("VARIANT".to_string(), 3),
            ("EMPTY".to_string(), 0),
            ("PAIR".to_string(), 3),
            ("SINGLE".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn test_create_update_delete_cycle() {
    let store = seeded_store().await;
    let handlers = ComboHandlers::new(store.clone());

    let created = handlers
        .create(input("C1", vec![ComboItem::new(1, 1)]))
        .await;
    assert!(created.success);
    let combo = created.data.expect("created combo");
    assert_eq!(combo.status, "active");

    let updated = handlers
        .update(
            combo.id,
            ComboUpdate {
                sku: Some("C1-B".to_string()),
                items: Some(vec![ComboItem::new(2, 2)]),
                ..ComboUpdate::default()
            },
        )
        .await;
    assert!(updated.success);
    let updated = updated.data.expect("updated");
    assert_eq!(updated.sku, "C1-B");
    assert_eq!(updated.items, vec![ComboItem::new(2, 2)]);
    assert_eq!(updated.name, "Combo C1");

    let deleted = handlers.delete(combo.id).await;
    assert!(deleted.success);
    assert!(deleted.data.is_none());
    assert!(store.find_combos().await.expect("find").is_empty());
}

#[tokio::test]
async fn test_failures_are_reported_not_raised() {
    let store = seeded_store().await;
    let handlers = ComboHandlers::new(store.clone());

    let response = handlers.delete(404).await;
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Combo 404 not found"));

    store
        .put_raw_combo(StoredCombo {
            id: 7,
            sku: "BROKEN".to_string(),
            name: "Broken".to_string(),
            price: 0.0,
            cost: 0.0,
            stock: 0,
            items: Some("{oops".to_string()),
            status: "active".to_string(),
            created_at: 1,
        })
        .await;
    let response = handlers.get_all().await;
    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("Combo 7 has malformed items")
    );
}

#[tokio::test]
async fn test_uninitialized_handlers() {
    let handlers = ComboHandlers::uninitialized();
    assert!(!handlers.is_initialized());

    let all = handlers.dispatch("combos:getAll", &[]).await;
    assert_eq!(all, json!({ "success": true, "data": [] }));

    let created = handlers
        .dispatch("combos:create", &[json!({ "sku": "X", "name": "X" })])
        .await;
    assert_eq!(
        created,
        json!({ "success": false, "error": "Database not initialized" })
    );
}

#[tokio::test]
async fn test_dispatch_round_trip_with_wire_payloads() {
    let store = seeded_store().await;
    let handlers = ComboHandlers::new(store);

    let created = handlers
        .dispatch(
            "combos:create",
            &[json!({
                "sku": "GIFT",
                "name": "Gift box",
                "items": [{ "productId": 2, "quantity": 4, "productName": "Product 2" }],
                "price": 250.0,
                "cost": 150.0
            })],
        )
        .await;
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["items"][0]["productId"], 2);
    let id = created["data"]["id"].as_i64().expect("id");

    let updated = handlers
        .dispatch(
            "combos:update",
            &[json!(id.to_string()), json!({ "sku": "GIFT2", "name": "Gift box" })],
        )
        .await;
    assert_eq!(updated["success"], true);
    assert_eq!(updated["data"]["sku"], "GIFT2");

    // Items were left out of the update, so product 2 still constrains: 25 / 4
    let listed = handlers.dispatch("combos:getAll", &[]).await;
    assert_eq!(listed["data"][0]["stock"], 6);

    let deleted = handlers.dispatch("combos:delete", &[json!(id)]).await;
    assert_eq!(deleted, json!({ "success": true }));
}

#[tokio::test]
async fn test_dispatch_rejects_bad_arguments() {
    let handlers = ComboHandlers::new(seeded_store().await);

    let response = handlers.dispatch("combos:delete", &[json!("abc")]).await;
    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Invalid combo id: abc");

    let response = handlers.dispatch("combos:create", &[]).await;
    assert_eq!(response["error"], "Missing combo data");
}

#[tokio::test]
async fn test_partial_update_keeps_items_and_prices() {
    let handlers = ComboHandlers::new(seeded_store().await);

    let created = handlers
        .dispatch(
            "combos:create",
            &[json!({
                "sku": "GIFT",
                "name": "Gift box",
                "items": [{ "productId": 2, "quantity": 4 }],
                "price": 250.0,
                "cost": 150.0
            })],
        )
        .await;
    let id = created["data"]["id"].clone();

    let updated = handlers
        .dispatch("combos:update", &[id, json!({ "sku": "G2", "name": "G" })])
        .await;
    assert_eq!(updated["success"], true);
    assert_eq!(updated["data"]["sku"], "G2");
    assert_eq!(updated["data"]["name"], "G");
    assert_eq!(
        updated["data"]["items"],
        json!([{ "productId": 2, "quantity": 4 }])
    );
    assert_eq!(updated["data"]["price"], 250.0);
    assert_eq!(updated["data"]["cost"], 150.0);
}

#[tokio::test]
async fn test_get_all_tolerates_variants_without_stock() {
    let store = seeded_store().await;
    store
        .put_raw_product(StoredProduct {
            id: 4,
            sku: "P4".to_string(),
            name: "Shirt".to_string(),
            stock: 0,
            variants: Some(r#"[{"color":"Red","stock":null},{"color":"Blue"},{"stock":9}]"#.to_string()),
        })
        .await;
    let handlers = ComboHandlers::new(store);

    handlers
        .create(input("RED", vec![ComboItem::new(4, 1).with_variant(0)]))
        .await;
    handlers
        .create(input("BLUE", vec![ComboItem::new(4, 1).with_variant(1)]))
        .await;
    handlers
        .create(input("GREEN", vec![ComboItem::new(4, 3).with_variant(2)]))
        .await;

    let response = handlers.get_all().await;
    assert!(response.success, "{:?}", response.error);
    let stocks: Vec<(String, i64)> = response
        .data
        .expect("data")
        .into_iter()
        .map(|c| (c.sku, c.stock))
        .collect();
    assert_eq!(
        stocks,
        vec![
            ("GREEN".to_string(), 3),
            ("BLUE".to_string(), 0),
            ("RED".to_string(), 0),
        ]
    );
}
