#![allow(clippy::needless_borrows_for_generic_args)]

use outlet_food_rs::models::Outlet;
use serde_json::{json, Value};

mod common;
use common::*;

#[tokio::test]
async fn test_food_api_endpoints() {
    let test_env = TestEnvironment::new().await;
    let client = &test_env.client;

    // Create a food without add-ons
    let created = test_env
        .create_food(json!({
            "outlet_id": "O1",
            "name": "Burger",
            "description": "x",
            "price": 5.0
        }))
        .await;

    let food_id = created["id"].as_str().expect("Expected food id").to_string();
    assert!(!food_id.is_empty());
    assert_eq!(created["outlet_id"], "O1");
    assert_eq!(created["name"], "Burger");
    assert_eq!(created["addOns"], json!([]));

    // Get the created food
    let response = client
        .get(test_env.url(&format!("/api/foods/{}", food_id)))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], food_id.as_str());
    assert_eq!(body["data"]["price"], 5.0);
    assert!(body["data"].get("addOns").is_none());

    // List by outlet and unscoped
    let response = client
        .get(test_env.url("/api/outlets/O1/foods"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let response = client
        .get(test_env.url("/api/foods"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"][0]["id"], food_id.as_str());

    // Delete the food
    let response = client
        .delete(test_env.url(&format!("/api/foods/{}", food_id)))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "data": "OK" }));

    // The food is gone
    let response = client
        .get(test_env.url(&format!("/api/foods/{}", food_id)))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn test_create_food_with_add_ons() {
    let test_env = TestEnvironment::new().await;

    let created = test_env
        .create_food(json!({
            "outlet_id": "O1",
            "name": "Pizza",
            "description": "Margherita",
            "price": 9.5,
            "addOns": [
                { "name": "Olives", "price": 0.5 },
                { "name": "Basil" },
                { "name": "Chili", "description": "Hot", "price": 0.25 }
            ]
        }))
        .await;

    let add_ons = created["addOns"].as_array().expect("Expected addOns array");
    assert_eq!(add_ons.len(), 3);
    for add_on in add_ons {
        assert_eq!(add_on["food_id"], created["id"]);
        assert!(add_on["id"].is_string());
    }
    assert_eq!(add_ons[0]["name"], "Olives");
    assert_eq!(add_ons[1]["price"], Value::Null);
}

#[tokio::test]
async fn test_food_without_outlet_is_accepted() {
    let test_env = TestEnvironment::new().await;

    let created = test_env.create_food(json!({ "name": "Water" })).await;
    assert_eq!(created["outlet_id"], "");

    let response = test_env
        .client
        .put(test_env.url(&format!("/api/foods/{}", created["id"].as_str().unwrap())))
        .json(&json!({ "outlet_id": "", "name": "Sparkling water" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["outlet_id"], "");
    assert_eq!(body["data"]["name"], "Sparkling water");
}

#[tokio::test]
async fn test_get_unknown_food_returns_not_found() {
    let test_env = TestEnvironment::new().await;

    let response = test_env
        .client
        .get(test_env.url("/api/foods/never-created"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Food item not found");
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_update_food_replaces_all_fields() {
    let test_env = TestEnvironment::new().await;
    let client = &test_env.client;

    let created = test_env
        .create_food(json!({
            "outlet_id": "O1",
            "name": "Burger",
            "description": "Single patty",
            "price": 5.0
        }))
        .await;
    let uri = test_env.url(&format!("/api/foods/{}", created["id"].as_str().unwrap()));

    // The body id is superseded by the path
    let response = client
        .put(&uri)
        .json(&json!({
            "id": "ignored",
            "outlet_id": "O2",
            "name": "Cheeseburger"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], created["id"]);

    let response = client.get(&uri).send().await.expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"],
        json!({
            "id": created["id"],
            "outlet_id": "O2",
            "name": "Cheeseburger",
            "description": "",
            "price": null
        })
    );

    // Updating an unknown food
    let response = client
        .put(test_env.url("/api/foods/missing"))
        .json(&json!({ "outlet_id": "O1", "name": "Ghost" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Food not found");
}

#[tokio::test]
async fn test_empty_lists() {
    let test_env = TestEnvironment::new().await;

    let response = test_env
        .client
        .get(test_env.url("/api/outlets/O404/foods"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "No food items found for this outlet");

    let response = test_env
        .client
        .get(test_env.url("/api/foods"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn test_add_on_for_unknown_food_is_not_persisted() {
    let test_env = TestEnvironment::new().await;

    let response = test_env
        .client
        .post(test_env.url("/api/add-ons"))
        .json(&json!({ "food_id": "F404", "name": "Cheese" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Food is not found");
    assert!(test_env
        .repositories
        .add_ons
        .find_all()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_update_add_on_not_found_reasons() {
    let test_env = TestEnvironment::new().await;
    let client = &test_env.client;

    let burger = test_env
        .create_food(json!({ "outlet_id": "O1", "name": "Burger" }))
        .await;
    let fries = test_env
        .create_food(json!({ "outlet_id": "O1", "name": "Fries" }))
        .await;
    let burger_id = burger["id"].as_str().unwrap();
    let fries_id = fries["id"].as_str().unwrap();

    // Unknown food
    let response = client
        .put(test_env.url("/api/add-ons/missing"))
        .json(&json!({ "food_id": "F404", "name": "Cheese" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Food is not found");

    // Known food, unknown add-on
    let response = client
        .put(test_env.url("/api/add-ons/missing"))
        .json(&json!({ "food_id": burger_id, "name": "Cheese" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Add On is not found");

    // Add-on exists under a different food
    let cheese = test_env.create_add_on(burger_id, "Cheese").await;
    let cheese_uri = test_env.url(&format!("/api/add-ons/{}", cheese["id"].as_str().unwrap()));

    let response = client
        .put(&cheese_uri)
        .json(&json!({ "food_id": fries_id, "name": "Cheese" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Add On is not found");

    // Matching pair updates
    let response = client
        .put(&cheese_uri)
        .json(&json!({ "food_id": burger_id, "name": "Blue cheese", "price": 1.25 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], cheese["id"]);
    assert_eq!(body["data"]["name"], "Blue cheese");
    assert_eq!(body["data"]["price"], 1.25);
}

#[tokio::test]
async fn test_delete_twice() {
    let test_env = TestEnvironment::new().await;
    let client = &test_env.client;

    let food = test_env
        .create_food(json!({ "outlet_id": "O1", "name": "Burger" }))
        .await;
    let food_id = food["id"].as_str().unwrap();
    let add_on = test_env.create_add_on(food_id, "Cheese").await;

    let cases = [
        (
            format!("/api/add-ons/{}", add_on["id"].as_str().unwrap()),
            "Add On is not found",
        ),
        (format!("/api/foods/{}", food_id), "Food not found"),
    ];

    for (path, reason) in cases {
        let response = client
            .delete(test_env.url(&path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status().as_u16(), 200);

        let response = client
            .delete(test_env.url(&path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status().as_u16(), 404);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["error"], reason);
    }
}

#[tokio::test]
async fn test_outlet_reference_validation() {
    let test_env = TestEnvironment::with_outlet_validation(true).await;

    let response = test_env
        .client
        .post(test_env.url("/api/foods"))
        .json(&json!({ "outlet_id": "O1", "name": "Burger" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Outlet is not found");

    test_env
        .repositories
        .outlets
        .save(Outlet {
            id: "O1".to_string(),
            name: "Downtown".to_string(),
        })
        .await
        .unwrap();

    let created = test_env
        .create_food(json!({ "outlet_id": "O1", "name": "Burger" }))
        .await;
    assert_eq!(created["outlet_id"], "O1");
}

#[tokio::test]
async fn test_health_and_metrics_endpoints() {
    let test_env = TestEnvironment::new().await;

    let response = test_env
        .client
        .get(test_env.url("/health/status"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "outlet-food-test");

    test_env
        .create_food(json!({ "outlet_id": "O1", "name": "Burger" }))
        .await;

    let response = test_env
        .client
        .get(test_env.url("/metrics"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status().as_u16(), 200);
    let text = response.text().await.expect("Failed to read metrics");
    assert!(text.contains("http_requests_total"));
    assert!(text.contains(r#"entity="food",operation="create",status="success""#));
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let test_env = TestEnvironment::new().await;

    let response = test_env
        .client
        .post(test_env.url("/api/foods"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_client_error());
}
