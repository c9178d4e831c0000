//! API integration tests
//!
//! These run against a live server with a freshly migrated database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated client
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["login"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["login"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/assets", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_asset_crud_and_assignment() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Create asset
    let response = client
        .post(format!("{}/assets", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Notebook Dell Latitude",
            "asset_type": "Notebook",
            "serial_number": "SN-TEST-001"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let asset_id = body["id"].as_i64().expect("No asset ID");
    assert_eq!(body["status"], "Disponível");

    // Create employee
    let response = client
        .post(format!("{}/employees", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Maria Teste" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let employee_id = body["id"].as_i64().expect("No employee ID");

    // Assign
    let response = client
        .post(format!("{}/assets/{}/assign", BASE_URL, asset_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "employee_id": employee_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "Em Uso");
    assert_eq!(body["employee_id"], employee_id);

    // Assigned asset cannot be deleted
    let response = client
        .delete(format!("{}/assets/{}", BASE_URL, asset_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    // Employee holding an asset cannot be deleted
    let response = client
        .delete(format!("{}/employees/{}", BASE_URL, employee_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    // Unassign, then clean up
    let response = client
        .post(format!("{}/assets/{}/unassign", BASE_URL, asset_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "Disponível");
    assert!(body["employee_id"].is_null());

    let response = client
        .delete(format!("{}/assets/{}", BASE_URL, asset_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/employees/{}", BASE_URL, employee_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_purchase_workflow_end_to_end() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Open a direct purchase (stock replenishment, no employee)
    let response = client
        .post(format!("{}/requests/direct-purchase", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "item_type": "Monitor 27\"" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().expect("No request ID");
    assert_eq!(body["items"][0]["is_purchase_order"], true);
    assert_eq!(body["items"][0]["purchase_status"], "Pendente");

    let item_url = format!("{}/requests/{}/items/0", BASE_URL, request_id);

    // Record two quotations
    for (slot, price) in [(0, 1200.0), (1, 1150.0)] {
        let response = client
            .put(format!("{}/quotations/{}", item_url, slot))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({
                "url": "https://fornecedor.example.com",
                "price": price,
                "delivery_prediction": "10 dias"
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    // Receipt before purchase must be refused
    let response = client
        .post(format!("{}/receipt", item_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Monitor Dell 27" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Approve the cheaper quotation
    let response = client
        .post(format!("{}/approve-quotation", item_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "slot": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["purchase_status"], "Cotação Aprovada");

    // Authorize and purchase
    let response = client
        .post(format!("{}/authorize", item_url))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/purchase", item_url))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["purchase_status"], "Comprado");

    // Receipt creates the asset with the approved price
    let response = client
        .post(format!("{}/receipt", item_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Monitor Dell 27",
            "invoice_number": "NF-12345"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["item"]["is_delivered"], true);
    assert_eq!(body["asset"]["status"], "Disponível");
    assert_eq!(body["asset"]["purchase_value"], 1150.0);
    assert_eq!(body["asset"]["invoice_number"], "NF-12345");

    // Receipt is one-shot
    let response = client
        .post(format!("{}/receipt", item_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Monitor Dell 27" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_replacement_part_receipt_has_zero_value() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/requests/direct-purchase", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "item_type": "Peça de reposição - memória RAM" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().expect("No request ID");

    let item_url = format!("{}/requests/{}/items/0", BASE_URL, request_id);

    let response = client
        .put(format!("{}/quotations/0", item_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "price": 350.0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    for step in ["approve-quotation", "authorize", "purchase"] {
        let body = if step == "approve-quotation" {
            json!({ "slot": 0 })
        } else {
            json!({})
        };
        let response = client
            .post(format!("{}/{}", item_url, step))
            .header("Authorization", format!("Bearer {}", token))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success(), "step {} failed", step);
    }

    let response = client
        .post(format!("{}/receipt", item_url))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Memória RAM 16GB" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["asset"]["purchase_value"], 0.0);
}

#[tokio::test]
#[ignore]
async fn test_capability_enforcement() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Manager without approve/execute capability
    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "login": "comprador-teste",
            "password": "secret1",
            "role": "manager",
            "can_approve": false,
            "can_execute": false
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let user_id = body["id"].as_i64().expect("No user ID");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "login": "comprador-teste", "password": "secret1" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let limited_token = body["token"].as_str().expect("No token").to_string();

    let response = client
        .post(format!("{}/requests/direct-purchase", BASE_URL))
        .header("Authorization", format!("Bearer {}", limited_token))
        .json(&json!({ "item_type": "Teclado" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["id"].as_i64().expect("No request ID");

    let item_url = format!("{}/requests/{}/items/0", BASE_URL, request_id);

    let response = client
        .put(format!("{}/quotations/0", item_url))
        .header("Authorization", format!("Bearer {}", limited_token))
        .json(&json!({ "price": 120.0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Cannot approve the quotation without the capability
    let response = client
        .post(format!("{}/approve-quotation", item_url))
        .header("Authorization", format!("Bearer {}", limited_token))
        .json(&json!({ "slot": 0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Cannot authorize either
    let response = client
        .post(format!("{}/authorize", item_url))
        .header("Authorization", format!("Bearer {}", limited_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Cleanup
    let _ = client
        .delete(format!("{}/users/{}", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_assets"].is_number());
    assert!(body["assets_by_status"].is_array());
    assert!(body["open_requests"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_get_settings() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/settings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_workbook_export() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/export/workbook", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["content-type"],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let bytes = response.bytes().await.expect("Failed to read body");
    // XLSX files are ZIP archives
    assert_eq!(&bytes[..2], b"PK");
}
