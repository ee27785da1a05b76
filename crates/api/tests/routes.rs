//! End-to-end route tests driving the full income-to-payment flow
//! through the router.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use tahsis_api::{AppState, create_router};
use tahsis_shared::AppConfig;

fn test_router() -> Router {
    create_router(AppState::new(&AppConfig::default()))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_check() {
    let router = test_router();
    let (status, body) = send(&router, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn unknown_project_is_404() {
    let router = test_router();
    let (status, body) = send(
        &router,
        "GET",
        "/api/v1/projects/0195b7a0-0000-7000-8000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "PROJECT_NOT_FOUND");
}

#[tokio::test]
async fn income_to_payment_flow() {
    let router = test_router();

    // Project with 18% VAT and 10% commission.
    let (status, project) = send(
        &router,
        "POST",
        "/api/v1/projects",
        Some(json!({
            "code": "TTO-2026-001",
            "budget": "500000",
            "company_rate": "10",
            "vat_rate": "18",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let project_id = project["id"].as_str().unwrap().to_string();

    // Two people: a leader with an IBAN, a researcher without one.
    let (status, leader) = send(
        &router,
        "POST",
        "/api/v1/people",
        Some(json!({
            "kind": "personnel",
            "name": "Leader",
            "iban": "TR330006100519786457841326",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let leader_person = leader["person"].clone();

    let (status, researcher) = send(
        &router,
        "POST",
        "/api/v1/people",
        Some(json!({ "kind": "personnel", "name": "Researcher" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let researcher_person = researcher["person"].clone();

    // 118000 gross: 18000 VAT, 100000 net, 10000 commission, 90000
    // distributable.
    let (status, income) = send(
        &router,
        "POST",
        "/api/v1/incomes",
        Some(json!({
            "project_id": project_id,
            "gross_amount": "118000",
            "vat_rate": "18",
            "income_date": "2026-03-10",
            "is_fsmh_income": false,
            "income_type": "ozel",
            "is_tto_income": false,
            "description": "Contract milestone 1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(income["amounts"]["distributable_amount"], "90000.00");
    let income_id = income["id"].as_str().unwrap().to_string();

    // 60/40 split.
    let (status, body) = send(
        &router,
        "POST",
        &format!("/api/v1/incomes/{income_id}/distributions"),
        Some(json!({
            "representatives": [
                { "person": leader_person, "role": "leader", "share_percentage": "60" },
                { "person": researcher_person, "role": "researcher", "share_percentage": "40" },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["distributions"][0]["amount"], "54000.00");
    assert_eq!(body["distributions"][1]["amount"], "36000.00");

    // The leader's balance carries the credit.
    let leader_id = leader_person["id"].as_str().unwrap();
    let (status, balance) = send(
        &router,
        "GET",
        &format!("/api/v1/balances?kind=personnel&id={leader_id}&project_id={project_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance["available_amount"], "54000.00");
    let balance_id = balance["id"].as_str().unwrap().to_string();

    // Pay the leader 4000; funds move into reserve.
    let (status, instruction) = send(
        &router,
        "POST",
        "/api/v1/payments",
        Some(json!({
            "payee": leader_person,
            "project_id": project_id,
            "items": [
                { "source": { "type": "manual" }, "amount": "4000", "description": "Payout" },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(instruction["status"], "pending");
    let instruction_id = instruction["id"].as_str().unwrap().to_string();

    // Reject it; the compensating adjustment restores the balance.
    let (status, rejected) = send(
        &router,
        "POST",
        &format!("/api/v1/payments/{instruction_id}/status"),
        Some(json!({ "status": "rejected", "reason": "Wrong bank details" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "rejected");

    let (status, balance) = send(
        &router,
        "GET",
        &format!("/api/v1/balances?kind=personnel&id={leader_id}&project_id={project_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balance["available_amount"], "54000.00");
    assert_eq!(balance["reserved_amount"], "0.00");

    // History shows the full chain: income, payment, adjustment.
    let (status, history) = send(
        &router,
        "GET",
        &format!("/api/v1/balances/{balance_id}/transactions"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["meta"]["total"], 3);
    assert_eq!(history["data"][0]["kind"], "income");
    assert_eq!(history["data"][1]["kind"], "payment");
    assert_eq!(history["data"][2]["kind"], "adjustment");
}

#[tokio::test]
async fn payment_without_iban_rejected() {
    let router = test_router();

    let (_, project) = send(
        &router,
        "POST",
        "/api/v1/projects",
        Some(json!({
            "code": "TTO-2026-002",
            "budget": "100000",
            "company_rate": "10",
            "vat_rate": "18",
        })),
    )
    .await;
    let project_id = project["id"].as_str().unwrap();

    let (_, person) = send(
        &router,
        "POST",
        "/api/v1/people",
        Some(json!({ "kind": "user", "name": "No Bank" })),
    )
    .await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/v1/payments",
        Some(json!({
            "payee": person["person"],
            "project_id": project_id,
            "items": [
                { "source": { "type": "manual" }, "amount": "100", "description": null },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "MISSING_IBAN");
}

#[tokio::test]
async fn duplicate_project_code_conflicts() {
    let router = test_router();
    let payload = json!({
        "code": "TTO-2026-003",
        "budget": "100000",
        "company_rate": "10",
        "vat_rate": "18",
    });

    let (status, _) = send(&router, "POST", "/api/v1/projects", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, "POST", "/api/v1/projects", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "DUPLICATE_PROJECT_CODE");
}
