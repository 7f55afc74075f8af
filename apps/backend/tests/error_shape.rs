mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend::middleware::request_trace::RequestTrace;
use backend::routes;

#[actix_web::test]
async fn not_found_renders_problem_details_with_trace_parity() {
    let state = common::test_state().await;
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/companies/no-such-company")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let headers = resp.headers().clone();
    let content_type = headers.get("content-type").unwrap().to_str().unwrap();
    assert_eq!(content_type, "application/problem+json");

    // Every response carries a request id; error bodies echo it as trace_id
    let request_id = headers
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(!request_id.is_empty());

    let body = test::read_body(resp).await;
    let problem: serde_json::Value = serde_json::from_slice(&body).unwrap();

    for key in ["type", "title", "status", "detail", "code", "trace_id"] {
        assert!(problem.get(key).is_some(), "missing key '{key}'");
    }
    assert_eq!(problem["code"], "COMPANY_NOT_FOUND");
    assert_eq!(problem["detail"], "Company not found");
    assert_eq!(problem["status"], 404);
    assert_eq!(problem["trace_id"], request_id.as_str());

    let header_trace_id = headers.get("x-trace-id").unwrap().to_str().unwrap();
    assert_eq!(problem["trace_id"], header_trace_id);
}

#[actix_web::test]
async fn malformed_json_renders_a_400_problem() {
    let state = common::test_state().await;
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/companies")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"name": "#)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    let problem: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem["code"], "BAD_REQUEST");
    assert!(problem["detail"]
        .as_str()
        .unwrap()
        .contains("Invalid JSON"));
}
