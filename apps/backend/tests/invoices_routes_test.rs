mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend::middleware::request_trace::RequestTrace;
use backend::routes;
use backend_test_support::problem_details::assert_problem_details;
use backend_test_support::unique_helpers::unique_company_name;
use serde_json::{json, Value};

macro_rules! init_app {
    () => {{
        let state = common::test_state().await;
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new(state))
                .configure(routes::configure),
        )
        .await
    }};
}

/// Create a company and return its derived code.
async fn post_company<S>(app: &S, name: &str) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        Error = actix_web::Error,
    >,
{
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/companies")
            .set_json(json!({"name": name}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = common::read_json(resp).await;
    body["company"]["code"]
        .as_str()
        .expect("company code")
        .to_string()
}

/// Create an invoice and return its JSON representation.
async fn post_invoice<S>(app: &S, comp_code: &str, amt: f64) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        Error = actix_web::Error,
    >,
{
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/invoices")
            .set_json(json!({"comp_code": comp_code, "amt": amt}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = common::read_json(resp).await;
    body["invoice"].clone()
}

#[actix_web::test]
async fn list_invoices_returns_every_row() {
    let app = init_app!();

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/invoices").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::read_json(resp).await;
    assert_eq!(body["invoices"], json!([]));

    let code = post_company(&app, "ChatGPT").await;
    post_invoice(&app, &code, 100.5).await;
    post_invoice(&app, &code, 200.0).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/invoices").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::read_json(resp).await;
    let invoices = body["invoices"].as_array().expect("invoices array");
    assert_eq!(invoices.len(), 2);
    assert_eq!(invoices[0]["amt"], 100.5);
    assert_eq!(invoices[1]["amt"], 200.0);
}

#[actix_web::test]
async fn new_invoice_is_unpaid_and_dated_today() {
    let app = init_app!();
    let code = post_company(&app, "ChatGPT").await;

    let invoice = post_invoice(&app, &code, 100.5).await;

    assert_eq!(invoice["comp_code"], code.as_str());
    assert_eq!(invoice["amt"], 100.5);
    assert_eq!(invoice["paid"], false);
    assert_eq!(invoice["add_date"], common::today_iso().as_str());
    assert_eq!(invoice["paid_date"], json!(null));
    assert!(invoice["id"].as_i64().expect("numeric id") >= 1);
}

#[actix_web::test]
async fn invoice_for_unknown_company_is_rejected() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/invoices")
            .set_json(json!({"comp_code": "no-such-company", "amt": 50.0}))
            .to_request(),
    )
    .await;

    assert_problem_details(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("Unknown company code"),
    )
    .await;
}

#[actix_web::test]
async fn get_invoice_merges_company_columns() {
    let app = init_app!();
    let code = post_company(&app, "ChatGPT").await;
    let invoice = post_invoice(&app, &code, 100.5).await;
    let id = invoice["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/invoices/{id}"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::read_json(resp).await;
    let detail = &body["invoice"];

    // Invoice columns plus the joined company's columns, flat
    for key in [
        "id",
        "comp_code",
        "amt",
        "paid",
        "add_date",
        "paid_date",
        "code",
        "name",
        "description",
    ] {
        assert!(
            detail.get(key).is_some(),
            "expected key '{key}' in {detail}"
        );
    }
    assert_eq!(detail["comp_code"], code.as_str());
    assert_eq!(detail["code"], code.as_str());
    assert_eq!(detail["name"], "ChatGPT");
    assert_eq!(detail["paid_date"], json!(null));
}

#[actix_web::test]
async fn get_unknown_invoice_is_404() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/invoices/999").to_request(),
    )
    .await;

    assert_problem_details(
        resp,
        "INVOICE_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("Invoice not found"),
    )
    .await;
}

#[actix_web::test]
async fn paid_date_follows_the_transition_rule() {
    let app = init_app!();
    let code = post_company(&app, "ChatGPT").await;
    let invoice = post_invoice(&app, &code, 100.5).await;
    let id = invoice["id"].as_i64().unwrap();
    let uri = format!("/invoices/{id}");
    let today = common::today_iso();

    // First payment stamps today's date
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"amt": 100.5, "paid": true}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::read_json(resp).await;
    assert_eq!(body["invoice"]["paid"], true);
    assert_eq!(body["invoice"]["paid_date"], today.as_str());

    // Still paid: date is preserved, amount still updates
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"amt": 250.0, "paid": true}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::read_json(resp).await;
    assert_eq!(body["invoice"]["amt"], 250.0);
    assert_eq!(body["invoice"]["paid_date"], today.as_str());

    // Marking unpaid clears the date
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"amt": 250.0, "paid": false}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::read_json(resp).await;
    assert_eq!(body["invoice"]["paid"], false);
    assert_eq!(body["invoice"]["paid_date"], json!(null));
}

#[actix_web::test]
async fn update_unknown_invoice_is_404() {
    let app = init_app!();

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/invoices/999")
            .set_json(json!({"amt": 1.0, "paid": false}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn concurrent_updates_keep_paid_date_consistent() {
    let app = init_app!();
    let code = post_company(&app, &unique_company_name("Acme")).await;
    let invoice = post_invoice(&app, &code, 100.5).await;
    let id = invoice["id"].as_i64().unwrap();
    let uri = format!("/invoices/{id}");

    // Two near-simultaneous updates to the same invoice. Each runs its
    // read-then-write inside one transaction, so whatever order they land
    // in, the stored paid_date must match the invariant.
    let first = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"amt": 100.5, "paid": true}))
            .to_request(),
    );
    let second = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"amt": 100.5, "paid": true}))
            .to_request(),
    );
    let (r1, r2) = futures_util::join!(first, second);
    assert_eq!(r1.status(), StatusCode::OK);
    assert_eq!(r2.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::read_json(resp).await;
    assert_eq!(body["invoice"]["paid"], true);
    assert_eq!(body["invoice"]["paid_date"], common::today_iso().as_str());
}

#[actix_web::test]
async fn delete_invoice_acknowledges_and_then_404s() {
    let app = init_app!();
    let code = post_company(&app, "ChatGPT").await;
    let invoice = post_invoice(&app, &code, 100.5).await;
    let id = invoice["id"].as_i64().unwrap();
    let uri = format!("/invoices/{id}");

    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::read_json(resp).await;
    assert_eq!(body, json!({"status": "deleted"}));

    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleting_a_company_cascades_to_its_invoices() {
    let app = init_app!();
    let code = post_company(&app, &unique_company_name("Acme")).await;
    let invoice = post_invoice(&app, &code, 100.5).await;
    let id = invoice["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/companies/{code}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/invoices/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
