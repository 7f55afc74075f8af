use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::companies::Company;
use crate::repos::invoices::{self, Invoice, InvoiceUpdate, NewInvoice};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct InvoicesResponse {
    invoices: Vec<Invoice>,
}

#[derive(Debug, Serialize)]
struct InvoiceResponse {
    invoice: Invoice,
}

/// Invoice columns with the joined company's columns merged flat into the
/// same object, as the detail endpoint exposes them.
#[derive(Debug, Serialize)]
struct InvoiceDetail {
    #[serde(flatten)]
    invoice: Invoice,
    #[serde(flatten)]
    company: Company,
}

#[derive(Debug, Serialize)]
struct InvoiceDetailResponse {
    invoice: InvoiceDetail,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub comp_code: String,
    pub amt: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub amt: f64,
    pub paid: bool,
}

async fn list_invoices(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let invoices = invoices::list(app_state.db()).await?;

    Ok(HttpResponse::Ok().json(InvoicesResponse { invoices }))
}

async fn get_invoice(
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let (invoice, company) = invoices::get_with_company(app_state.db(), id).await?;

    Ok(HttpResponse::Ok().json(InvoiceDetailResponse {
        invoice: InvoiceDetail { invoice, company },
    }))
}

async fn create_invoice(
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();
    let input = NewInvoice {
        comp_code: payload.comp_code,
        amt: payload.amt,
    };

    let invoice = with_txn(&app_state, move |txn| {
        Box::pin(async move { invoices::create(txn, input).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Created().json(InvoiceResponse { invoice }))
}

async fn update_invoice(
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
    body: ValidatedJson<UpdateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let payload = body.into_inner();
    let input = InvoiceUpdate {
        amt: payload.amt,
        paid: payload.paid,
    };

    let invoice = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            invoices::update(txn, id, input)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(InvoiceResponse { invoice }))
}

async fn delete_invoice(
    path: web::Path<i32>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    with_txn(&app_state, move |txn| {
        Box::pin(async move { invoices::delete(txn, id).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(DeletedResponse { status: "deleted" }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_invoices))
            .route(web::post().to(create_invoice)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_invoice))
            .route(web::put().to(update_invoice))
            .route(web::delete().to(delete_invoice)),
    );
}
