use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::repos::companies::{self, Company, CompanyInput};
use crate::repos::invoices::Invoice;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct CompaniesResponse {
    companies: Vec<Company>,
}

#[derive(Debug, Serialize)]
struct CompanyResponse {
    company: Company,
}

#[derive(Debug, Serialize)]
struct CompanyDetailResponse {
    company: Company,
    invoices: Vec<Invoice>,
}

#[derive(Debug, Serialize)]
struct DeletedResponse {
    status: &'static str,
}

/// Body for both create and update; the code is derived from the name on
/// create and never taken from the client.
#[derive(Debug, Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CompanyRequest> for CompanyInput {
    fn from(value: CompanyRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
        }
    }
}

async fn list_companies(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let companies = companies::list(app_state.db()).await?;

    Ok(HttpResponse::Ok().json(CompaniesResponse { companies }))
}

async fn get_company(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let (company, invoices) = companies::get_with_invoices(app_state.db(), &code).await?;

    Ok(HttpResponse::Ok().json(CompanyDetailResponse { company, invoices }))
}

async fn create_company(
    app_state: web::Data<AppState>,
    body: ValidatedJson<CompanyRequest>,
) -> Result<HttpResponse, AppError> {
    let input = CompanyInput::from(body.into_inner());

    let company = with_txn(&app_state, move |txn| {
        Box::pin(async move { companies::create(txn, input).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Created().json(CompanyResponse { company }))
}

async fn update_company(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CompanyRequest>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let input = CompanyInput::from(body.into_inner());

    let company = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            companies::update(txn, &code, input)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(CompanyResponse { company }))
}

async fn delete_company(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();

    with_txn(&app_state, move |txn| {
        Box::pin(async move { companies::delete(txn, &code).await.map_err(AppError::from) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(DeletedResponse { status: "Deleted" }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_companies))
            .route(web::post().to(create_company)),
    )
    .service(
        web::resource("/{code}")
            .route(web::get().to(get_company))
            .route(web::put().to(update_company))
            .route(web::delete().to(delete_company)),
    );
}
