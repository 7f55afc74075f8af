use actix_web::web;

pub mod companies;
pub mod health;
pub mod invoices;

/// Configure application routes for the server and test harnesses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Companies resource: /companies/**
    cfg.service(web::scope("/companies").configure(companies::configure_routes));

    // Invoices resource: /invoices/**
    cfg.service(web::scope("/invoices").configure(invoices::configure_routes));
}
