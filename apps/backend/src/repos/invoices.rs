//! Repository layer for invoices.
//!
//! Carries the paid-date transition rule: an invoice's `paid_date` is
//! stamped the first time it transitions to paid, cleared whenever it is
//! unpaid, and otherwise left alone. The rule is evaluated against the
//! prior stored paid state, so repeated "still paid" updates never move
//! the date.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::adapters::invoices_sea as adapter;
use crate::entities::invoices;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::companies::Company;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: Date,
    pub paid_date: Option<Date>,
}

impl From<invoices::Model> for Invoice {
    fn from(model: invoices::Model) -> Self {
        Self {
            id: model.id,
            comp_code: model.comp_code,
            amt: model.amt,
            paid: model.paid,
            add_date: model.add_date,
            paid_date: model.paid_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceUpdate {
    pub amt: f64,
    pub paid: bool,
}

/// Apply the paid-date transition rule relative to the prior stored state:
/// previously unpaid and now paid stamps `today`; now unpaid clears the
/// date; previously paid and still paid keeps the existing date.
pub fn resolve_paid_date(
    prev_paid: bool,
    prev_paid_date: Option<Date>,
    paid: bool,
    today: Date,
) -> Option<Date> {
    match (prev_paid, paid) {
        (false, true) => Some(today),
        (_, false) => None,
        (true, true) => prev_paid_date,
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

fn invoice_not_found(id: i32) -> DomainError {
    DomainError::not_found(NotFoundKind::Invoice, format!("Invoice not found: {id}"))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Invoice>, DomainError> {
    let models = adapter::find_all(conn).await.map_err(map_db_err)?;
    Ok(models.into_iter().map(Invoice::from).collect())
}

pub async fn get_with_company<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<(Invoice, Company), DomainError> {
    let (invoice, company) = adapter::find_with_company(conn, id)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| invoice_not_found(id))?;

    // comp_code is NOT NULL with a foreign key, so a missing company row
    // means the store itself is inconsistent.
    let company = company.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("invoice {id} references a missing company"),
        )
    })?;

    Ok((invoice.into(), company.into()))
}

pub async fn create(txn: &DatabaseTransaction, input: NewInvoice) -> Result<Invoice, DomainError> {
    let model = adapter::insert(txn, &input.comp_code, input.amt, today())
        .await
        .map_err(map_db_err)?;
    Ok(model.into())
}

/// Read the invoice's current paid state and write the transition result.
/// Must run inside one transaction (`with_txn`) so concurrent updates to
/// the same invoice serialize instead of interleaving.
pub async fn update(
    txn: &DatabaseTransaction,
    id: i32,
    input: InvoiceUpdate,
) -> Result<Invoice, DomainError> {
    let current = adapter::find_by_id(txn, id)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| invoice_not_found(id))?;

    let paid_date = resolve_paid_date(current.paid, current.paid_date, input.paid, today());

    let model = adapter::update(txn, current, input.amt, input.paid, paid_date)
        .await
        .map_err(map_db_err)?;
    Ok(model.into())
}

pub async fn delete(txn: &DatabaseTransaction, id: i32) -> Result<(), DomainError> {
    let rows = adapter::delete(txn, id).await.map_err(map_db_err)?;
    if rows == 0 {
        return Err(invoice_not_found(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::resolve_paid_date;

    const TODAY: time::Date = date!(2026 - 08 - 07);
    const EARLIER: time::Date = date!(2026 - 01 - 15);

    #[test]
    fn first_payment_stamps_today() {
        assert_eq!(resolve_paid_date(false, None, true, TODAY), Some(TODAY));
    }

    #[test]
    fn still_paid_keeps_original_date() {
        assert_eq!(
            resolve_paid_date(true, Some(EARLIER), true, TODAY),
            Some(EARLIER)
        );
    }

    #[test]
    fn marking_unpaid_clears_the_date() {
        assert_eq!(resolve_paid_date(true, Some(EARLIER), false, TODAY), None);
    }

    #[test]
    fn staying_unpaid_stays_clear() {
        assert_eq!(resolve_paid_date(false, None, false, TODAY), None);
    }
}
