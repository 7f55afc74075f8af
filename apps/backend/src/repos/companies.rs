//! Repository layer for companies.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;

use crate::adapters::companies_sea as adapter;
use crate::entities::companies;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::invoices::Invoice;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<companies::Model> for Company {
    fn from(model: companies::Model) -> Self {
        Self {
            code: model.code,
            name: model.name,
            description: model.description,
        }
    }
}

/// Name/description payload shared by create and update; the code is
/// derived on create and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInput {
    pub name: String,
    pub description: Option<String>,
}

/// Derive the URL-safe company code from a display name: lowercased,
/// hyphenated, stripped of anything that is not alphanumeric.
pub fn company_code(name: &str) -> String {
    slug::slugify(name)
}

fn validated_name(input: &CompanyInput) -> Result<&str, DomainError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("Company name must not be empty"));
    }
    Ok(name)
}

pub async fn list<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Company>, DomainError> {
    let models = adapter::find_all(conn).await.map_err(map_db_err)?;
    Ok(models.into_iter().map(Company::from).collect())
}

pub async fn get_with_invoices<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<(Company, Vec<Invoice>), DomainError> {
    let model = adapter::find_by_code(conn, code)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Company, "Company not found"))?;

    let invoices = adapter::find_invoices(conn, &model)
        .await
        .map_err(map_db_err)?;

    Ok((
        model.into(),
        invoices.into_iter().map(Invoice::from).collect(),
    ))
}

pub async fn create(
    txn: &DatabaseTransaction,
    input: CompanyInput,
) -> Result<Company, DomainError> {
    let name = validated_name(&input)?;
    let code = company_code(name);
    if code.is_empty() {
        return Err(DomainError::validation(
            "Company name must contain at least one alphanumeric character",
        ));
    }

    let model = adapter::insert(txn, &code, name, input.description.as_deref())
        .await
        .map_err(map_db_err)?;
    Ok(model.into())
}

pub async fn update(
    txn: &DatabaseTransaction,
    code: &str,
    input: CompanyInput,
) -> Result<Company, DomainError> {
    let name = validated_name(&input)?;

    let updated = adapter::update(txn, code, name, input.description.as_deref())
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Company, "Company not found"))?;
    Ok(updated.into())
}

pub async fn delete(txn: &DatabaseTransaction, code: &str) -> Result<(), DomainError> {
    let rows = adapter::delete(txn, code).await.map_err(map_db_err)?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Company,
            "Company not found",
        ));
    }
    Ok(())
}
