//! SeaORM adapter for the companies repository.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, ModelTrait, QueryOrder,
    Set,
};

use crate::entities::{companies, invoices};

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<companies::Model>, sea_orm::DbErr> {
    companies::Entity::find()
        .order_by_asc(companies::Column::Code)
        .all(conn)
        .await
}

pub async fn find_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<companies::Model>, sea_orm::DbErr> {
    companies::Entity::find_by_id(code).one(conn).await
}

pub async fn find_invoices<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    company: &companies::Model,
) -> Result<Vec<invoices::Model>, sea_orm::DbErr> {
    company
        .find_related(invoices::Entity)
        .order_by_asc(invoices::Column::Id)
        .all(conn)
        .await
}

pub async fn insert(
    txn: &DatabaseTransaction,
    code: &str,
    name: &str,
    description: Option<&str>,
) -> Result<companies::Model, sea_orm::DbErr> {
    let active = companies::ActiveModel {
        code: Set(code.to_string()),
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
    };
    active.insert(txn).await
}

/// Update name/description for the given code. Returns `None` when no row
/// matched; the code itself is immutable.
pub async fn update(
    txn: &DatabaseTransaction,
    code: &str,
    name: &str,
    description: Option<&str>,
) -> Result<Option<companies::Model>, sea_orm::DbErr> {
    let existing = match find_by_code(txn, code).await? {
        Some(model) => model,
        None => return Ok(None),
    };

    let mut active: companies::ActiveModel = existing.into();
    active.name = Set(name.to_string());
    active.description = Set(description.map(str::to_string));
    Ok(Some(active.update(txn).await?))
}

pub async fn delete(txn: &DatabaseTransaction, code: &str) -> Result<u64, sea_orm::DbErr> {
    let res = companies::Entity::delete_by_id(code).exec(txn).await?;
    Ok(res.rows_affected)
}
