//! SeaORM adapter for the invoices repository.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryOrder, Set,
};
use time::Date;

use crate::entities::{companies, invoices};

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<invoices::Model>, sea_orm::DbErr> {
    invoices::Entity::find()
        .order_by_asc(invoices::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<invoices::Model>, sea_orm::DbErr> {
    invoices::Entity::find_by_id(id).one(conn).await
}

/// Fetch an invoice joined with its company row in one query.
pub async fn find_with_company<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i32,
) -> Result<Option<(invoices::Model, Option<companies::Model>)>, sea_orm::DbErr> {
    invoices::Entity::find_by_id(id)
        .find_also_related(companies::Entity)
        .one(conn)
        .await
}

pub async fn insert(
    txn: &DatabaseTransaction,
    comp_code: &str,
    amt: f64,
    add_date: Date,
) -> Result<invoices::Model, sea_orm::DbErr> {
    let active = invoices::ActiveModel {
        comp_code: Set(comp_code.to_string()),
        amt: Set(amt),
        paid: Set(false),
        add_date: Set(add_date),
        paid_date: Set(None),
        ..Default::default()
    };
    active.insert(txn).await
}

/// Write amt/paid/paid_date onto an already-fetched row. The caller owns
/// the read-modify-write ordering; both steps must share one transaction.
pub async fn update(
    txn: &DatabaseTransaction,
    existing: invoices::Model,
    amt: f64,
    paid: bool,
    paid_date: Option<Date>,
) -> Result<invoices::Model, sea_orm::DbErr> {
    let mut active: invoices::ActiveModel = existing.into();
    active.amt = Set(amt);
    active.paid = Set(paid);
    active.paid_date = Set(paid_date);
    active.update(txn).await
}

pub async fn delete(txn: &DatabaseTransaction, id: i32) -> Result<u64, sea_orm::DbErr> {
    let res = invoices::Entity::delete_by_id(id).exec(txn).await?;
    Ok(res.rows_affected)
}
