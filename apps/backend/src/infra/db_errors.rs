//! SeaORM -> DomainError translation helpers.
//!
//! Adapters and repos convert `sea_orm::DbErr` into
//! `crate::errors::domain::DomainError` here, and higher layers then map
//! `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map unique-violation messages to domain conflicts by constraint name.
/// Postgres names the constraint (`companies_pkey`); SQLite reports
/// `UNIQUE constraint failed: companies.code`.
fn map_unique_violation(error_msg: &str) -> DomainError {
    if error_msg.contains("companies_pkey") || error_msg.contains("companies.code") {
        return DomainError::conflict(
            ConflictKind::DuplicateCompanyCode,
            "Company code already exists",
        );
    }
    DomainError::conflict(
        ConflictKind::Other("Unique".into()),
        "Unique constraint violation",
    )
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        return map_unique_violation(&error_msg);
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        // The schema has a single foreign key: invoices.comp_code -> companies.code
        return DomainError::validation("Unknown company code");
    }

    if mentions_sqlstate(&error_msg, "23514") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation("Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::map_db_err;
    use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};

    #[test]
    fn postgres_duplicate_company_code_is_a_conflict() {
        let err = DbErr::Custom(
            "error returned from database: duplicate key value violates unique constraint \"companies_pkey\""
                .into(),
        );
        assert_eq!(
            map_db_err(err),
            DomainError::conflict(
                ConflictKind::DuplicateCompanyCode,
                "Company code already exists"
            )
        );
    }

    #[test]
    fn sqlite_duplicate_company_code_is_a_conflict() {
        let err = DbErr::Custom("UNIQUE constraint failed: companies.code".into());
        assert_eq!(
            map_db_err(err),
            DomainError::conflict(
                ConflictKind::DuplicateCompanyCode,
                "Company code already exists"
            )
        );
    }

    #[test]
    fn foreign_key_violation_is_a_validation_error() {
        let postgres = DbErr::Custom(
            "error returned from database: insert or update on table \"invoices\" violates foreign key constraint \"invoices_comp_code_fkey\" SQLSTATE(23503)"
                .into(),
        );
        assert_eq!(
            map_db_err(postgres),
            DomainError::validation("Unknown company code")
        );

        let sqlite = DbErr::Custom("FOREIGN KEY constraint failed".into());
        assert_eq!(
            map_db_err(sqlite),
            DomainError::validation("Unknown company code")
        );
    }

    #[test]
    fn unknown_errors_become_infra() {
        let err = DbErr::Custom("something went sideways".into());
        assert_eq!(
            map_db_err(err),
            DomainError::infra(
                InfraErrorKind::Other("DbErr".into()),
                "Database operation failed"
            )
        );
    }
}
