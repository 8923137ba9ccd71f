//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repositories convert here (usually through `?`
//! and `From<DbErr> for DomainError`), and the HTTP layer maps `DomainError` to `AppError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract `table.column` from SQLite "UNIQUE constraint failed: table.column[, table.column]".
fn extract_sqlite_table(error_msg: &str) -> Option<&str> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = error_msg.find(MARKER)? + MARKER.len();
    let table_column = error_msg[start..].split_whitespace().next()?;
    table_column.split('.').next()
}

/// Map a table (SQLite) or constraint name (Postgres) to a lifecycle conflict.
fn unique_violation_conflict(error_msg: &str) -> (ConflictKind, &'static str) {
    let sqlite_table = extract_sqlite_table(error_msg);
    let on = |table: &str, pg_constraint: &str| {
        sqlite_table == Some(table) || error_msg.contains(pg_constraint)
    };

    if on("game_players", "ux_game_players_") {
        (ConflictKind::AlreadyJoined, "Player already joined this game")
    } else if on("games", "games_pkey") {
        (ConflictKind::DuplicateId, "Game id already exists")
    } else if on("game_results", "ux_game_results_") {
        (ConflictKind::InvalidState, "Results already recorded")
    } else if on("game_prizes", "ux_game_prizes_") {
        (ConflictKind::Other("DuplicatePrize".into()), "Prize place already configured")
    } else {
        (ConflictKind::Other("Unique".into()), "Unique constraint violation")
    }
}

/// Translate a `DbErr` into a `DomainError` with a sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), what.clone());
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        let (kind, detail) = unique_violation_conflict(&error_msg);
        warn!(raw_error = %error_msg, kind = ?kind, "Unique constraint violation");
        return DomainError::conflict(kind, detail);
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::not_found(NotFoundKind::Player, "Referenced player does not exist");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
