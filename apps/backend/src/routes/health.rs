use actix_web::{web, HttpResponse};
use migration::count_applied_migrations;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: Option<usize>,
    #[serde(with = "time::serde::rfc3339")]
    time: OffsetDateTime,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = &app_state.db;
    let probe = db
        .query_one(sea_orm::Statement::from_string(
            db.get_database_backend(),
            "SELECT 1 AS health_check".to_string(),
        ))
        .await;

    let (db_status, db_error, migrations) = match probe {
        Ok(_) => ("ok", None, count_applied_migrations(db).await.ok()),
        Err(e) => ("error", Some(format!("DB query failed: {e}")), None),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db: db_status,
        db_error,
        migrations,
        time: OffsetDateTime::now_utc(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
