use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::services::lifecycle::GameLifecycle;
use crate::services::session_gateway::SessionGateway;

/// Shared application state handed to every actix worker.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub security: SecurityConfig,
    pub gateway: SessionGateway,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, gateway: SessionGateway) -> Self {
        Self {
            db,
            security,
            gateway,
        }
    }

    pub fn lifecycle(&self) -> &GameLifecycle {
        self.gateway.lifecycle()
    }
}
