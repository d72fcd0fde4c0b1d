//! HTTP handler for the dashboard endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::portal_error_response;
use crate::adapters::http::extract::ApiQuery;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::dashboard::{GetDashboardHandler, GetDashboardQuery};
use crate::application::PolicyGate;

use super::dto::{DashboardParams, DashboardResponse};

#[derive(Clone)]
pub struct DashboardHandlers {
    dashboard_handler: Arc<GetDashboardHandler>,
}

impl DashboardHandlers {
    pub fn new(gate: PolicyGate) -> Self {
        Self {
            dashboard_handler: Arc::new(GetDashboardHandler::new(gate)),
        }
    }
}

/// GET /api/dashboard?date=
pub async fn get_dashboard(
    State(handlers): State<DashboardHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<DashboardParams>,
) -> Response {
    let query = GetDashboardQuery {
        user_id: user.id,
        date: params.date,
    };
    match handlers.dashboard_handler.handle(query).await {
        Ok(dashboard) => {
            (StatusCode::OK, Json(DashboardResponse::from(dashboard))).into_response()
        }
        Err(e) => portal_error_response(e),
    }
}
