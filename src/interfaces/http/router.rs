//! API Router with Swagger UI

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{ApiResponse, ResultStatus};
use super::modules::dashboard_users::{
    self, DashboardUserHandlerState, DashboardUserRequest, DashboardUserResponse,
};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use crate::domain::{CommonPager, DashboardUserService, PageMeta};
use crate::shared::PagingPolicy;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        dashboard_users::query_dashboard_users,
        dashboard_users::detail_dashboard_user,
        dashboard_users::create_dashboard_user,
        dashboard_users::update_dashboard_user,
        dashboard_users::delete_dashboard_user,
    ),
    components(
        schemas(
            ResultStatus,
            PageMeta,
            ApiResponse<DashboardUserResponse>,
            ApiResponse<CommonPager<DashboardUserResponse>>,
            ApiResponse<u64>,
            CommonPager<DashboardUserResponse>,
            DashboardUserResponse,
            DashboardUserRequest,
            HealthResponse,
            ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Dashboard Users", description = "Admin console user management. Every response is HTTP 200; failures are reported in the envelope status"),
    ),
    info(
        title = "Dashboard Admin API",
        version = "1.0.0",
        description = "REST API for managing dashboard users",
        license(name = "Apache-2.0")
    )
)]
pub struct ApiDoc;

/// Everything the router needs to serve requests.
#[derive(Clone)]
pub struct RouterState {
    pub dashboard_users: DashboardUserHandlerState,
    pub health: HealthState,
    /// `None` leaves `/metrics` unrouted (e.g. no recorder installed)
    pub metrics: Option<MetricsState>,
}

impl RouterState {
    /// Minimal state over a service: default paging, no database, no metrics endpoint.
    pub fn new(service: Arc<dyn DashboardUserService>) -> Self {
        Self {
            dashboard_users: DashboardUserHandlerState {
                service,
                paging: PagingPolicy::default(),
            },
            health: HealthState::new(None),
            metrics: None,
        }
    }

    pub fn with_paging(mut self, paging: PagingPolicy) -> Self {
        self.dashboard_users.paging = paging;
        self
    }
}

/// Create the API router with all routes
pub fn create_api_router(state: RouterState) -> Router {
    let dashboard_user_routes = Router::new()
        .route(
            "/dashboardUser",
            get(dashboard_users::query_dashboard_users)
                .post(dashboard_users::create_dashboard_user),
        )
        .route(
            "/dashboardUser/{id}",
            get(dashboard_users::detail_dashboard_user)
                .put(dashboard_users::update_dashboard_user)
                .delete(dashboard_users::delete_dashboard_user),
        )
        .with_state(state.dashboard_users);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(state.health);

    let mut router = Router::new()
        .merge(dashboard_user_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(metrics_state) = state.metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(metrics_state),
        );
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}
