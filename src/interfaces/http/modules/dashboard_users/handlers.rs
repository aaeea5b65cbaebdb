//! Dashboard user API handlers
//!
//! Each handler builds the query or payload, calls the service and folds the
//! outcome into an [`ApiResponse`]. Storage failures are logged here and
//! replaced by a fixed per-operation message.

use std::sync::Arc;

use axum::extract::{Path, State};
use tracing::{error, warn};

use super::dto::{DashboardUserRequest, DashboardUserResponse, ListDashboardUsersParams};
use crate::domain::{
    CommonPager, DashboardUserDto, DashboardUserQuery, DashboardUserService, DomainResult,
    PageParameter,
};
use crate::interfaces::http::common::{ApiResponse, EnvelopeQuery, ValidatedJson};
use crate::shared::PagingPolicy;

/// Dashboard user handler state
#[derive(Clone)]
pub struct DashboardUserHandlerState {
    pub service: Arc<dyn DashboardUserService>,
    pub paging: PagingPolicy,
}

/// The five dashboard user endpoints, each with fixed outcome messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardUserOperation {
    Query,
    Detail,
    Create,
    Update,
    Delete,
}

impl DashboardUserOperation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Detail => "detail",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::Query => "query dashboard users success",
            Self::Detail => "detail dashboard user success",
            Self::Create => "create dashboard user success",
            Self::Update => "update dashboard user success",
            Self::Delete => "delete dashboard user success",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Query => "query dashboard users exception",
            Self::Detail => "detail dashboard user exception",
            Self::Create => "create dashboard user exception",
            Self::Update => "update dashboard user exception",
            Self::Delete => "delete dashboard user exception",
        }
    }
}

/// Fold a service outcome into the envelope.
///
/// Not-found, validation and conflict errors keep their text; anything else
/// is logged and answered with the operation's fixed failure message.
pub fn respond<T>(op: DashboardUserOperation, outcome: DomainResult<T>) -> ApiResponse<T> {
    let response = match outcome {
        Ok(data) => ApiResponse::success(op.success_message(), data),
        Err(e) if e.is_client_visible() => {
            warn!(operation = op.name(), error = %e, "Dashboard user request rejected");
            ApiResponse::error(e.to_string())
        }
        Err(e) => {
            error!(operation = op.name(), error = %e, "Dashboard user operation failed");
            ApiResponse::error(op.failure_message())
        }
    };

    let status = if response.is_success() { "success" } else { "error" };
    metrics::counter!(
        "dashboard_user_operations_total",
        "operation" => op.name(),
        "status" => status
    )
    .increment(1);

    response
}

#[utoipa::path(
    get,
    path = "/dashboardUser",
    tag = "Dashboard Users",
    params(ListDashboardUsersParams),
    responses(
        (status = 200, description = "Page of dashboard users (or ERROR envelope)", body = ApiResponse<CommonPager<DashboardUserResponse>>)
    )
)]
pub async fn query_dashboard_users(
    State(state): State<DashboardUserHandlerState>,
    EnvelopeQuery(params): EnvelopeQuery<ListDashboardUsersParams>,
) -> ApiResponse<CommonPager<DashboardUserResponse>> {
    let page = PageParameter::with_policy(params.current_page, params.page_size, state.paging);
    let query = DashboardUserQuery::new(params.user_name, page);

    let outcome = state
        .service
        .list_by_page(&query)
        .await
        .map(|pager| pager.map(DashboardUserResponse::from));
    respond(DashboardUserOperation::Query, outcome)
}

#[utoipa::path(
    get,
    path = "/dashboardUser/{id}",
    tag = "Dashboard Users",
    params(("id" = String, Path, description = "Dashboard user ID")),
    responses(
        (status = 200, description = "Dashboard user details (or ERROR envelope)", body = ApiResponse<DashboardUserResponse>)
    )
)]
pub async fn detail_dashboard_user(
    State(state): State<DashboardUserHandlerState>,
    Path(id): Path<String>,
) -> ApiResponse<DashboardUserResponse> {
    let outcome = state
        .service
        .find_by_id(&id)
        .await
        .map(DashboardUserResponse::from);
    respond(DashboardUserOperation::Detail, outcome)
}

#[utoipa::path(
    post,
    path = "/dashboardUser",
    tag = "Dashboard Users",
    request_body = DashboardUserRequest,
    responses(
        (status = 200, description = "Affected row count (or ERROR envelope)", body = ApiResponse<u64>)
    )
)]
pub async fn create_dashboard_user(
    State(state): State<DashboardUserHandlerState>,
    ValidatedJson(request): ValidatedJson<DashboardUserRequest>,
) -> ApiResponse<u64> {
    let dto = DashboardUserDto {
        id: None,
        ..DashboardUserDto::from(request)
    };
    let outcome = state.service.create_or_update(dto).await;
    respond(DashboardUserOperation::Create, outcome)
}

#[utoipa::path(
    put,
    path = "/dashboardUser/{id}",
    tag = "Dashboard Users",
    params(("id" = String, Path, description = "Dashboard user ID")),
    request_body = DashboardUserRequest,
    responses(
        (status = 200, description = "Affected row count (or ERROR envelope)", body = ApiResponse<u64>)
    )
)]
pub async fn update_dashboard_user(
    State(state): State<DashboardUserHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<DashboardUserRequest>,
) -> ApiResponse<u64> {
    // The path id wins over any id in the body
    let dto = DashboardUserDto::from(request).with_id(id);
    let outcome = state.service.create_or_update(dto).await;
    respond(DashboardUserOperation::Update, outcome)
}

#[utoipa::path(
    delete,
    path = "/dashboardUser/{id}",
    tag = "Dashboard Users",
    params(("id" = String, Path, description = "Dashboard user ID")),
    responses(
        (status = 200, description = "Affected row count, 0 if absent (or ERROR envelope)", body = ApiResponse<u64>)
    )
)]
pub async fn delete_dashboard_user(
    State(state): State<DashboardUserHandlerState>,
    Path(id): Path<String>,
) -> ApiResponse<u64> {
    let outcome = state.service.delete(&id).await;
    respond(DashboardUserOperation::Delete, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn storage_failures_are_replaced_by_fixed_message() {
        let outcome: DomainResult<u64> = Err(DomainError::Storage("disk on fire".into()));
        let response = respond(DashboardUserOperation::Delete, outcome);
        assert!(!response.is_success());
        assert_eq!(response.message, "delete dashboard user exception");
        assert!(response.data.is_none());
    }

    #[test]
    fn not_found_keeps_record_specific_message() {
        let outcome: DomainResult<u64> = Err(DomainError::not_found("dashboard user", "id", "u9"));
        let response = respond(DashboardUserOperation::Detail, outcome);
        assert_eq!(response.message, "dashboard user not found: id=u9");
    }

    #[test]
    fn success_uses_operation_message() {
        let response = respond(DashboardUserOperation::Create, Ok(1u64));
        assert!(response.is_success());
        assert_eq!(response.message, "create dashboard user success");
        assert_eq!(response.data, Some(1));
    }
}
