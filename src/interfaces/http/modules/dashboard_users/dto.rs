//! Dashboard user DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{DashboardUser, DashboardUserDto};

/// Dashboard user API representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUserResponse {
    pub id: String,
    pub user_name: String,
    pub password: String,
    pub role: i32,
    pub enabled: bool,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl From<DashboardUser> for DashboardUserResponse {
    fn from(u: DashboardUser) -> Self {
        Self {
            id: u.id,
            user_name: u.user_name,
            password: u.password,
            role: u.role,
            enabled: u.enabled,
            date_created: u.date_created,
            date_updated: u.date_updated,
        }
    }
}

/// Create / update request body
///
/// All fields optional. On update only the supplied fields are changed.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUserRequest {
    /// Ignored on create; replaced by the path id on update
    pub id: Option<String>,
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub user_name: Option<String>,
    #[validate(length(max = 128, message = "must be at most 128 characters"))]
    pub password: Option<String>,
    pub role: Option<i32>,
    pub enabled: Option<bool>,
}

impl From<DashboardUserRequest> for DashboardUserDto {
    fn from(r: DashboardUserRequest) -> Self {
        Self {
            id: r.id,
            user_name: r.user_name,
            password: r.password,
            role: r.role,
            enabled: r.enabled,
        }
    }
}

/// List dashboard users query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListDashboardUsersParams {
    /// Substring filter on the user name
    pub user_name: Option<String>,
    /// Page number (1-based). Missing, non-numeric or <= 0 means 1
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_page: Option<i64>,
    /// Page size. Missing, non-numeric or <= 0 means the configured default
    #[serde(default, deserialize_with = "lenient_number")]
    pub page_size: Option<i64>,
}

/// Unparsable numbers are treated as absent so the pager can fall back to defaults.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}
