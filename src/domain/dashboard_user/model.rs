use chrono::{DateTime, Utc};

/// Role assigned to newly inserted users when the payload omits one.
pub const DEFAULT_ROLE: i32 = 1;

/// Dashboard user record
///
/// `password` and `role` are opaque profile fields: stored and returned as
/// submitted, never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardUser {
    pub id: String,
    pub user_name: String,
    pub password: String,
    pub role: i32,
    pub enabled: bool,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

impl DashboardUser {
    /// Apply the fields present in `dto`, leaving the rest untouched.
    pub fn apply(&mut self, dto: &super::DashboardUserDto, now: DateTime<Utc>) {
        if let Some(user_name) = dto.user_name.as_deref() {
            self.user_name = user_name.trim().to_string();
        }
        if let Some(password) = dto.password.as_ref() {
            self.password = password.clone();
        }
        if let Some(role) = dto.role {
            self.role = role;
        }
        if let Some(enabled) = dto.enabled {
            self.enabled = enabled;
        }
        self.date_updated = now;
    }
}
