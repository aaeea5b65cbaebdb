/// Create-or-update payload
///
/// Every field is optional: an absent `id` means insert, a blank one is
/// rejected, and on update only the supplied fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardUserDto {
    pub id: Option<String>,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub role: Option<i32>,
    pub enabled: Option<bool>,
}

impl DashboardUserDto {
    /// Replace the id, e.g. with the one taken from the request path.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
