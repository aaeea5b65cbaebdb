use crate::shared::PageParameter;

/// Listing request: optional user name filter plus a normalized page.
///
/// Immutable once built; a blank `user_name` is stored as "match all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardUserQuery {
    user_name: Option<String>,
    page: PageParameter,
}

impl DashboardUserQuery {
    pub fn new(user_name: Option<String>, page: PageParameter) -> Self {
        let user_name = user_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Self { user_name, page }
    }

    /// Substring filter on the user name, `None` to match every row.
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn page(&self) -> &PageParameter {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_user_name_matches_all() {
        let query = DashboardUserQuery::new(Some("   ".into()), PageParameter::default());
        assert_eq!(query.user_name(), None);

        let query = DashboardUserQuery::new(None, PageParameter::default());
        assert_eq!(query.user_name(), None);
    }

    #[test]
    fn user_name_is_trimmed() {
        let page = PageParameter::new(Some(2), Some(5));
        let query = DashboardUserQuery::new(Some(" ali ".into()), page);
        assert_eq!(query.user_name(), Some("ali"));
        assert_eq!(query.page().offset(), 5);
    }
}
