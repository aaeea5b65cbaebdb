use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found: {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.into(),
        }
    }

    /// Errors whose text is safe to show to API clients.
    ///
    /// Storage failures carry driver details and are only logged.
    pub fn is_client_visible(&self) -> bool {
        !matches!(self, DomainError::Storage(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        let text = e.to_string();
        if text.contains("UNIQUE") || text.contains("duplicate") {
            DomainError::Conflict("record already exists".to_string())
        } else {
            DomainError::Storage(text)
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
