use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn invalid(field: &str) -> Self { Self::Validation(format!("wrong {}", field)) }

    /// Caller supplied malformed or out-of-range input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Model(models::errors::ModelError::Validation(_)))
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn model_validation_counts_as_validation() {
        assert!(ServiceError::from(ModelError::invalid("speed")).is_validation());
        assert!(ServiceError::invalid("pageSize").is_validation());
        assert!(!ServiceError::from(ModelError::Db("boom".into())).is_validation());
        assert!(!ServiceError::not_found("ship").is_validation());
    }

    #[test]
    fn messages_name_the_subject() {
        assert_eq!(ServiceError::not_found("ship").to_string(), "not found: ship not found");
        assert_eq!(ServiceError::invalid("id").to_string(), "validation error: wrong id");
    }
}
