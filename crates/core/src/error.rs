//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// A closed taxonomy shared by value objects, entities and use-cases. Use-cases
/// never swallow these; they propagate unmodified to the caller, which decides
/// how to map them to its transport (see [`DomainError::status_code`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input caught while building a value object or entity.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A lookup by natural key or surrogate id missed.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A natural key collided on create.
    #[error("{entity} already exists: {key}")]
    Duplicate { entity: &'static str, key: String },

    /// A rule beyond field validation blocked the operation.
    #[error("business rule violated: {0}")]
    BusinessRuleViolation(String),

    /// Stock shortfall. Kept apart from `BusinessRuleViolation` so callers can
    /// special-case it (e.g. retry with a smaller quantity).
    #[error("insufficient stock: available {available}, required {required}")]
    InsufficientStock { available: i64, required: i64 },

    /// Reserved for authorization decisions taken at the domain boundary.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn duplicate(entity: &'static str, key: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            key: key.into(),
        }
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRuleViolation(msg.into())
    }

    pub fn insufficient_stock(available: i64, required: i64) -> Self {
        Self::InsufficientStock {
            available,
            required,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Stable machine-readable code for transport payloads.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::NotFound { .. } => "not_found",
            DomainError::Duplicate { .. } => "duplicate",
            DomainError::BusinessRuleViolation(_) => "business_rule_violation",
            DomainError::InsufficientStock { .. } => "insufficient_stock",
            DomainError::Unauthorized(_) => "unauthorized",
        }
    }

    /// Informative HTTP status expected by transport callers.
    ///
    /// The domain layer never acts on this; it only documents the mapping.
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Validation(_) => 400,
            DomainError::NotFound { .. } => 404,
            DomainError::Duplicate { .. } => 409,
            DomainError::BusinessRuleViolation(_) => 422,
            DomainError::InsufficientStock { .. } => 400,
            DomainError::Unauthorized(_) => 403,
        }
    }
}
