use juniper::{FieldError, IntoFieldError, Object, ScalarValue, Value};
use thiserror::Error;
use tracing::error;

/// Failures surfaced to API callers.
///
/// Every resolver returns `ApiResult<T>`; juniper turns the error into a
/// GraphQL error whose `extensions.code` names the variant.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The operation needs a signed-in caller and none is present.
    #[error("You must be logged in to complete this action!")]
    Unauthenticated,

    /// The caller is signed in but does not own the target.
    #[error("{0}")]
    PermissionDenied(String),

    /// A target id or a foreign-key argument does not resolve to a row.
    #[error("{0}")]
    NotFound(String),

    /// Malformed or missing argument.
    #[error("{0}")]
    Validation(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Machine-readable code placed in the GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::PermissionDenied(_) => "PERMISSION_DENIED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Validation(_) => "VALIDATION",
            ApiError::Internal(_) => "INTERNAL",
        }
    }
}

impl<S: ScalarValue> IntoFieldError<S> for ApiError {
    fn into_field_error(self) -> FieldError<S> {
        if let ApiError::Internal(e) = &self {
            error!(error = ?e, "Internal error while resolving operation");
        }

        let mut extensions = Object::with_capacity(1);
        extensions.add_field("code", Value::scalar(self.code().to_string()));

        FieldError::new(self.to_string(), Value::Object(extensions))
    }
}
