//! HTTP error type for the API handlers

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

/// Errors surfaced to API callers.
///
/// Every variant renders as a JSON object with an `error` message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token on the request
    #[error("missing bearer token")]
    Unauthenticated,

    /// Unknown or expired token, or a deactivated account
    #[error("invalid bearer token")]
    InvalidToken,

    /// Caller is not an administrator
    #[error("administrator role required")]
    AdminOnly,

    #[error("bad credentials")]
    BadCredentials,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("email already registered")]
    DuplicateEmail,

    #[error("employee not found")]
    EmployeeNotFound,

    /// The generation service answered with a non-success status
    #[error("upstream returned HTTP {status}")]
    Upstream {
        status: u16,
        error: &'static str,
        details: Value,
    },

    /// Unexpected failure of a named operation, message attached
    #[error("{error}: {message}")]
    Operation {
        error: &'static str,
        message: String,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    ///
    /// Upstream failures keep the status the generation service returned.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::BadCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidToken | Self::AdminOnly => StatusCode::FORBIDDEN,
            Self::Validation(_) | Self::DuplicateEmail => StatusCode::BAD_REQUEST,
            Self::EmployeeNotFound => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Operation { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Attribute an internal failure to a named operation so the caller
    /// receives the operation label and the underlying message.
    #[must_use]
    pub fn within(self, operation: &'static str) -> Self {
        match self {
            Self::Internal(message) => Self::Operation {
                error: operation,
                message,
            },
            other => other,
        }
    }

    /// Map a generation client failure onto the caller-facing labels
    pub fn from_generation(
        err: daytimer_net::Error,
        upstream_label: &'static str,
        operation: &'static str,
    ) -> Self {
        match err {
            daytimer_net::Error::Upstream { status, body } => Self::Upstream {
                status,
                error: upstream_label,
                details: body,
            },
            other => Self::Operation {
                error: operation,
                message: other.to_string(),
            },
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::Unauthenticated => json!({ "error": "Token manquant" }),
            Self::InvalidToken => json!({ "error": "Token invalide" }),
            Self::AdminOnly => json!({ "error": "Accès refusé - Admin uniquement" }),
            Self::BadCredentials => json!({ "error": "Email ou mot de passe incorrect" }),
            Self::Validation(message) => json!({ "error": message }),
            Self::DuplicateEmail => json!({ "error": "Cet email existe déjà" }),
            Self::EmployeeNotFound => json!({ "error": "Employé non trouvé" }),
            Self::Upstream {
                status,
                error,
                details,
            } => json!({ "error": error, "details": details, "status": status }),
            Self::Operation { error, message } => json!({ "error": error, "message": message }),
            Self::Internal(_) => json!({ "error": "Erreur serveur" }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(message) => error!(%message, "Request failed"),
            Self::Operation { error, message } => error!(%error, %message, "Operation failed"),
            _ => {}
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

impl From<daytimer_core::Error> for ApiError {
    fn from(err: daytimer_core::Error) -> Self {
        use daytimer_core::Error;

        match err {
            Error::Authentication(_) => Self::BadCredentials,
            Error::PermissionDenied(_) => Self::AdminOnly,
            Error::NotFound(_) => Self::EmployeeNotFound,
            Error::DuplicateEmail(_) => Self::DuplicateEmail,
            Error::InvalidInput(message) => Self::Validation(message),
            other => Self::Internal(other.to_string()),
        }
    }
}
