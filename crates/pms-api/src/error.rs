// ============================================================================
// PMS API - Error Mapping
// File: crates/pms-api/src/error.rs
// Description: Converts domain and extraction failures into HTTP responses
// ============================================================================

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use pms_core::DomainError;

use crate::response::ApiResponse;

const INTERNAL_MESSAGE: &str = "An internal error occurred. Please try again later.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Not authenticated")]
    MissingToken,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => domain_status(err),
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Domain(err) => err.code(),
            ApiError::MissingToken => "UNAUTHORIZED",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::InvalidStatusTransition { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::Conflict(_)
        | DomainError::BookingOverlap { .. }
        | DomainError::DependencyConflict { .. } => StatusCode::CONFLICT,
        DomainError::TenantRequired(_)
        | DomainError::TenantMembershipRequired(_)
        | DomainError::WrongPortal { .. } => StatusCode::BAD_REQUEST,
        DomainError::InvalidCredentials
        | DomainError::UserNotActive
        | DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) | DomainError::TenantMismatch { .. } => StatusCode::FORBIDDEN,
        DomainError::PasswordHashError(_)
        | DomainError::TokenGenerationError(_)
        | DomainError::DatabaseError(_)
        | DomainError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => ApiError::Validation(err.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = if status.is_server_error() {
            error!(code, error = %self, "Request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            warn!(code, status = status.as_u16(), "{}", self);
            self.to_string()
        };

        let body = Json(ApiResponse::error(code, &message));
        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use chrono::NaiveDate;
    use pms_core::deletion::Dependency;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_domain_status_mapping() {
        let cases = [
            (DomainError::NotFound("Room"), StatusCode::NOT_FOUND),
            (DomainError::validation("bad"), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (
                DomainError::DependencyConflict {
                    resource: "guest 'Jane Doe'".into(),
                    dependencies: vec![Dependency::new("booking", 3)],
                },
                StatusCode::CONFLICT,
            ),
            (DomainError::TenantRequired("property"), StatusCode::BAD_REQUEST),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (
                DomainError::WrongPortal {
                    portal_url: "https://acme.darmanager.net".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (DomainError::DatabaseError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[tokio::test]
    async fn test_overlap_response_envelope() {
        let err = ApiError::from(DomainError::BookingOverlap {
            check_in: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "RESOURCE_CONFLICT");
        assert_eq!(
            body["error"]["message"],
            "Property is already booked from 2025-01-10 to 2025-01-15"
        );
    }

    #[tokio::test]
    async fn test_internal_errors_are_not_leaked() {
        let response = ApiError::from(DomainError::DatabaseError("relation \"rooms\" does not exist".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
        assert_eq!(body["error"]["message"], INTERNAL_MESSAGE);
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = ApiError::MissingToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}
