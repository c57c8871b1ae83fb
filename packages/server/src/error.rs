//! Uniform error handling for the API.
//!
//! Handlers return `Result<HttpResponse, ApiError>`; any failure, raised
//! before or after an await point, is converted by the
//! [`actix_web::ResponseError`] implementation into exactly one
//! `{success: false, message}` JSON response with the classified status
//! code. Nothing is silently swallowed and no failure escapes to kill a
//! worker.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use job_board_database::DbError;
use job_board_geocoder::GeocodeError;
use job_board_job_models::ValidationError;
use job_board_server_models::ApiMessage;
use job_board_spatial::InvalidDistanceError;
use thiserror::Error;

/// A classified request failure. The variant determines the HTTP status;
/// the display form becomes the response message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Lookup yielded zero records.
    #[error("{0}")]
    NotFound(String),

    /// The request payload or parameters failed validation.
    #[error("{0}")]
    Validation(String),

    /// An external collaborator (the geocoding service) failed.
    #[error("{0}")]
    ExternalDependency(String),

    /// No route matched the request path.
    #[error("{path} route not found")]
    RouteNotFound {
        /// The unmatched request path.
        path: String,
    },

    /// Anything else. Details are logged server-side, never echoed.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// The canonical missing-job failure.
    #[must_use]
    pub fn job_not_found() -> Self {
        Self::NotFound("Job not found".to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        log::error!("Database failure: {e}");
        Self::Internal
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<InvalidDistanceError> for ApiError {
    fn from(e: InvalidDistanceError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl From<GeocodeError> for ApiError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::NoMatch { zipcode } => {
                Self::NotFound(format!("No location found for postal code '{zipcode}'"))
            }
            GeocodeError::EmptyZipcode => Self::Validation(e.to_string()),
            GeocodeError::Http(_) | GeocodeError::Parse { .. } => {
                log::error!("Geocoding failure: {e}");
                Self::ExternalDependency("Geocoding service unavailable".to_string())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ExternalDependency(_) => StatusCode::BAD_GATEWAY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiMessage {
            success: false,
            message: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_documented_status_codes() {
        assert_eq!(
            ApiError::job_not_found().status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ExternalDependency("down".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::RouteNotFound {
                path: "/nope".to_string()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn route_not_found_message_ends_with_route_not_found() {
        let err = ApiError::RouteNotFound {
            path: "/unknown/path".to_string(),
        };
        assert_eq!(err.to_string(), "/unknown/path route not found");
    }

    #[test]
    fn zero_geocode_candidates_classify_as_not_found() {
        let err = ApiError::from(GeocodeError::NoMatch {
            zipcode: "02116".to_string(),
        });
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(err.to_string().contains("02116"));
    }

    #[test]
    fn internal_error_does_not_leak_details() {
        let err = ApiError::from(DbError::Conversion {
            message: "secret column name".to_string(),
        });
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[actix_web::test]
    async fn error_response_body_is_the_message_envelope() {
        let err = ApiError::job_not_found();
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Job not found");
    }
}
