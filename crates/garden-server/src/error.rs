use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use garden_shared::constants::{MSG_INVALID_PLANT, MSG_PLANT_NOT_FOUND};
use garden_shared::{ApiMessage, ValidationError};
use garden_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Plant not found")]
    NotFound,

    #[error("Invalid plant data: {0}")]
    Validation(String),

    #[error("{context}: no plant ids left")]
    IdsExhausted { context: &'static str },

    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Wrap a store failure with the message shown to the client, e.g.
    /// `store.load().await.map_err(ApiError::storage("Error retrieving plants"))`.
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Storage { context, source }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, ApiMessage::new(MSG_PLANT_NOT_FOUND)),
            ApiError::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                ApiMessage::with_error(MSG_INVALID_PLANT, detail.clone()),
            ),
            ApiError::IdsExhausted { context } => {
                tracing::error!("{context}: largest plant id already in use");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiMessage::with_error(*context, "Internal server error"),
                )
            }
            ApiError::Storage { context, source } => {
                tracing::error!(error = %source, "{context}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiMessage::with_error(*context, "Internal server error"),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(ValidationError::BlankName).into_response().status(),
            StatusCode::BAD_REQUEST
        );

        let storage = ApiError::storage("Error retrieving plants")(StoreError::Unavailable(
            "offline".into(),
        ));
        assert_eq!(
            storage.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let exhausted = ApiError::IdsExhausted {
            context: "Error creating plant",
        };
        assert_eq!(
            exhausted.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
