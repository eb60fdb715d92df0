use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use gremio_core::table::{table_error_to_status_code, TableError};

/// Application error type that wraps `anyhow::Error`.
///
/// Allows `?` in handlers; table errors are downcast back out so the
/// client-visible status mapping is preserved.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(table_error) = self.0.downcast_ref::<TableError>() {
            let code = table_error_to_status_code(table_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
