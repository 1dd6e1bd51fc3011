use anyhow::Error;
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

/// An HTTP-facing error: a status code plus the underlying cause.
///
/// The cause is logged but never written to the client. Responses carry only the
/// canonical reason phrase for the status, so store errors, SQL messages and
/// session internals cannot leak through an error page.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

/// Full error chain of a 5xx response, attached as a response extension.
///
/// Only a debug-mode middleware reads this; in production it is dropped with the
/// response.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let reason = self.status.canonical_reason().unwrap_or("Error");

        if self.is_server_error() {
            error!(status = %self.status.as_u16(), error = ?self.error, "Server error");
        } else {
            debug!(status = %self.status.as_u16(), error = %self.error, "Client error");
        }

        let mut response = (
            self.status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            reason,
        )
            .into_response();

        if self.is_server_error() {
            response
                .extensions_mut()
                .insert(ErrorDetail(format!("{:?}", self.error)));
        }

        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use http_body_util::BodyExt;

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_server_error_hides_cause() {
        let response = AppError::internal(anyhow!("connection refused by 10.0.0.3")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = response.extensions().get::<ErrorDetail>().cloned().unwrap();
        assert!(detail.0.contains("connection refused"));

        let body = body_text(response).await;
        assert_eq!(body, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_client_error_has_no_detail() {
        let response = AppError::bad_request(anyhow!("csrf token mismatch")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.extensions().get::<ErrorDetail>().is_none());
        assert_eq!(body_text(response).await, "Bad Request");
    }

    #[test]
    fn test_question_mark_conversion_is_internal() {
        fn fails() -> Result<(), AppError> {
            let _: i64 = "not a number".parse()?;
            Ok(())
        }

        let err = fails().unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
