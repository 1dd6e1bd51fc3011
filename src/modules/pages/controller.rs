use anyhow::anyhow;
use axum::{http::StatusCode, response::Response};
use tracing::instrument;

use snippetbox_core::AppError;

use crate::middleware::RequestContext;
use crate::templates::{TemplateData, pages, render};

#[instrument(skip_all)]
pub async fn about(ctx: RequestContext) -> Result<Response, AppError> {
    let data = TemplateData::new(&ctx).await;
    Ok(render(StatusCode::OK, pages::about(&data)))
}

/// Liveness probe. Served outside the session chain.
pub async fn ping() -> &'static str {
    "OK"
}

pub async fn not_found() -> AppError {
    AppError::not_found(anyhow!("no route matched"))
}
