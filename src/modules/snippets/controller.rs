use anyhow::anyhow;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{info, instrument};

use snippetbox_core::AppError;
use snippetbox_models::{ModelError, SnippetId, snippets::LATEST_LIMIT};

use super::model::SnippetCreateForm;
use crate::forms::{PostForm, validate_form};
use crate::middleware::RequestContext;
use crate::state::AppState;
use crate::templates::{FLASH_KEY, TemplateData, pages, render};

#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    let snippets = state.snippets.latest(LATEST_LIMIT).await?;
    let data = TemplateData::new(&ctx).await;
    Ok(render(StatusCode::OK, pages::home(&data, &snippets)))
}

/// Ids that are not positive integers are a 404, like unknown or expired snippets.
fn parse_snippet_id(raw: &str) -> Option<SnippetId> {
    raw.parse::<i64>().ok().filter(|id| *id >= 1).map(SnippetId)
}

#[instrument(skip_all)]
pub async fn snippet_view(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_snippet_id(&id)
        .ok_or_else(|| AppError::not_found(anyhow!("invalid snippet id {id:?}")))?;

    let snippet = match state.snippets.get(id).await {
        Ok(snippet) => snippet,
        Err(ModelError::NoRecord) => {
            return Err(AppError::not_found(anyhow!("snippet {id} not found")));
        }
        Err(e) => return Err(e.into()),
    };

    let data = TemplateData::new(&ctx).await;
    Ok(render(StatusCode::OK, pages::view(&data, &snippet)))
}

#[instrument(skip_all)]
pub async fn snippet_create(ctx: RequestContext) -> Result<Response, AppError> {
    let data = TemplateData::new(&ctx).await;
    Ok(render(
        StatusCode::OK,
        pages::create(&data, &SnippetCreateForm::default()),
    ))
}

#[instrument(skip_all)]
pub async fn snippet_create_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    PostForm(mut form): PostForm<SnippetCreateForm>,
) -> Result<Response, AppError> {
    form.errors = validate_form(&form);
    if !form.errors.is_empty() {
        let data = TemplateData::new(&ctx).await;
        return Ok(render(
            StatusCode::UNPROCESSABLE_ENTITY,
            pages::create(&data, &form),
        ));
    }

    let id = state
        .snippets
        .create(&form.title, &form.content, form.expires)
        .await?;
    info!(snippet_id = %id, "Snippet created");

    ctx.session
        .put(FLASH_KEY, "Snippet successfully created!")
        .await?;
    Ok(Redirect::to(&format!("/snippet/view/{id}")).into_response())
}
