use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{info, instrument};

use snippetbox_core::AppError;
use snippetbox_models::ModelError;

use super::model::{
    DUPLICATE_EMAIL_MESSAGE, INVALID_CREDENTIALS_MESSAGE, UserLoginForm, UserSignupForm,
};
use crate::forms::{PostForm, validate_form};
use crate::middleware::RequestContext;
use crate::middleware::auth::{
    AUTHENTICATED_USER_KEY, LOGIN_PATH, REDIRECT_AFTER_LOGIN_KEY, safe_redirect_target,
};
use crate::state::AppState;
use crate::templates::{FLASH_KEY, TemplateData, pages, render};

/// Where a successful login lands when no protected page was requested first.
pub const DEFAULT_LANDING_PATH: &str = "/snippet/create";

#[instrument(skip_all)]
pub async fn user_signup(ctx: RequestContext) -> Result<Response, AppError> {
    let data = TemplateData::new(&ctx).await;
    Ok(render(
        StatusCode::OK,
        pages::signup(&data, &UserSignupForm::default()),
    ))
}

#[instrument(skip_all)]
pub async fn user_signup_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    PostForm(mut form): PostForm<UserSignupForm>,
) -> Result<Response, AppError> {
    form.errors = validate_form(&form);

    if form.errors.is_empty() {
        match state
            .users
            .create(&form.name, &form.email, &form.password)
            .await
        {
            Ok(id) => {
                info!(user_id = %id, "User signed up");
                ctx.session
                    .put(FLASH_KEY, "Your signup was successful. Please log in.")
                    .await?;
                return Ok(Redirect::to(LOGIN_PATH).into_response());
            }
            Err(ModelError::DuplicateEmail) => {
                form.errors.add_field("email", DUPLICATE_EMAIL_MESSAGE);
            }
            Err(e) => return Err(e.into()),
        }
    }

    form.password.clear();
    let data = TemplateData::new(&ctx).await;
    Ok(render(
        StatusCode::UNPROCESSABLE_ENTITY,
        pages::signup(&data, &form),
    ))
}

#[instrument(skip_all)]
pub async fn user_login(ctx: RequestContext) -> Result<Response, AppError> {
    let data = TemplateData::new(&ctx).await;
    Ok(render(
        StatusCode::OK,
        pages::login(&data, &UserLoginForm::default()),
    ))
}

#[instrument(skip_all)]
pub async fn user_login_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    PostForm(mut form): PostForm<UserLoginForm>,
) -> Result<Response, AppError> {
    form.errors = validate_form(&form);

    if form.errors.is_empty() {
        match state.users.authenticate(&form.email, &form.password).await {
            Ok(id) => {
                ctx.session.renew_token().await?;
                ctx.session.put(AUTHENTICATED_USER_KEY, id).await?;
                info!(user_id = %id, "User logged in");

                let target = safe_redirect_target(
                    ctx.session.pop_string(REDIRECT_AFTER_LOGIN_KEY).await,
                    DEFAULT_LANDING_PATH,
                );
                return Ok(Redirect::to(&target).into_response());
            }
            Err(ModelError::InvalidCredentials) => {
                form.errors.add_non_field(INVALID_CREDENTIALS_MESSAGE);
            }
            Err(e) => return Err(e.into()),
        }
    }

    form.password.clear();
    let data = TemplateData::new(&ctx).await;
    Ok(render(
        StatusCode::UNPROCESSABLE_ENTITY,
        pages::login(&data, &form),
    ))
}

#[instrument(skip_all)]
pub async fn user_logout_post(ctx: RequestContext) -> Result<Response, AppError> {
    ctx.session.renew_token().await?;
    ctx.session.remove(AUTHENTICATED_USER_KEY).await;
    ctx.session
        .put(FLASH_KEY, "You've been logged out successfully!")
        .await?;

    Ok(Redirect::to("/").into_response())
}
