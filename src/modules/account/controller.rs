use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{info, instrument};

use snippetbox_core::AppError;
use snippetbox_models::ModelError;

use super::model::{INCORRECT_PASSWORD_MESSAGE, PasswordUpdateForm};
use crate::forms::{PostForm, validate_form};
use crate::middleware::RequestContext;
use crate::middleware::auth::LOGIN_PATH;
use crate::state::AppState;
use crate::templates::{FLASH_KEY, TemplateData, pages, render};

fn to_login() -> Response {
    Redirect::to(LOGIN_PATH).into_response()
}

#[instrument(skip_all)]
pub async fn account_view(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    let Some(id) = ctx.authenticated_user else {
        return Ok(to_login());
    };

    let user = match state.users.get(id).await {
        Ok(user) => user,
        Err(ModelError::NoRecord) => return Ok(to_login()),
        Err(e) => return Err(e.into()),
    };

    let data = TemplateData::new(&ctx).await;
    Ok(render(StatusCode::OK, pages::account(&data, &user)))
}

#[instrument(skip_all)]
pub async fn password_update(ctx: RequestContext) -> Result<Response, AppError> {
    let data = TemplateData::new(&ctx).await;
    Ok(render(
        StatusCode::OK,
        pages::password(&data, &PasswordUpdateForm::default()),
    ))
}

#[instrument(skip_all)]
pub async fn password_update_post(
    State(state): State<AppState>,
    ctx: RequestContext,
    PostForm(mut form): PostForm<PasswordUpdateForm>,
) -> Result<Response, AppError> {
    let Some(id) = ctx.authenticated_user else {
        return Ok(to_login());
    };

    form.errors = validate_form(&form);

    if form.errors.is_empty() {
        match state
            .users
            .update_password(id, &form.current_password, &form.new_password)
            .await
        {
            Ok(()) => {
                info!(user_id = %id, "Password updated");
                ctx.session
                    .put(FLASH_KEY, "Your password has been updated!")
                    .await?;
                return Ok(Redirect::to("/account/view").into_response());
            }
            Err(ModelError::InvalidCredentials) => {
                form.errors
                    .add_field("current_password", INCORRECT_PASSWORD_MESSAGE);
            }
            Err(ModelError::NoRecord) => return Ok(to_login()),
            Err(e) => return Err(e.into()),
        }
    }

    form.clear_passwords();
    let data = TemplateData::new(&ctx).await;
    Ok(render(
        StatusCode::UNPROCESSABLE_ENTITY,
        pages::password(&data, &form),
    ))
}
