//! HTML rendering with maud.
//!
//! Every page is a function returning [`Markup`] built on [`layout::base`].
//! Handlers build a [`TemplateData`] from the request context first, which
//! consumes the flash message and makes sure the session has a CSRF token.

pub mod layout;
pub mod pages;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Datelike, Utc};
use maud::Markup;

use crate::middleware::RequestContext;

/// Session key for one-shot messages shown on the next rendered page.
pub const FLASH_KEY: &str = "flash";

/// Values every page needs.
#[derive(Debug, Clone)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    pub csrf_token: String,
}

impl TemplateData {
    pub async fn new(ctx: &RequestContext) -> Self {
        Self {
            current_year: Utc::now().year(),
            flash: ctx.session.pop_string(FLASH_KEY).await,
            is_authenticated: ctx.is_authenticated(),
            csrf_token: ctx.session.csrf_token().await,
        }
    }
}

pub fn render(status: StatusCode, page: Markup) -> Response {
    (status, Html(page.into_string())).into_response()
}

/// `02 Jan 2006 at 15:04`, in UTC. Empty for `None`.
pub fn human_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d %b %Y at %H:%M").to_string())
        .unwrap_or_default()
}
