//! Form decoding and validation helpers.
//!
//! Handlers decode bodies with [`PostForm`], run `validator` rules, and collect
//! failures into [`FormErrors`] so the page can be re-rendered with messages
//! next to each field.

use anyhow::anyhow;
use axum::{
    Form,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

use snippetbox_core::AppError;

pub const BLANK_MESSAGE: &str = "This field cannot be blank";

/// Field-level and form-level messages shown when a form is re-rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub fields: BTreeMap<String, String>,
    pub non_field: Vec<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    /// Records `message` for `field` unless the field already has one.
    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl From<&ValidationErrors> for FormErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut form_errors = FormErrors::default();
        for (field, errors) in errors.field_errors() {
            if let Some(error) = errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                form_errors.add_field(&field, message);
            }
        }
        form_errors
    }
}

/// Runs the form's validation rules.
pub fn validate_form<T: Validate>(form: &T) -> FormErrors {
    match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(errors) => FormErrors::from(&errors),
    }
}

/// `application/x-www-form-urlencoded` body extractor. Undecodable bodies are a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostForm<T>(pub T);

impl<T, S> FromRequest<S> for PostForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(anyhow!(rejection.body_text())))?;
        Ok(PostForm(value))
    }
}

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("blank", BLANK_MESSAGE));
    }
    Ok(())
}

/// Snippet lifetimes offered by the create form, in days.
pub const PERMITTED_EXPIRY_DAYS: [i32; 3] = [1, 7, 365];

pub fn permitted_expiry(value: i32) -> Result<(), ValidationError> {
    if !PERMITTED_EXPIRY_DAYS.contains(&value) {
        return Err(error_with_message(
            "expiry",
            "This field must equal 1, 7 or 365",
        ));
    }
    Ok(())
}
