use serde::Deserialize;
use validator::Validate;

use crate::forms::{FormErrors, not_blank, permitted_expiry};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SnippetCreateForm {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "This field cannot be more than 100 characters long")
    )]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    #[validate(custom(function = "permitted_expiry"))]
    pub expires: i32,
    #[serde(skip)]
    pub errors: FormErrors,
}

impl Default for SnippetCreateForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            expires: 365,
            errors: FormErrors::default(),
        }
    }
}
