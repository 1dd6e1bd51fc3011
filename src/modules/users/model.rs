use serde::Deserialize;
use validator::Validate;

use crate::forms::{FormErrors, not_blank};

pub const INVALID_EMAIL_MESSAGE: &str = "This field must be a valid email address";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email address is already in use";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Email or password is incorrect";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserSignupForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"), email(message = "This field must be a valid email address"))]
    pub email: String,
    #[validate(
        custom(function = "not_blank"),
        length(min = 8, message = "This field must be at least 8 characters long")
    )]
    pub password: String,
    #[serde(skip)]
    pub errors: FormErrors,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserLoginForm {
    #[validate(custom(function = "not_blank"), email(message = "This field must be a valid email address"))]
    pub email: String,
    #[validate(custom(function = "not_blank"))]
    pub password: String,
    #[serde(skip)]
    pub errors: FormErrors,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::validate_form;

    #[test]
    fn test_signup_rules() {
        let form = UserSignupForm {
            name: "Alice".into(),
            email: "not-an-email".into(),
            password: "short".into(),
            ..Default::default()
        };
        let errors = validate_form(&form);

        assert_eq!(errors.field("name"), None);
        assert_eq!(errors.field("email"), Some(INVALID_EMAIL_MESSAGE));
        assert_eq!(
            errors.field("password"),
            Some("This field must be at least 8 characters long")
        );
    }

    #[test]
    fn test_login_does_not_enforce_password_length() {
        let form = UserLoginForm {
            email: "alice@example.com".into(),
            password: "x".into(),
            ..Default::default()
        };
        assert!(validate_form(&form).is_empty());
    }
}
