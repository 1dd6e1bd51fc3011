use serde::Deserialize;
use validator::Validate;

use crate::forms::{FormErrors, not_blank};

pub const INCORRECT_PASSWORD_MESSAGE: &str = "Incorrect current password";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PasswordUpdateForm {
    #[validate(custom(function = "not_blank"))]
    pub current_password: String,
    #[validate(
        custom(function = "not_blank"),
        length(min = 8, message = "This field must be at least 8 characters long")
    )]
    pub new_password: String,
    #[validate(
        custom(function = "not_blank"),
        must_match(other = "new_password", message = "Passwords do not match")
    )]
    pub new_password_confirmation: String,
    #[serde(skip)]
    pub errors: FormErrors,
}

impl PasswordUpdateForm {
    /// Drops every submitted password so none is echoed back into the page.
    pub fn clear_passwords(&mut self) {
        self.current_password.clear();
        self.new_password.clear();
        self.new_password_confirmation.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::validate_form;

    #[test]
    fn test_confirmation_must_match() {
        let form = PasswordUpdateForm {
            current_password: "pa55word".into(),
            new_password: "newpa55word".into(),
            new_password_confirmation: "different1".into(),
            ..Default::default()
        };
        let errors = validate_form(&form);

        assert_eq!(
            errors.field("new_password_confirmation"),
            Some("Passwords do not match")
        );
        assert_eq!(errors.field("new_password"), None);
    }

    #[test]
    fn test_clear_passwords() {
        let mut form = PasswordUpdateForm {
            current_password: "a".into(),
            new_password: "b".into(),
            new_password_confirmation: "c".into(),
            ..Default::default()
        };
        form.clear_passwords();
        assert!(form.current_password.is_empty());
        assert!(form.new_password_confirmation.is_empty());
    }
}
