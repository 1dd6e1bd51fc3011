use maud::{Markup, html};

use snippetbox_models::{Snippet, User};

use super::TemplateData;
use super::human_date;
use super::layout::{base, csrf_input};
use crate::forms::FormErrors;
use crate::modules::account::model::PasswordUpdateForm;
use crate::modules::snippets::model::SnippetCreateForm;
use crate::modules::users::model::{UserLoginForm, UserSignupForm};

fn field_error(errors: &FormErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.field(field) {
            label.error { (message) }
        }
    }
}

fn non_field_errors(errors: &FormErrors) -> Markup {
    html! {
        @for message in &errors.non_field {
            div.error { (message) }
        }
    }
}

pub fn home(data: &TemplateData, snippets: &[Snippet]) -> Markup {
    base(
        data,
        "Home",
        html! {
            h2 { "Latest Snippets" }
            @if snippets.is_empty() {
                p { "There's nothing to see here... yet!" }
            } @else {
                table {
                    tr {
                        th { "Title" }
                        th { "Created" }
                        th { "ID" }
                    }
                    @for snippet in snippets {
                        tr {
                            td { a href={ "/snippet/view/" (snippet.id) } { (snippet.title) } }
                            td { (human_date(Some(snippet.created))) }
                            td { "#" (snippet.id) }
                        }
                    }
                }
            }
        },
    )
}

pub fn view(data: &TemplateData, snippet: &Snippet) -> Markup {
    base(
        data,
        &format!("Snippet #{}", snippet.id),
        html! {
            div.snippet {
                div.metadata {
                    strong { (snippet.title) }
                    span { "#" (snippet.id) }
                }
                pre { code { (snippet.content) } }
                div.metadata {
                    time { "Created: " (human_date(Some(snippet.created))) }
                    time { "Expires: " (human_date(Some(snippet.expires))) }
                }
            }
        },
    )
}

pub fn create(data: &TemplateData, form: &SnippetCreateForm) -> Markup {
    base(
        data,
        "Create a New Snippet",
        html! {
            form action="/snippet/create" method="POST" {
                (csrf_input(data))
                div {
                    label { "Title:" }
                    (field_error(&form.errors, "title"))
                    input type="text" name="title" value=(form.title);
                }
                div {
                    label { "Content:" }
                    (field_error(&form.errors, "content"))
                    textarea name="content" { (form.content) }
                }
                div {
                    label { "Delete in:" }
                    (field_error(&form.errors, "expires"))
                    input type="radio" name="expires" value="365" checked[form.expires == 365]; " One Year"
                    input type="radio" name="expires" value="7" checked[form.expires == 7]; " One Week"
                    input type="radio" name="expires" value="1" checked[form.expires == 1]; " One Day"
                }
                div {
                    input type="submit" value="Publish snippet";
                }
            }
        },
    )
}

pub fn signup(data: &TemplateData, form: &UserSignupForm) -> Markup {
    base(
        data,
        "Signup",
        html! {
            form action="/user/signup" method="POST" novalidate {
                (csrf_input(data))
                div {
                    label { "Name:" }
                    (field_error(&form.errors, "name"))
                    input type="text" name="name" value=(form.name);
                }
                div {
                    label { "Email:" }
                    (field_error(&form.errors, "email"))
                    input type="email" name="email" value=(form.email);
                }
                div {
                    label { "Password:" }
                    (field_error(&form.errors, "password"))
                    input type="password" name="password";
                }
                div {
                    input type="submit" value="Signup";
                }
            }
        },
    )
}

pub fn login(data: &TemplateData, form: &UserLoginForm) -> Markup {
    base(
        data,
        "Login",
        html! {
            form action="/user/login" method="POST" novalidate {
                (csrf_input(data))
                (non_field_errors(&form.errors))
                div {
                    label { "Email:" }
                    (field_error(&form.errors, "email"))
                    input type="email" name="email" value=(form.email);
                }
                div {
                    label { "Password:" }
                    (field_error(&form.errors, "password"))
                    input type="password" name="password";
                }
                div {
                    input type="submit" value="Login";
                }
            }
        },
    )
}

pub fn account(data: &TemplateData, user: &User) -> Markup {
    base(
        data,
        "Your Account",
        html! {
            h2 { "Your Account" }
            table {
                tr { th { "Name" } td { (user.name) } }
                tr { th { "Email" } td { (user.email) } }
                tr { th { "Joined" } td { (human_date(Some(user.created))) } }
                tr { th { "Password" } td { a href="/account/password/update" { "Change password" } } }
            }
        },
    )
}

pub fn password(data: &TemplateData, form: &PasswordUpdateForm) -> Markup {
    base(
        data,
        "Change Password",
        html! {
            h2 { "Change Password" }
            form action="/account/password/update" method="POST" novalidate {
                (csrf_input(data))
                div {
                    label { "Current password:" }
                    (field_error(&form.errors, "current_password"))
                    input type="password" name="current_password";
                }
                div {
                    label { "New password:" }
                    (field_error(&form.errors, "new_password"))
                    input type="password" name="new_password";
                }
                div {
                    label { "Confirm new password:" }
                    (field_error(&form.errors, "new_password_confirmation"))
                    input type="password" name="new_password_confirmation";
                }
                div {
                    input type="submit" value="Change password";
                }
            }
        },
    )
}

pub fn about(data: &TemplateData) -> Markup {
    base(
        data,
        "About",
        html! {
            h2 { "About" }
            p {
                "Snippetbox is a place to paste and share short pieces of text. "
                "Snippets expire after a day, a week or a year."
            }
        },
    )
}
