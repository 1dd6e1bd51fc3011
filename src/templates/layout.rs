use maud::{DOCTYPE, Markup, html};

use super::TemplateData;
use crate::middleware::csrf::CSRF_FIELD;

/// Hidden input carrying the session's CSRF token.
pub fn csrf_input(data: &TemplateData) -> Markup {
    html! {
        input type="hidden" name=(CSRF_FIELD) value=(data.csrf_token);
    }
}

fn nav(data: &TemplateData) -> Markup {
    html! {
        nav {
            div {
                a href="/" { "Home" }
                a href="/about" { "About" }
                @if data.is_authenticated {
                    a href="/snippet/create" { "Create snippet" }
                }
            }
            div {
                @if data.is_authenticated {
                    a href="/account/view" { "Account" }
                    form action="/user/logout" method="POST" {
                        (csrf_input(data))
                        button { "Logout" }
                    }
                } @else {
                    a href="/user/signup" { "Signup" }
                    a href="/user/login" { "Login" }
                }
            }
        }
    }
}

pub fn base(data: &TemplateData, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " - Snippetbox" }
                link rel="stylesheet" href="/static/css/main.css";
                link rel="stylesheet" href="https://fonts.googleapis.com/css?family=Ubuntu+Mono:400,700";
            }
            body {
                header {
                    h1 { a href="/" { "Snippetbox" } }
                }
                (nav(data))
                main {
                    @if let Some(flash) = &data.flash {
                        div.flash { (flash) }
                    }
                    (content)
                }
                footer {
                    "Powered by " a href="https://www.rust-lang.org/" { "Rust" } " in " (data.current_year)
                }
            }
        }
    }
}
