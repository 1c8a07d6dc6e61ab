//! Authentication route handlers.
//!
//! These are screens only: credentials go straight to the external auth
//! service, and failures come back as inline form errors. No local session
//! or credential storage.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Register form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

fn form_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidCredentials => "Invalid email or password".to_string(),
        AuthError::Rejected(message) => message.clone(),
        AuthError::Http(_) | AuthError::Status(_) => {
            "The sign-in service is unavailable right now. Please try again.".to_string()
        }
    }
}

/// Display login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate { error: None }
}

/// Login action.
#[instrument(skip(state, form))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.auth().login(&form.email, &form.password).await {
        Ok(session) => {
            tracing::info!(display_name = ?session.display_name, "login succeeded");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "login failed");
            LoginTemplate {
                error: Some(form_message(&e)),
            }
            .into_response()
        }
    }
}

/// Display register page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate { error: None }
}

/// Register action.
#[instrument(skip(state, form))]
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    match state
        .auth()
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(session) => {
            tracing::info!(display_name = ?session.display_name, "registration succeeded");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "registration failed");
            RegisterTemplate {
                error: Some(form_message(&e)),
            }
            .into_response()
        }
    }
}
