// src/api/auth.rs
// Registration, login and logout.
//
// On a successful register/login the server answers with
// {success: true, data: {token, user}}; both values are written to the
// session as-is.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{ApiClient, ApiResponse};
use crate::session::Session;
use crate::ui::Page;

/// Page the browser is sent to after logging out.
pub const LANDING_PAGE: &str = "index.html";

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiClient {
    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> ApiResponse {
        let response = self
            .send(self.request(Method::POST, &["auth", "register"]).json(request))
            .await;
        self.remember_auth(&response);
        response
    }

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> ApiResponse {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .send(self.request(Method::POST, &["auth", "login"]).json(&body))
            .await;
        self.remember_auth(&response);
        response
    }

    /// Forgets the session and goes back to the landing page.
    ///
    /// No request is made; the server keeps no session state.
    pub fn logout(&self, page: &dyn Page) {
        sign_out(self.session(), page);
    }

    pub fn get_token(&self) -> Option<String> {
        self.session().token()
    }

    pub fn get_current_user(&self) -> Option<Value> {
        self.session().current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    fn remember_auth(&self, response: &ApiResponse) {
        if !response.success {
            return;
        }
        let Some(data) = response.data.as_ref() else {
            return;
        };

        match (data.get("token").and_then(Value::as_str), data.get("user")) {
            (Some(token), Some(user)) => self.session().store_auth(token, user),
            _ => tracing::warn!("auth response is missing token or user"),
        }
    }
}

/// Clears the session and sends the page to [`LANDING_PAGE`].
pub(crate) fn sign_out(session: &Session, page: &dyn Page) {
    session.clear();
    tracing::info!("logged out");
    page.navigate(LANDING_PAGE);
}
