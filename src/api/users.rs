// src/api/users.rs
// Own profile (read/update) and other users' public profiles.

use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ApiResponse};

/// Fields to change on the logged-in user's profile. `None` = unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
}

impl ApiClient {
    /// `GET /users/profile`
    pub async fn get_profile(&self) -> ApiResponse {
        self.dispatch(self.authorized(Method::GET, &["users", "profile"]))
            .await
    }

    /// `PUT /users/profile`
    ///
    /// On success the returned user replaces the stored snapshot.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResponse {
        let response = self
            .dispatch(
                self.authorized(Method::PUT, &["users", "profile"])
                    .map(|request| request.json(update)),
            )
            .await;

        if response.success {
            if let Some(user) = response.data.as_ref().filter(|user| !user.is_null()) {
                self.session().store_user(user);
            }
        }
        response
    }

    /// `GET /users/{id}`
    pub async fn get_public_profile(&self, user_id: &str) -> ApiResponse {
        self.send(self.request(Method::GET, &["users", user_id]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::FakeBackend;
    use crate::api::MSG_LOGIN_REQUIRED;
    use crate::session::Session;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_profile_requires_login() {
        let backend = FakeBackend::replying(json!({"success": true})).await;
        let client = backend.client(Session::in_memory());

        let response = client.get_profile().await;

        assert_eq!(response.message.as_deref(), Some(MSG_LOGIN_REQUIRED));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_update_profile_replaces_snapshot() {
        let updated = json!({"id": "u1", "username": "ana", "nombre": "Ana María"});
        let backend = FakeBackend::replying(json!({
            "success": true,
            "message": "Perfil actualizado",
            "data": updated
        }))
        .await;
        let session = Session::in_memory();
        session.store_auth("jwt-123", &json!({"id": "u1", "username": "ana", "whatsapp": "111"}));
        let client = backend.client(session.clone());

        let update = ProfileUpdate {
            nombre: Some("Ana María".to_string()),
            ..ProfileUpdate::default()
        };
        let response = client.update_profile(&update).await;

        assert!(response.success);
        assert_eq!(session.current_user(), Some(updated));
        // The token is untouched
        assert_eq!(session.token().as_deref(), Some("jwt-123"));

        let request = &backend.requests()[0];
        assert_eq!(request.method, "PUT");
        assert_eq!(request.path, "/api/users/profile");
        assert_eq!(request.json(), json!({"nombre": "Ana María"}));
    }

    #[tokio::test]
    async fn test_failed_update_keeps_snapshot() {
        let backend = FakeBackend::replying(json!({"success": false, "message": "Email en uso"})).await;
        let session = Session::in_memory();
        let before = json!({"id": "u1", "email": "ana@mail.com"});
        session.store_auth("jwt-123", &before);
        let client = backend.client(session.clone());

        let update = ProfileUpdate {
            email: Some("otro@mail.com".to_string()),
            ..ProfileUpdate::default()
        };
        client.update_profile(&update).await;

        assert_eq!(session.current_user(), Some(before));
    }

    #[tokio::test]
    async fn test_public_profile_needs_no_token() {
        let backend = FakeBackend::replying(json!({"success": true, "data": {"username": "luis"}})).await;
        let client = backend.client(Session::in_memory());

        let response = client.get_public_profile("u7").await;

        assert!(response.success);
        assert_eq!(backend.requests()[0].path, "/api/users/u7");
    }
}
