// src/api/response.rs
// =============================================================================
// The one response shape every operation returns.
//
// The server answers with {success, message?, data?}. The client hands that
// JSON back untouched, and reports its own failures in the same shape so
// callers only ever check `success`.
// =============================================================================

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::ClientError;

/// Returned when an authenticated call is made without a token.
pub const MSG_LOGIN_REQUIRED: &str = "Debes iniciar sesión";

/// Returned when the request fails or the body is not JSON.
pub const MSG_CONNECTION_ERROR: &str = "Error de conexión con el servidor";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    // A body without "success" is not a success
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// `None` when the key was absent, `Some(Value::Null)` for `"data": null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,

    /// Any other top-level keys the server sent (e.g. `version` on /health).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResponse {
    /// A failed response carrying only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            extra: Map::new(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::failure(MSG_LOGIN_REQUIRED)
    }

    pub fn connection_error() -> Self {
        Self::failure(MSG_CONNECTION_ERROR)
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }

    /// Deserializes `data` into a typed model.
    ///
    /// Returns None when there is no data or it does not fit `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Option<T> {
        let data = self.data.clone()?;
        match serde_json::from_value(data) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "response data does not match the expected shape");
                None
            }
        }
    }
}

// A key that is present always yields Some, even when its value is null
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<ClientError> for ApiResponse {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Unauthenticated => Self::unauthenticated(),
            // Never reached the network: say which file, not "connection"
            ClientError::Upload { path, source } => {
                tracing::error!(%path, error = %source, "could not read image for upload");
                Self::failure(format!("No se pudo leer la imagen: {}", path))
            }
            other => {
                tracing::error!(error = %other, "request to the marketplace API failed");
                Self::connection_error()
            }
        }
    }
}
