// src/api/client.rs
// =============================================================================
// The API client and the request template every operation goes through.
//
// Template:
// 1. (authenticated calls) read the token, bail out with "Debes iniciar
//    sesión" if there is none - no request is sent
// 2. send exactly one request
// 3. parse the body as JSON and return it as-is
// 4. any error along the way becomes "Error de conexión con el servidor"
//
// Status codes are not looked at: a JSON error body from the
// server passes through untouched, a non-JSON body counts as a parse failure.
// No retries, no timeouts.
// =============================================================================

use reqwest::{Client, Method, RequestBuilder};
use url::Url;

use super::{ApiResponse, ClientError};
use crate::session::Session;

/// Where the backend listens when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Client for the marketplace REST API.
///
/// Operations live in the `auth`, `products`, `users` and `transactions`
/// modules as `impl ApiClient` blocks.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: &str, session: Session) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Self::with_http_client(base_url, session, http)
    }

    /// Like [`ApiClient::new`], with a preconfigured reqwest client
    /// (proxies, TLS roots, ...).
    pub fn with_http_client(
        base_url: &str,
        session: Session,
        http: Client,
    ) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let mut base_url = parsed;
        if let Ok(mut segments) = base_url.path_segments_mut() {
            segments.pop_if_empty();
        }

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Appends `segments` to the base URL, one path segment each.
    ///
    /// Segments are percent-encoded, so an id containing `/`, `?` or `#`
    /// stays inside its own segment. An empty last segment gives a
    /// trailing slash (`["products", ""]` is `/products/`).
    pub(crate) fn url_with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path, so this cannot fail
        if let Ok(mut path) = url.path_segments_mut() {
            // The URL parser drops `.` and `..` segments, which would
            // leave the request one level up
            path.extend(segments.iter().map(|segment| match *segment {
                "." => "%2E",
                ".." => "%2E%2E",
                other => other,
            }));
        }
        url
    }

    /// Starts a request that needs no token.
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.http.request(method, self.url_with_segments(segments))
    }

    /// Starts a request carrying the stored bearer token.
    pub(crate) fn authorized(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ClientError> {
        let token = self.session.token().ok_or(ClientError::Unauthenticated)?;
        Ok(self.request(method, segments).bearer_auth(token))
    }

    /// Sends the request and parses the body, without folding errors.
    pub(crate) async fn try_send(&self, request: RequestBuilder) -> Result<ApiResponse, ClientError> {
        let response = request.send().await?;
        tracing::debug!(status = %response.status(), url = %response.url(), "API response");
        let body = response.json::<ApiResponse>().await?;
        Ok(body)
    }

    /// Sends the request and folds any failure into an [`ApiResponse`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> ApiResponse {
        self.try_send(request).await.unwrap_or_else(ApiResponse::from)
    }

    /// Runs an already-prepared request, or reports why it could not be built.
    pub(crate) async fn dispatch(
        &self,
        request: Result<RequestBuilder, ClientError>,
    ) -> ApiResponse {
        match request {
            Ok(request) => self.send(request).await,
            Err(e) => ApiResponse::from(e),
        }
    }

    /// `GET /health`: checks that the backend is up.
    pub async fn health(&self) -> ApiResponse {
        self.send(self.request(Method::GET, &["health"])).await
    }
}
