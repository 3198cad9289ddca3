// src/api/products.rs
// =============================================================================
// Product listing and CRUD.
//
// Reads are public. Creating, editing and deleting need a token. Create and
// update are sent as multipart forms because they can carry an image file.
// =============================================================================

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;

use super::{ApiClient, ApiResponse, ClientError};

/// Query parameters for `GET /products/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFilters {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            categoria: None,
            search: None,
        }
    }
}

/// Fields of a product form. `None` fields are left out of the request,
/// which on update means "keep the current value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<f64>,
    pub talla: Option<String>,
    pub categoria: Option<String>,
    /// Local image file sent as the `imagen` part.
    pub imagen: Option<PathBuf>,
}

impl ProductForm {
    async fn into_multipart(self) -> Result<Form, ClientError> {
        let mut form = Form::new();

        let text_fields = [
            ("nombre", self.nombre),
            ("descripcion", self.descripcion),
            ("precio", self.precio.map(|p| p.to_string())),
            ("talla", self.talla),
            ("categoria", self.categoria),
        ];
        for (name, value) in text_fields {
            if let Some(value) = value {
                form = form.text(name, value);
            }
        }

        if let Some(path) = self.imagen {
            form = form.part("imagen", image_part(&path).await?);
        }

        Ok(form)
    }
}

async fn image_part(path: &Path) -> Result<Part, ClientError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Upload {
        path: path.display().to_string(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "imagen".to_string());

    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(image_mime(path))?;
    Ok(part)
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

impl ApiClient {
    /// `GET /products/` with pagination and filters.
    pub async fn list_products(&self, filters: &ProductFilters) -> ApiResponse {
        self.send(self.request(Method::GET, &["products", ""]).query(filters))
            .await
    }

    /// `GET /products/{id}`
    pub async fn get_product(&self, product_id: &str) -> ApiResponse {
        self.send(self.request(Method::GET, &["products", product_id]))
            .await
    }

    /// `POST /products/` (multipart)
    pub async fn create_product(&self, form: ProductForm) -> ApiResponse {
        let request = match self.authorized(Method::POST, &["products", ""]) {
            Ok(request) => request,
            Err(e) => return e.into(),
        };
        match form.into_multipart().await {
            Ok(form) => self.send(request.multipart(form)).await,
            Err(e) => e.into(),
        }
    }

    /// `PUT /products/{id}` (multipart)
    pub async fn update_product(&self, product_id: &str, form: ProductForm) -> ApiResponse {
        let request = match self.authorized(Method::PUT, &["products", product_id]) {
            Ok(request) => request,
            Err(e) => return e.into(),
        };
        match form.into_multipart().await {
            Ok(form) => self.send(request.multipart(form)).await,
            Err(e) => e.into(),
        }
    }

    /// `DELETE /products/{id}`
    pub async fn delete_product(&self, product_id: &str) -> ApiResponse {
        self.dispatch(self.authorized(Method::DELETE, &["products", product_id]))
            .await
    }

    /// `GET /products/categories`
    pub async fn get_categories(&self) -> ApiResponse {
        self.send(self.request(Method::GET, &["products", "categories"]))
            .await
    }

    /// `GET /products/user/{user_id}`
    pub async fn get_user_products(&self, user_id: &str) -> ApiResponse {
        self.send(self.request(Method::GET, &["products", "user", user_id]))
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

    fn logged_in() -> Session {
        let session = Session::in_memory();
        session.store_auth("jwt-123", &json!({"id": "u1"}));
        session
    }

    #[tokio::test]
    async fn test_list_products_sends_filters_as_query() {
        let backend = FakeBackend::replying(json!({"success": true, "data": []})).await;
        let client = backend.client(Session::in_memory());

        let filters = ProductFilters {
            page: 2,
            limit: 10,
            categoria: Some("Abrigos".to_string()),
            search: None,
        };
        let response = client.list_products(&filters).await;

        assert!(response.success);
        assert_eq!(response.data, Some(json!([])));
        let requests = backend.requests();
        assert_eq!(requests[0].path, "/api/products/?page=2&limit=10&categoria=Abrigos");
        assert_eq!(requests[0].authorization, None);
    }

    #[tokio::test]
    async fn test_default_filters() {
        let backend = FakeBackend::replying(json!({"success": true, "data": []})).await;
        let client = backend.client(Session::in_memory());

        client.list_products(&ProductFilters::default()).await;

        assert_eq!(backend.requests()[0].path, "/api/products/?page=1&limit=20");
    }

    #[tokio::test]
    async fn test_public_reads_hit_the_right_paths() {
        let backend = FakeBackend::replying(json!({"success": true, "data": {}})).await;
        let client = backend.client(Session::in_memory());

        client.get_product("p1").await;
        client.get_categories().await;
        client.get_user_products("u9").await;

        let paths: Vec<_> = backend.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec!["/api/products/p1", "/api/products/categories", "/api/products/user/u9"]
        );
    }

    #[tokio::test]
    async fn test_writes_require_login_and_send_nothing() {
        let backend = FakeBackend::replying(json!({"success": true})).await;
        let client = backend.client(Session::in_memory());

        let responses = [
            client.create_product(ProductForm::default()).await,
            client.update_product("p1", ProductForm::default()).await,
            client.delete_product("p1").await,
        ];

        for response in responses {
            assert!(!response.success);
            assert_eq!(response.message.as_deref(), Some(MSG_LOGIN_REQUIRED));
        }
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_product_sends_multipart_with_image() {
        let backend = FakeBackend::replying(json!({"success": true, "message": "Producto creado"})).await;
        let client = backend.client(logged_in());

        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("campera.png");
        std::fs::write(&image, b"fake png bytes").unwrap();

        let form = ProductForm {
            nombre: Some("Campera".to_string()),
            descripcion: Some("Poco uso".to_string()),
            precio: Some(15000.0),
            talla: Some("M".to_string()),
            categoria: Some("Abrigos".to_string()),
            imagen: Some(image),
        };
        let response = client.create_product(form).await;

        assert!(response.success);
        let request = &backend.requests()[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/api/products/");
        assert_eq!(request.authorization.as_deref(), Some("Bearer jwt-123"));
        assert!(request
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data"));
        assert!(request.body.contains("name=\"nombre\""));
        assert!(request.body.contains("Campera"));
        assert!(request.body.contains("15000"));
        assert!(request.body.contains("filename=\"campera.png\""));
        assert!(request.body.contains("fake png bytes"));
    }

    #[tokio::test]
    async fn test_update_product_only_sends_given_fields() {
        let backend = FakeBackend::replying(json!({"success": true})).await;
        let client = backend.client(logged_in());

        let form = ProductForm {
            precio: Some(9999.5),
            ..ProductForm::default()
        };
        client.update_product("p1", form).await;

        let request = &backend.requests()[0];
        assert_eq!(request.method, "PUT");
        assert_eq!(request.path, "/api/products/p1");
        assert!(request.body.contains("name=\"precio\""));
        assert!(request.body.contains("9999.5"));
        assert!(!request.body.contains("name=\"nombre\""));
    }

    #[tokio::test]
    async fn test_delete_product_sends_bearer_token() {
        let backend = FakeBackend::replying(json!({"success": true, "message": "Producto eliminado"})).await;
        let client = backend.client(logged_in());

        let response = client.delete_product("p1").await;

        assert_eq!(response.message.as_deref(), Some("Producto eliminado"));
        let request = &backend.requests()[0];
        assert_eq!(request.method, "DELETE");
        assert_eq!(request.authorization.as_deref(), Some("Bearer jwt-123"));
    }

    #[tokio::test]
    async fn test_product_id_cannot_escape_its_path() {
        let backend = FakeBackend::replying(json!({"success": false, "message": "Producto no encontrado"})).await;
        let client = backend.client(logged_in());

        client.delete_product("../users/profile").await;
        client.get_product("p1?x=1").await;

        let requests = backend.requests();
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path, "/api/products/..%2Fusers%2Fprofile");
        assert_eq!(requests[1].path, "/api/products/p1%3Fx=1");
    }

    #[tokio::test]
    async fn test_missing_image_is_reported_without_request() {
        let backend = FakeBackend::replying(json!({"success": true})).await;
        let client = backend.client(logged_in());

        let form = ProductForm {
            nombre: Some("Campera".to_string()),
            imagen: Some(PathBuf::from("/definitely/not/here.png")),
            ..ProductForm::default()
        };
        let response = client.create_product(form).await;

        assert!(!response.success);
        assert_eq!(
            response.message.as_deref(),
            Some("No se pudo leer la imagen: /definitely/not/here.png")
        );
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(image_mime(Path::new("a.webp")), "image/webp");
        assert_eq!(image_mime(Path::new("a")), "application/octet-stream");
    }
}
