//! API Client
//!
//! Resolves paths against the configured base URL, attaches the bearer token
//! from the session store and normalizes every failure to `ApiError`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::Session;
use crate::transport::{HttpRequest, Method, MultipartForm, RequestBody, Transport};

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    session: Session,
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>, session: Session) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build an authenticated request. Bodies are dropped for GET.
    pub fn build_request(&self, path: &str, method: Method, body: Option<RequestBody>) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.config.resolve(path));
        if let Some(token) = self.session.access_token() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        let request = request.body(body);
        if matches!(request.body, Some(RequestBody::Json(_))) {
            request.header("Content-Type", "application/json")
        } else {
            request
        }
    }

    /// Build an unauthenticated JSON request for the auth endpoints
    pub fn build_public_request(&self, path: &str, body: Value) -> HttpRequest {
        HttpRequest::new(Method::Post, self.config.resolve(path))
            .header("Content-Type", "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .body(Some(RequestBody::Json(body)))
    }

    /// Send and return `(status, body)` for 2xx, `ApiError` otherwise
    async fn dispatch(&self, request: HttpRequest) -> Result<(u16, Value), ApiError> {
        let method = request.method;
        let url = request.url.clone();
        log::debug!("[API] {} {}", method.as_str(), url);

        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("[API] {} {} failed: {}", method.as_str(), url, e);
            ApiError::network(e.to_string())
        })?;

        if response.is_success() {
            Ok((response.status, response.body.unwrap_or(Value::Null)))
        } else {
            log::warn!("[API] {} {} -> {}", method.as_str(), url, response.status);
            Err(ApiError::from_status(response.status, response.body))
        }
    }

    /// Send a prepared request and decode the body
    pub async fn fetch_json<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let (status, body) = self.dispatch(request).await?;
        serde_json::from_value(body.clone()).map_err(|e| ApiError::decode(status, e, Some(body)))
    }

    /// Imperative one-off call; returns the raw JSON body
    pub async fn make_request(&self, path: &str, method: Method, body: Option<Value>) -> Result<Value, ApiError> {
        let request = self.build_request(path, method, body.map(RequestBody::Json));
        self.dispatch(request).await.map(|(_, body)| body)
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.fetch_json(self.build_request(path, Method::Get, None)).await
    }

    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.send_json(path, Method::Post, body).await
    }

    pub async fn patch<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.send_json(path, Method::Patch, body).await
    }

    /// PATCH/POST without a body (mark read, leave task)
    pub async fn touch(&self, path: &str, method: Method) -> Result<(), ApiError> {
        self.dispatch(self.build_request(path, method, None)).await.map(|_| ())
    }

    /// DELETE; any response body is ignored
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.touch(path, Method::Delete).await
    }

    /// Multipart POST
    pub async fn upload<R: DeserializeOwned>(&self, path: &str, form: MultipartForm) -> Result<R, ApiError> {
        self.send_form(path, Method::Post, form).await
    }

    /// Multipart PATCH (profile with avatar)
    pub async fn patch_form<R: DeserializeOwned>(&self, path: &str, form: MultipartForm) -> Result<R, ApiError> {
        self.send_form(path, Method::Patch, form).await
    }

    /// Unauthenticated POST to an auth endpoint
    pub async fn post_public<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let body = encode(body)?;
        self.fetch_json(self.build_public_request(path, body)).await
    }

    async fn send_form<R: DeserializeOwned>(&self, path: &str, method: Method, form: MultipartForm) -> Result<R, ApiError> {
        let request = self.build_request(path, method, Some(RequestBody::Multipart(form)));
        self.fetch_json(request).await
    }

    async fn send_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = encode(body)?;
        self.fetch_json(self.build_request(path, method, Some(RequestBody::Json(body)))).await
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::local(format!("Failed to encode request: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Note, NoteInput};
    use crate::testing::{authed_client, MockTransport};
    use crate::transport::FilePart;
    use serde_json::json;

    #[tokio::test]
    async fn test_bearer_token_and_base_url() {
        let transport = MockTransport::new();
        transport.respond(200, json!([]));
        let client = authed_client(&transport, "tok-1");

        let notes: Vec<Note> = client.get("/api/notes/").await.unwrap();
        assert!(notes.is_empty());

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://test.local/api/notes/");
        assert_eq!(sent[0].header_value("Authorization"), Some("Bearer tok-1"));
        assert!(sent[0].body.is_none());
    }

    #[tokio::test]
    async fn test_no_token_no_header() {
        let transport = MockTransport::new();
        let client = ApiClient::new(ClientConfig::new("http://test.local"), transport.clone(), Session::in_memory());
        client.make_request("/api/team/", Method::Get, None).await.unwrap();
        assert_eq!(transport.requests()[0].header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn test_make_request_error_shape() {
        let transport = MockTransport::new();
        transport.respond(403, json!({"detail": "Not allowed."}));
        let client = authed_client(&transport, "t");

        let err = client
            .make_request("/api/tasks/1/", Method::Delete, None)
            .await
            .unwrap_err();
        assert_eq!(err.status, Some(403));
        assert_eq!(err.message, "Request failed with status code 403");
        assert_eq!(err.data, Some(json!({"detail": "Not allowed."})));
    }

    #[tokio::test]
    async fn test_network_failure_has_no_status() {
        let transport = MockTransport::new();
        transport.fail("Failed to fetch");
        let client = authed_client(&transport, "t");
        let err = client.make_request("/api/notes/", Method::Get, None).await.unwrap_err();
        assert!(err.is_network());
        assert_eq!(err.message, "Failed to fetch");
    }

    #[tokio::test]
    async fn test_json_body_and_content_type() {
        let transport = MockTransport::new();
        transport.respond(201, json!({"id": "3f0a1b2c-0000-4000-8000-000000000001", "title": "t", "content": "c"}));
        let client = authed_client(&transport, "t");

        let note: Note = client
            .post("/api/notes/", &NoteInput { title: "t".into(), content: "c".into() })
            .await
            .unwrap();
        assert_eq!(note.title, "t");

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.header_value("content-type"), Some("application/json"));
        assert_eq!(sent.body, Some(RequestBody::Json(json!({"title": "t", "content": "c"}))));
    }

    #[tokio::test]
    async fn test_decode_error_keeps_status() {
        let transport = MockTransport::new();
        transport.respond(200, json!({"unexpected": true}));
        let client = authed_client(&transport, "t");
        let err = client.get::<Vec<Note>>("/api/notes/").await.unwrap_err();
        assert_eq!(err.status, Some(200));
        assert!(err.data.is_some());
    }

    #[tokio::test]
    async fn test_absolute_url_passes_through() {
        let transport = MockTransport::new();
        let client = authed_client(&transport, "t");
        client
            .make_request("https://other.example/api/tasks/", Method::Get, None)
            .await
            .unwrap();
        assert_eq!(transport.requests()[0].url, "https://other.example/api/tasks/");
    }

    #[tokio::test]
    async fn test_upload_is_multipart_without_json_header() {
        let transport = MockTransport::new();
        transport.respond(201, json!({"id": "3f0a1b2c-0000-4000-8000-000000000002", "file": "/media/a.txt"}));
        let client = authed_client(&transport, "t");

        let form = MultipartForm::new()
            .text("task", "6c1d3c1e-9a4f-4d43-9d2e-1f1c1b7a0a01")
            .file(FilePart {
                file_name: "a.txt".into(),
                content_type: "text/plain".into(),
                bytes: b"hi".to_vec(),
            });
        let _: Value = client.upload("/api/tasks/x/assets/", form).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.header_value("Content-Type"), None);
        match &sent.body {
            Some(RequestBody::Multipart(form)) => {
                assert_eq!(form.field("task"), Some("6c1d3c1e-9a4f-4d43-9d2e-1f1c1b7a0a01"));
                assert_eq!(form.file.as_ref().map(|f| f.file_name.as_str()), Some("a.txt"));
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_patch_form_sends_multipart_patch() {
        let transport = MockTransport::new();
        transport.respond(200, json!({}));
        let client = authed_client(&transport, "t");

        let form = MultipartForm::new().text("username", "ada");
        let _: Value = client.patch_form("/user/me/", form).await.unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.url, "http://test.local/user/me/");
        assert_eq!(sent.header_value("Authorization"), Some("Bearer t"));
        assert_eq!(sent.header_value("Content-Type"), None);
        assert!(matches!(&sent.body, Some(RequestBody::Multipart(f)) if f.field("username") == Some("ada")));
    }

    #[tokio::test]
    async fn test_public_request_skips_token() {
        let transport = MockTransport::new();
        transport.respond(200, json!({}));
        let client = authed_client(&transport, "t");
        let _: Value = client.post_public("/user/login/", &json!({"email": "e"})).await.unwrap();
        let sent = &transport.requests()[0];
        assert_eq!(sent.header_value("Authorization"), None);
        assert_eq!(sent.header_value("X-Requested-With"), Some("XMLHttpRequest"));
    }
}
