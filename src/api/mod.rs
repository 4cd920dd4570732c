//! REST API Client
//!
//! Thin HTTP wrapper: resolves paths against the configured base URL,
//! attaches the session token as a bearer credential, and decodes JSON.
//! No retries; a failed call returns its error to the caller.

mod auth;
mod http;
mod notes;
#[cfg(test)]
pub mod mock;

pub use http::BrowserTransport;

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Fully resolved request handed to a transport
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Raw status and body; status interpretation happens in `ApiClient`
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request. `Err` only for failures without a response.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    session: Session,
    transport: Rc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session, transport: Rc<dyn Transport>) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
            session,
            transport,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.request(Method::Post, path, encode(body)?).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.request(Method::Put, path, encode(body)?).await
    }

    /// Pass `&()` for a request without a body
    pub async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.request(Method::Patch, path, encode(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Delete, path, None).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        let request = ApiRequest {
            method,
            url: self.url(path),
            // Read per request so login/logout take effect immediately
            bearer: self.session.token(),
            body,
        };
        log::debug!("[api] {} {}", method, request.url);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            log::warn!("[api] {} {} -> {}: {}", method, path, response.status, err);
            return Err(err);
        }

        let body = if response.body.trim().is_empty() { "null" } else { response.body.as_str() };
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Option<Value>, ApiError> {
    match serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))? {
        Value::Null => Ok(None),
        value => Ok(Some(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::session::MemoryStore;
    use serde_json::json;

    fn client(mock: &Rc<MockTransport>) -> ApiClient {
        ApiClient::new("http://api.test/", Session::new(MemoryStore::default()), mock.clone())
    }

    #[tokio::test]
    async fn test_bearer_attached_when_signed_in() {
        let mock = Rc::new(MockTransport::new());
        let api = client(&mock);
        mock.respond(200, r#"{"ok":true}"#);
        mock.respond(200, r#"{"ok":true}"#);

        let _: Value = api.get("/me").await.unwrap();
        api.session().begin("jwt");
        let _: Value = api.get("/me").await.unwrap();

        let sent = mock.requests();
        assert_eq!(sent[0].bearer, None);
        assert_eq!(sent[1].bearer.as_deref(), Some("jwt"));
        assert_eq!(sent[1].url, "http://api.test/me");
    }

    #[tokio::test]
    async fn test_body_and_method() {
        let mock = Rc::new(MockTransport::new());
        let api = client(&mock);
        mock.respond(201, r#"{"id":1}"#);
        mock.respond(200, "");

        let created: Value = api.post("/notes", &json!({"title": "a"})).await.unwrap();
        let _: Value = api.patch("/notes/1", &()).await.unwrap();

        assert_eq!(created, json!({"id": 1}));
        let sent = mock.requests();
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].body, Some(json!({"title": "a"})));
        assert_eq!(sent[1].method, Method::Patch);
        assert_eq!(sent[1].body, None);
    }

    #[tokio::test]
    async fn test_http_error_carries_status_and_message() {
        let mock = Rc::new(MockTransport::new());
        let api = client(&mock);
        mock.respond(404, r#"{"message":"Note not found"}"#);

        let err = api.delete::<Value>("/notes/9").await.unwrap_err();

        assert_eq!(err, ApiError::Http { status: 404, message: "Note not found".to_string() });
    }

    #[tokio::test]
    async fn test_network_error_passes_through() {
        let mock = Rc::new(MockTransport::new());
        let api = client(&mock);
        mock.fail(ApiError::Network("connection refused".to_string()));

        let err = api.get::<Value>("/notes").await.unwrap_err();

        assert_eq!(err, ApiError::Network("connection refused".to_string()));
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_decode_error() {
        let mock = Rc::new(MockTransport::new());
        let api = client(&mock);
        mock.respond(200, "not json");

        let err = api.get::<Value>("/notes").await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }
}
