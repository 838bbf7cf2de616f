// Transporte de pruebas: respuestas en cola y registro de peticiones

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::{NetworkErrorKind, RemoteError};

#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Result<HttpResponse, RemoteError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_raw(&self, status: u16, body: impl Into<String>) {
        self.replies.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
    }

    /// Respuesta correcta `{code: 0, data}`
    pub fn push_data(&self, data: Value) {
        self.push_raw(200, json!({ "code": 0, "data": data }).to_string());
    }

    pub fn push_api_error(&self, code: i64, message: &str) {
        self.push_raw(200, json!({ "code": code, "message": message }).to_string());
    }

    pub fn push_error(&self, err: RemoteError) {
        self.replies.borrow_mut().push_back(Err(err));
    }

    pub fn push_offline(&self) {
        self.push_error(RemoteError::network(
            NetworkErrorKind::Connect,
            "TypeError: Failed to fetch",
        ));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Cuerpo JSON de la petición `index`
    pub fn body(&self, index: usize) -> Value {
        self.requests
            .borrow()
            .get(index)
            .and_then(|r| serde_json::from_str(&r.body).ok())
            .unwrap_or(Value::Null)
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, RemoteError> {
        self.requests.borrow_mut().push(request);
        self.replies.borrow_mut().pop_front().unwrap_or_else(|| {
            Err(RemoteError::network(
                NetworkErrorKind::Other,
                "MockTransport: sin respuesta en cola",
            ))
        })
    }
}
