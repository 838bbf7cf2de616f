// ============================================================================
// TRANSPORT - un único POST JSON con timeout
// ============================================================================
// reqwest usa fetch en WASM e hyper en nativo; los tests usan MockTransport
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{NetworkErrorKind, RemoteError};

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Envío HTTP; el navegador es monohilo, así que los futures no son `Send`
#[async_trait(?Send)]
pub trait Transport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, RemoteError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    fn build(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(request.body)
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn send(&self, request: HttpRequest) -> Result<reqwest::Response, RemoteError> {
        self.build(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_reqwest_error)
    }

    #[cfg(target_arch = "wasm32")]
    async fn send(&self, request: HttpRequest) -> Result<reqwest::Response, RemoteError> {
        use futures::future::{select, Either};

        // fetch no tiene timeout propio: se abandona al vencer el temporizador
        let send = Box::pin(self.build(request).send());
        let timer = Box::pin(gloo_timers::future::sleep(self.timeout));
        match select(send, timer).await {
            Either::Left((result, _)) => result.map_err(map_reqwest_error),
            Either::Right(_) => Err(RemoteError::network(
                NetworkErrorKind::Timeout,
                format!("请求超时 ({}s)", self.timeout.as_secs()),
            )),
        }
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, RemoteError> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        Ok(HttpResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RemoteError {
    // URL mal formada: fallo de configuración, no de red
    if err.is_builder() {
        return RemoteError::Config("endpoint");
    }
    if err.is_timeout() {
        return RemoteError::network(NetworkErrorKind::Timeout, err.to_string());
    }
    #[cfg(not(target_arch = "wasm32"))]
    let connect = err.is_connect();
    #[cfg(target_arch = "wasm32")]
    let connect = false;
    if connect {
        return RemoteError::network(NetworkErrorKind::Connect, err.to_string());
    }
    if err.is_decode() || err.is_body() {
        return RemoteError::Decode(err.to_string());
    }
    RemoteError::from_transport_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = HttpRequest {
            url: "https://x/client".into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: "{}".into(),
        };
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("authorization"), None);
    }

    #[test]
    fn test_response_ok_range() {
        assert!(HttpResponse { status: 204, body: String::new() }.ok());
        assert!(!HttpResponse { status: 404, body: String::new() }.ok());
    }

    #[tokio::test]
    async fn test_malformed_url_is_a_config_error() {
        let transport = ReqwestTransport::new(Duration::from_secs(2));
        let err = transport
            .post_json(HttpRequest {
                url: "api.example.com/client".into(),
                headers: Vec::new(),
                body: "{}".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, RemoteError::Config("endpoint"));
        assert!(!err.is_network());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_class() {
        // Puerto reservado y liberado: nadie escucha en él
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = ReqwestTransport::new(Duration::from_secs(2));
        let err = transport
            .post_json(HttpRequest {
                url: format!("http://127.0.0.1:{}/client", port),
                headers: Vec::new(),
                body: "{}".into(),
            })
            .await
            .unwrap_err();
        assert!(err.is_network());
    }
}
