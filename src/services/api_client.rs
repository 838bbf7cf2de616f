// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// Un POST `{endpoint}/client` por operación lógica; respuesta en sobre
// `{code, data, message}`. No decide modos ni hace fallback.
// ============================================================================

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::transport::{HttpRequest, Transport};
use crate::error::RemoteError;
use crate::models::record::collection_from_path;
use crate::models::CloudSettings;
use crate::utils::constants::{CLOUD_RPC_METHOD, HEADER_CLIENT_SECRET};

/// Operación del backend serverless
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Add,
    Update,
    Remove,
}

/// Verbo HTTP → operación; cualquier otro verbo es `Read`
const VERB_TABLE: [(&str, Operation); 4] = [
    ("GET", Operation::Read),
    ("POST", Operation::Add),
    ("PUT", Operation::Update),
    ("DELETE", Operation::Remove),
];

impl Operation {
    pub fn action(&self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Remove => "remove",
        }
    }

    pub fn from_http_method(method: &str) -> Self {
        VERB_TABLE
            .iter()
            .find(|(verb, _)| verb.eq_ignore_ascii_case(method))
            .map(|(_, op)| *op)
            .unwrap_or(Operation::Read)
    }
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    method: &'static str,
    params: RpcParams<'a>,
}

#[derive(Serialize)]
struct RpcParams<'a> {
    #[serde(rename = "spaceId")]
    space_id: &'a str,
    collection_name: &'a str,
    action: &'static str,
    data: &'a Value,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    message: Option<String>,
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct RemoteClient {
    transport: Rc<dyn Transport>,
    settings: CloudSettings,
    token: Option<String>,
}

impl RemoteClient {
    pub fn new(transport: Rc<dyn Transport>, settings: CloudSettings, token: Option<String>) -> Self {
        Self {
            transport,
            settings,
            token,
        }
    }

    pub fn settings(&self) -> &CloudSettings {
        &self.settings
    }

    /// Llamada por ruta lógica (`/api/orders`) y verbo HTTP
    pub async fn call(
        &self,
        path: &str,
        method: &str,
        data: Option<Value>,
    ) -> Result<Value, RemoteError> {
        self.execute(
            collection_from_path(path),
            Operation::from_http_method(method),
            data,
        )
        .await
    }

    pub async fn execute(
        &self,
        collection: &str,
        operation: Operation,
        data: Option<Value>,
    ) -> Result<Value, RemoteError> {
        self.settings.ensure_complete()?;

        let data = match data {
            Some(Value::Null) | None => Value::Object(Default::default()),
            Some(value) => value,
        };
        let body = serde_json::to_string(&RpcRequest {
            method: CLOUD_RPC_METHOD,
            params: RpcParams {
                space_id: &self.settings.space_id,
                collection_name: collection,
                action: operation.action(),
                data: &data,
            },
        })
        .map_err(|e| RemoteError::Decode(format!("Serialization error: {}", e)))?;

        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                HEADER_CLIENT_SECRET.to_string(),
                self.settings.client_secret.clone(),
            ),
        ];
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        log::debug!("☁️ {} {} → {}", operation.action(), collection, self.settings.client_url());

        let response = self
            .transport
            .post_json(HttpRequest {
                url: self.settings.client_url(),
                headers,
                body,
            })
            .await?;

        if !response.ok() {
            return Err(RemoteError::Http {
                status: response.status,
            });
        }

        let envelope: Envelope = serde_json::from_str(&response.body)
            .map_err(|e| RemoteError::Decode(format!("Parse error: {}", e)))?;

        if envelope.code != 0 {
            return Err(RemoteError::Api {
                code: envelope.code,
                message: envelope
                    .message
                    .unwrap_or_else(|| "未知错误".to_string()),
            });
        }

        Ok(envelope.data)
    }

    /// Lectura de una colección como lista tipada; `data: null` → lista vacía
    pub async fn read_list<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Option<Value>,
    ) -> Result<Vec<T>, RemoteError> {
        let data = self.execute(collection, Operation::Read, filter).await?;
        if data.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(data)
            .map_err(|e| RemoteError::Decode(format!("{}: {}", collection, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkErrorKind;
    use crate::models::Service;
    use crate::services::mock_transport::MockTransport;
    use serde_json::json;

    fn settings() -> CloudSettings {
        CloudSettings {
            space_id: "space-1".into(),
            client_secret: "s3cret".into(),
            endpoint: "https://api.example.com".into(),
        }
    }

    fn client(mock: &Rc<MockTransport>, token: Option<&str>) -> RemoteClient {
        RemoteClient::new(mock.clone(), settings(), token.map(String::from))
    }

    #[test]
    fn test_verb_table() {
        assert_eq!(Operation::from_http_method("GET"), Operation::Read);
        assert_eq!(Operation::from_http_method("POST"), Operation::Add);
        assert_eq!(Operation::from_http_method("put"), Operation::Update);
        assert_eq!(Operation::from_http_method("DELETE"), Operation::Remove);
        assert_eq!(Operation::from_http_method("PATCH"), Operation::Read);
    }

    #[tokio::test]
    async fn test_request_wire_format() {
        let mock = Rc::new(MockTransport::new());
        mock.push_data(json!([]));

        client(&mock, Some("tok"))
            .call("/api/orders", "GET", None)
            .await
            .unwrap();

        let request = &mock.requests()[0];
        assert_eq!(request.url, "https://api.example.com/client");
        assert_eq!(request.header("x-basement-token"), Some("s3cret"));
        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
        assert_eq!(
            mock.body(0),
            json!({
                "method": "serverless.db.collection.operation",
                "params": {
                    "spaceId": "space-1",
                    "collection_name": "orders",
                    "action": "read",
                    "data": {}
                }
            })
        );
    }

    #[tokio::test]
    async fn test_no_bearer_without_token() {
        let mock = Rc::new(MockTransport::new());
        mock.push_data(Value::Null);
        client(&mock, None)
            .execute("services", Operation::Remove, Some(json!({"id": "x"})))
            .await
            .unwrap();
        assert_eq!(mock.requests()[0].header("Authorization"), None);
        assert_eq!(mock.body(0)["params"]["action"], "remove");
        assert_eq!(mock.body(0)["params"]["data"]["id"], "x");
    }

    #[tokio::test]
    async fn test_missing_settings_fail_before_sending() {
        let mock = Rc::new(MockTransport::new());
        let mut incomplete = settings();
        incomplete.client_secret.clear();
        let remote = RemoteClient::new(mock.clone(), incomplete, None);

        let err = remote.call("/api/orders", "GET", None).await.unwrap_err();
        assert_eq!(err, RemoteError::Config("clientSecret"));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_error_taxonomy() {
        let mock = Rc::new(MockTransport::new());
        let remote = client(&mock, None);

        mock.push_raw(503, "");
        assert_eq!(
            remote.call("/api/orders", "GET", None).await.unwrap_err(),
            RemoteError::Http { status: 503 }
        );

        mock.push_api_error(40001, "权限不足");
        assert_eq!(
            remote.call("/api/orders", "GET", None).await.unwrap_err(),
            RemoteError::Api {
                code: 40001,
                message: "权限不足".into()
            }
        );

        mock.push_raw(200, r#"{"code": 7}"#);
        assert_eq!(
            remote.call("/api/orders", "GET", None).await.unwrap_err(),
            RemoteError::Api {
                code: 7,
                message: "未知错误".into()
            }
        );

        mock.push_raw(200, "<html>");
        assert!(matches!(
            remote.call("/api/orders", "GET", None).await.unwrap_err(),
            RemoteError::Decode(_)
        ));

        mock.push_offline();
        let err = remote.call("/api/orders", "GET", None).await.unwrap_err();
        assert!(matches!(
            err,
            RemoteError::Network {
                kind: NetworkErrorKind::Connect,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_read_list_decodes_and_handles_null() {
        let mock = Rc::new(MockTransport::new());
        let remote = client(&mock, None);

        mock.push_data(json!([{"id": 1, "name": "数据恢复", "price": "300", "duration": 90}]));
        let services: Vec<Service> = remote.read_list("services", None).await.unwrap();
        assert_eq!(services[0].id, "1");
        assert_eq!(services[0].price, 300.0);

        mock.push_data(Value::Null);
        let empty: Vec<Service> = remote.read_list("services", None).await.unwrap();
        assert!(empty.is_empty());
    }
}
