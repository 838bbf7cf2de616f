use thiserror::Error;

/// Errores del almacenamiento clave/valor (localStorage o memoria)
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("No se pudo acceder a localStorage")]
    Unavailable,
    #[error("Error leyendo '{key}': {message}")]
    Read { key: String, message: String },
    #[error("Error guardando '{key}': {message}")]
    Write { key: String, message: String },
    #[error("Datos corruptos en '{key}': {message}")]
    Corrupt { key: String, message: String },
    #[error("Error serializando '{key}': {message}")]
    Serialize { key: String, message: String },
}

/// Subtipo de fallo de red; todos cuentan como error de red
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    Timeout,
    Connect,
    Cors,
    Aborted,
    Other,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteError {
    #[error("Configuración de nube incompleta: falta {0}")]
    Config(&'static str),
    #[error("HTTP error: {status}")]
    Http { status: u16 },
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("Network error ({kind:?}): {message}")]
    Network {
        kind: NetworkErrorKind,
        message: String,
    },
    #[error("Parse error: {0}")]
    Decode(String),
}

impl RemoteError {
    pub fn network(kind: NetworkErrorKind, message: impl Into<String>) -> Self {
        Self::Network {
            kind,
            message: message.into(),
        }
    }

    /// Clasifica un mensaje de error de transporte según los patrones del navegador
    pub fn from_transport_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = if message.contains("CORS") {
            NetworkErrorKind::Cors
        } else if message.contains("AbortError") || message.contains("aborted") {
            NetworkErrorKind::Aborted
        } else if message.contains("Failed to fetch")
            || message.contains("NetworkError")
            || message.contains("ERR_NAME_NOT_RESOLVED")
        {
            NetworkErrorKind::Connect
        } else {
            NetworkErrorKind::Other
        };
        Self::Network { kind, message }
    }

    /// Solo los errores de red provocan el paso automático a modo local
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    pub fn is_cors(&self) -> bool {
        matches!(
            self,
            Self::Network {
                kind: NetworkErrorKind::Cors,
                ..
            }
        )
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Modo de almacenamiento inválido: {0}")]
    InvalidMode(String),
    #[error("{entity} no encontrado: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("El servicio en la nube no está habilitado")]
    CloudDisabled,
    #[error("Usuario o contraseña incorrectos")]
    InvalidCredentials,
    #[error("Error serializando {entity}: {message}")]
    Encode {
        entity: &'static str,
        message: String,
    },
}

impl AppError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Remote(err) if err.is_network())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_messages_are_classified() {
        let err = RemoteError::from_transport_message("TypeError: Failed to fetch");
        assert_eq!(
            err,
            RemoteError::network(NetworkErrorKind::Connect, "TypeError: Failed to fetch")
        );
        assert!(RemoteError::from_transport_message("blocked by CORS policy").is_cors());
        assert!(RemoteError::from_transport_message("something odd").is_network());
    }

    #[test]
    fn test_only_network_errors_are_network_class() {
        assert!(!RemoteError::Http { status: 500 }.is_network());
        assert!(!RemoteError::Config("spaceId").is_network());
        assert!(!RemoteError::Api {
            code: 1,
            message: "x".into()
        }
        .is_network());
        let app: AppError = RemoteError::network(NetworkErrorKind::Timeout, "t").into();
        assert!(app.is_network());
    }
}
