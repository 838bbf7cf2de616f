use serde::{Deserialize, Serialize};

use crate::config::CloudDefaults;
use crate::error::RemoteError;

/// Ajustes del backend en la nube (`ht_settings`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudSettings {
    #[serde(default)]
    pub space_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub endpoint: String,
}

impl CloudSettings {
    pub fn is_complete(&self) -> bool {
        self.ensure_complete().is_ok()
    }

    /// Primer campo ausente (o endpoint que no es URL http/https) como
    /// `RemoteError::Config`
    pub fn ensure_complete(&self) -> Result<(), RemoteError> {
        if !self.has_valid_endpoint() {
            return Err(RemoteError::Config("endpoint"));
        }
        if self.space_id.trim().is_empty() {
            return Err(RemoteError::Config("spaceId"));
        }
        if self.client_secret.trim().is_empty() {
            return Err(RemoteError::Config("clientSecret"));
        }
        Ok(())
    }

    fn has_valid_endpoint(&self) -> bool {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return false;
        }
        reqwest::Url::parse(endpoint)
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false)
    }

    /// URL del método RPC: `{endpoint}/client`
    pub fn client_url(&self) -> String {
        format!("{}/client", self.endpoint.trim_end_matches('/'))
    }
}

impl From<&CloudDefaults> for CloudSettings {
    fn from(defaults: &CloudDefaults) -> Self {
        Self {
            space_id: defaults.space_id.clone(),
            client_secret: defaults.client_secret.clone(),
            endpoint: defaults.endpoint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_reported_in_order() {
        let mut settings = CloudSettings::from(&CloudDefaults::default());
        assert_eq!(settings.ensure_complete(), Err(RemoteError::Config("spaceId")));

        settings.space_id = "space".into();
        assert_eq!(
            settings.ensure_complete(),
            Err(RemoteError::Config("clientSecret"))
        );

        settings.client_secret = "secret".into();
        assert!(settings.is_complete());
    }

    #[test]
    fn test_endpoint_must_be_an_http_url() {
        let mut settings = CloudSettings {
            space_id: "s".into(),
            client_secret: "c".into(),
            endpoint: "api.example.com".into(),
        };
        assert_eq!(settings.ensure_complete(), Err(RemoteError::Config("endpoint")));

        settings.endpoint = "ftp://api.example.com".into();
        assert!(!settings.is_complete());

        settings.endpoint = "http://127.0.0.1:8080".into();
        assert!(settings.is_complete());
    }

    #[test]
    fn test_client_url_ignores_trailing_slash() {
        let settings = CloudSettings {
            space_id: "s".into(),
            client_secret: "c".into(),
            endpoint: "https://api.example.com/".into(),
        };
        assert_eq!(settings.client_url(), "https://api.example.com/client");
    }
}
