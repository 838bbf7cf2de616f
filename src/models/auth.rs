use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Staff,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "管理员",
            UserRole::Manager => "经理",
            UserRole::Staff => "普通员工",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Staff
    }
}

/// Texto para un rol en bruto; desconocido → "未知角色"
pub fn role_label(raw: &str) -> &'static str {
    match raw {
        "admin" => UserRole::Admin.label(),
        "manager" => UserRole::Manager.label(),
        "staff" => UserRole::Staff.label(),
        _ => "未知角色",
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Cuerpo enviado a la colección `auth` en modo nube
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct CloudLoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub action: &'static str,
}

impl<'a> From<&'a LoginRequest> for CloudLoginRequest<'a> {
    fn from(req: &'a LoginRequest) -> Self {
        Self {
            username: &req.username,
            password: &req.password,
            action: "login",
        }
    }
}

/// Usuario autenticado (`ht_login_user`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub token_expiry: Option<DateTime<Utc>>,
}

impl UserInfo {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.token_expiry.map_or(true, |expiry| expiry < now)
    }

    /// Nombre mostrado en la cabecera
    pub fn shown_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

/// Respuesta del login en la nube: usuario más token opcional
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct CloudLoginReply {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub user: UserInfo,
}
