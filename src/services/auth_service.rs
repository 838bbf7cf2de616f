// ============================================================================
// AUTH SERVICE - login simulado (local) o colección `auth` (nube)
// ============================================================================
// Sin modelo de seguridad: credenciales fijas en local, token sin firmar.
// ============================================================================

use chrono::Duration;
use serde_json::json;

use super::api_client::Operation;
use crate::error::{AppError, AppResult, RemoteError, StorageError};
use crate::models::auth::{CloudLoginReply, CloudLoginRequest};
use crate::models::{Collection, LoginRequest, LogLevel, UserInfo, UserRole};
use crate::state::AppContext;
use crate::utils::constants::{
    STORAGE_KEY_IS_LOGGED_IN, STORAGE_KEY_LOGIN_TOKEN, STORAGE_KEY_LOGIN_USER,
};

pub struct AuthService<'a> {
    ctx: &'a AppContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub async fn login(&self, request: &LoginRequest) -> AppResult<UserInfo> {
        log::info!("🔐 Login de {}", request.username);
        let payload = serde_json::to_value(CloudLoginRequest::from(request)).map_err(|e| {
            AppError::Encode {
                entity: "LoginRequest",
                message: e.to_string(),
            }
        })?;

        let (token, user) = self
            .ctx
            .dispatch(
                "登录",
                |client| async move {
                    let reply = client
                        .execute(Collection::Auth.name(), Operation::Add, Some(payload))
                        .await?;
                    let reply: CloudLoginReply = serde_json::from_value(reply)
                        .map_err(|e| RemoteError::Decode(format!("auth: {}", e)))?;
                    Ok::<_, AppError>((reply.token, reply.user))
                },
                || self.mock_login(request),
            )
            .await?;

        let user = self.store_session(token, user)?;
        self.ctx.debug(
            LogLevel::Info,
            "登录成功",
            Some(json!({ "username": user.username, "role": user.role })),
        );
        log::info!("✅ Sesión iniciada: {}", user.shown_name());
        Ok(user)
    }

    /// Credenciales fijas de la configuración
    fn mock_login(&self, request: &LoginRequest) -> AppResult<(Option<String>, UserInfo)> {
        let admin = &self.ctx.config.admin;
        if request.username != admin.username || request.password != admin.password {
            self.ctx.debug(
                LogLevel::Warn,
                "登录失败: 用户名或密码错误",
                Some(json!({ "username": request.username })),
            );
            return Err(AppError::InvalidCredentials);
        }

        let user = UserInfo {
            id: "1".to_string(),
            username: admin.username.clone(),
            display_name: "系统管理员".to_string(),
            role: UserRole::Admin,
            token_expiry: None,
        };
        Ok((None, user))
    }

    /// Guarda token, usuario y bandera. Sin token → `mock-token-<ms>`;
    /// sin caducidad → ahora + días de configuración.
    fn store_session(&self, token: Option<String>, mut user: UserInfo) -> Result<UserInfo, StorageError> {
        let now = self.ctx.now();
        if user.token_expiry.is_none() {
            user.token_expiry =
                Some(now + Duration::days(self.ctx.config.storage.token_expiry_days));
        }
        let token = token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("mock-token-{}", now.timestamp_millis()));

        self.ctx.store.set_raw(STORAGE_KEY_LOGIN_TOKEN, &token)?;
        self.ctx.store.set_json(STORAGE_KEY_LOGIN_USER, &user)?;
        self.ctx.store.set_raw(STORAGE_KEY_IS_LOGGED_IN, "true")?;
        Ok(user)
    }

    pub fn current_user(&self) -> Option<UserInfo> {
        self.ctx
            .store
            .get_json_lenient::<UserInfo>(STORAGE_KEY_LOGIN_USER)
            .ok()
            .flatten()
    }

    /// Sesión válida: token presente y caducidad futura. Si no, se limpia.
    pub fn check_auth(&self) -> bool {
        if self.ctx.auth_token().is_none() {
            return false;
        }
        let valid = self
            .current_user()
            .map_or(false, |user| !user.is_expired(self.ctx.now()));
        if !valid {
            log::warn!("⚠️ Sesión caducada o inválida");
            if let Err(e) = self.clear() {
                log::error!("❌ No se pudo limpiar la sesión: {}", e);
            }
        }
        valid
    }

    pub fn logout(&self) -> Result<(), StorageError> {
        self.clear()?;
        self.ctx.debug(LogLevel::Info, "已退出登录", None);
        log::info!("👋 Sesión cerrada");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.ctx.store.remove(STORAGE_KEY_LOGIN_TOKEN)?;
        self.ctx.store.remove(STORAGE_KEY_LOGIN_USER)?;
        self.ctx.store.remove(STORAGE_KEY_IS_LOGGED_IN)
    }
}
