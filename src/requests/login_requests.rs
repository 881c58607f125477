use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::requests::error::ApiResult;
use crate::requests::http::{ApiClient, QueryParams, Scope};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    #[serde(default)]
    pub require_login: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommonMetadata {
    #[serde(default)]
    pub admin_panel_url: Option<String>,
}

pub async fn call_get_auth_config(client: &ApiClient) -> ApiResult<AuthConfig> {
    client
        .get("/auth/config", &QueryParams::new(), Scope::Common)
        .await
}

/// `None` when the session is not authenticated.
pub async fn call_get_current_user(client: &ApiClient) -> ApiResult<Option<AuthUser>> {
    client.get("/auth/me", &QueryParams::new(), Scope::Common).await
}

/// Browser redirect target that starts the OIDC flow; never fetched directly.
pub fn oidc_login_url(client: &ApiClient) -> String {
    client.url(
        "/auth/oidc/authorize",
        &QueryParams::new().push("return_to", "app"),
        Scope::Common,
    )
}

pub async fn call_logout(client: &ApiClient) -> ApiResult<()> {
    client
        .post::<IgnoredAny, ()>("/auth/logout", None, Scope::Common)
        .await
        .map(|_| ())
}

pub async fn call_get_metadata(client: &ApiClient) -> ApiResult<CommonMetadata> {
    client.get("/metadata", &QueryParams::new(), Scope::Common).await
}
