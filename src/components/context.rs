use yewdux::prelude::*;

use crate::components::query::QueryCache;
use crate::config::ApiConfig;
use crate::requests::http::ApiClient;
use crate::requests::login_requests::{AuthConfig, AuthUser, CommonMetadata};

/// Session snapshot resolved once at startup by the navigation handler.
#[derive(Default, Clone, PartialEq, Store)]
pub struct AppState {
    pub auth_config: Option<AuthConfig>,
    pub auth_user: Option<AuthUser>,
    pub metadata: Option<CommonMetadata>,
    pub session_checked: bool,
}

impl AppState {
    pub fn requires_login(&self) -> bool {
        self.auth_config
            .as_ref()
            .map(|config| config.require_login)
            .unwrap_or(false)
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_user.is_some()
    }

    /// Only admins get a link to the admin panel.
    pub fn admin_panel_url(&self) -> Option<&str> {
        let user = self.auth_user.as_ref()?;
        if !user.is_admin() {
            return None;
        }
        self.metadata
            .as_ref()?
            .admin_panel_url
            .as_deref()
            .filter(|url| !url.is_empty())
    }
}

/// Backend access shared through a Yew context: one client, one cache.
#[derive(Clone, PartialEq)]
pub struct Catalog {
    pub api: ApiClient,
    pub cache: QueryCache,
}

impl Catalog {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
        }
    }

    pub fn browser() -> Self {
        Self::new(ApiClient::browser(ApiConfig::from_env()))
    }

    pub fn config(&self) -> &ApiConfig {
        self.api.config()
    }
}
