const DEFAULT_API_BASE: &str = "/api";
const LOGIN_PATH: &str = "/login";

/// Where the backend lives, relative to the page origin.
///
/// A wasm bundle has no process environment, so overrides are taken at
/// build time from `CATALOG_API_BASE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_base: String,
    pub login_path: String,
}

impl ApiConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        let api_base = api_base.trim_end_matches('/').to_string();
        Self {
            api_base,
            login_path: LOGIN_PATH.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(option_env!("CATALOG_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }

    pub fn common_prefix(&self) -> &str {
        &self.api_base
    }

    pub fn admin_prefix(&self) -> String {
        format!("{}/admin", self.api_base)
    }

    pub fn is_login_path(&self, path: &str) -> bool {
        path.trim_end_matches('/') == self.login_path
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
