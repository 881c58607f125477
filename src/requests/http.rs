use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::form_urlencoded;
use web_sys::RequestCredentials;

use crate::config::ApiConfig;
use crate::requests::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one request over the wire. Timeouts and cancellation belong to the
/// implementation, not to the client.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, ApiResult<HttpResponse>>;
}

/// Reads and changes the location of the whole application.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

pub struct GlooTransport;

impl Transport for GlooTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, ApiResult<HttpResponse>> {
        async move {
            let builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
            }
            .credentials(RequestCredentials::Include);

            let outgoing = match request.body {
                Some(body) => builder
                    .header("Content-Type", "application/json")
                    .body(body)?,
                None => builder.build()?,
            };

            let response = outgoing.send().await?;
            let status = response.status();
            let status_text = response.status_text();
            // An unreadable body is treated the same as an empty one
            let body = response.text().await.unwrap_or_default();

            Ok(HttpResponse {
                status,
                status_text,
                body,
            })
        }
        .boxed_local()
    }
}

pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                log::error!("Failed to redirect to {}: {:?}", path, e);
            }
        }
    }
}

/// Selects which URL prefix a request is sent under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Common,
    Admin,
}

/// Ordered query parameters. Absent and empty values are dropped on insert.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<V: ToString>(self, key: &'static str, value: V) -> Self {
        self.push_opt(key, Some(value))
    }

    pub fn push_opt<V: ToString>(mut self, key: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.0.push((key, value));
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.page_size)
    }
}

pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(u64::from(page_size)).max(1)
}

/// Picks the message for a failed response: `error.message`, then `message`,
/// then the status text, then a generic fallback.
pub fn resolve_error_message(body: Option<&Value>, status: u16, status_text: &str) -> String {
    let non_empty = |s: &&str| !s.is_empty();

    body.and_then(|b| b.get("error"))
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(non_empty)
        .or_else(|| {
            body.and_then(|b| b.get("message"))
                .and_then(Value::as_str)
                .filter(non_empty)
        })
        .or(Some(status_text).filter(non_empty))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed {}", status))
}

fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Ignoring unparsable response body: {}", e);
            None
        }
    }
}

fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map)
            if map.get("success") == Some(&Value::Bool(true)) && map.contains_key("data") =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// The single boundary every backend call goes through.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ApiConfig>,
    transport: Rc<dyn Transport>,
    navigator: Rc<dyn Navigator>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.transport, &other.transport)
            && Rc::ptr_eq(&self.navigator, &other.navigator)
    }
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        transport: Rc<dyn Transport>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            config: Rc::new(config),
            transport,
            navigator,
        }
    }

    pub fn browser(config: ApiConfig) -> Self {
        Self::new(config, Rc::new(GlooTransport), Rc::new(BrowserNavigator))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn url(&self, path: &str, params: &QueryParams, scope: Scope) -> String {
        let prefix = match scope {
            Scope::Common => self.config.common_prefix().to_string(),
            Scope::Admin => self.config.admin_prefix(),
        };
        if params.is_empty() {
            format!("{}{}", prefix, path)
        } else {
            format!("{}{}?{}", prefix, path, params.to_query_string())
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
        scope: Scope,
    ) -> ApiResult<T> {
        let request = HttpRequest {
            method: Method::Get,
            url: self.url(path, params, scope),
            body: None,
        };
        self.execute(request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        scope: Scope,
    ) -> ApiResult<T> {
        let body = body.map(serde_json::to_string).transpose()?;
        let request = HttpRequest {
            method: Method::Post,
            url: self.url(path, &QueryParams::new(), scope),
            body,
        };
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> ApiResult<T> {
        log::debug!("{:?} {}", request.method, request.url);
        let url = request.url.clone();
        let response = self.transport.send(request).await?;
        let body = parse_body(&response.body);

        if response.status == 401 {
            let current = self.navigator.current_path();
            if !self.config.is_login_path(&current) {
                log::info!("Session rejected by {}, redirecting to login", url);
                self.navigator.redirect(&self.config.login_path);
            }
        }

        if !response.ok() {
            let message = resolve_error_message(body.as_ref(), response.status, &response.status_text);
            log::warn!("Request to {} failed ({}): {}", url, response.status, message);
            return Err(ApiError::http(response.status, message, body));
        }

        let data = body.map(unwrap_envelope).unwrap_or(Value::Null);
        Ok(serde_json::from_value(data)?)
    }
}
