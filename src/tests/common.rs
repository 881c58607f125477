use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde_json::{json, Value};

use crate::components::context::Catalog;
use crate::config::ApiConfig;
use crate::requests::error::{ApiError, ApiResult};
use crate::requests::http::{ApiClient, HttpRequest, HttpResponse, Navigator, Transport};

enum Scripted {
    Ready(ApiResult<HttpResponse>),
    Gated(oneshot::Receiver<ApiResult<HttpResponse>>),
}

/// Answers requests from a queue, in order, and records what was sent.
#[derive(Default)]
pub struct MockTransport {
    script: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<HttpRequest>>,
    calls: Cell<usize>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, response: HttpResponse) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Ready(Ok(response)));
    }

    pub fn fail(&self, error: ApiError) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Ready(Err(error)));
    }

    /// Queues a response that only resolves once the returned sender fires.
    pub fn gate(&self) -> oneshot::Sender<ApiResult<HttpResponse>> {
        let (tx, rx) = oneshot::channel();
        self.script.borrow_mut().push_back(Scripted::Gated(rx));
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_url(&self) -> Option<String> {
        self.requests.borrow().last().map(|r| r.url.clone())
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, ApiResult<HttpResponse>> {
        self.calls.set(self.calls.get() + 1);
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);
        match self.script.borrow_mut().pop_front() {
            Some(Scripted::Ready(result)) => futures::future::ready(result).boxed_local(),
            Some(Scripted::Gated(rx)) => async move {
                rx.await
                    .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".to_string())))
            }
            .boxed_local(),
            None => futures::future::ready(Err(ApiError::Network(format!(
                "no scripted response for {}",
                url
            ))))
            .boxed_local(),
        }
    }
}

pub struct MockNavigator {
    path: RefCell<String>,
    redirects: RefCell<Vec<String>>,
}

impl MockNavigator {
    pub fn at(path: &str) -> Rc<Self> {
        Rc::new(Self {
            path: RefCell::new(path.to_string()),
            redirects: RefCell::new(Vec::new()),
        })
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }
}

impl Navigator for MockNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_string());
    }
}

pub fn response(status: u16, status_text: &str, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        status_text: status_text.to_string(),
        body: body.to_string(),
    }
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    response(status, "", &body.to_string())
}

/// A 200 wrapped the way the backend wraps successful payloads.
pub fn envelope(data: Value) -> HttpResponse {
    json_response(200, json!({ "success": true, "data": data }))
}

pub fn test_client(transport: &Rc<MockTransport>, navigator: &Rc<MockNavigator>) -> ApiClient {
    ApiClient::new(ApiConfig::default(), transport.clone(), navigator.clone())
}

pub fn test_catalog(transport: &Rc<MockTransport>) -> Catalog {
    Catalog::new(test_client(transport, &MockNavigator::at("/")))
}

pub fn video_json(id: i64, title: &str) -> Value {
    json!({ "id": id, "title": title, "thumbnailKey": format!("thumbs/{}.jpg", id) })
}

pub fn page_json(items: Vec<Value>, page: u32, page_size: u32, total: u64) -> Value {
    json!({ "page": page, "pageSize": page_size, "total": total, "items": items })
}
