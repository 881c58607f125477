use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};

use futures::future::{self, Either, LocalBoxFuture, Shared};
use futures::FutureExt;

use crate::requests::error::{ApiError, ApiResult};
use crate::requests::http::QueryParams;

/// Identity of one cached read: a resource tag plus every parameter that
/// changes the result. Parameters are kept sorted so insertion order never
/// matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    resource: &'static str,
    params: BTreeMap<&'static str, String>,
}

impl QueryKey {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            params: BTreeMap::new(),
        }
    }

    pub fn param<V: ToString>(self, name: &'static str, value: V) -> Self {
        self.opt_param(name, Some(value))
    }

    pub fn opt_param<V: ToString>(mut self, name: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.is_empty() {
                self.params.insert(name, value);
            }
        }
        self
    }

    pub fn with_params(mut self, params: &QueryParams) -> Self {
        for (name, value) in params.iter() {
            self.params.insert(name, value.to_string());
        }
        self
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, name, value)?;
        }
        Ok(())
    }
}

pub mod keys {
    use super::QueryKey;
    use crate::requests::video_reqs::VideoListQuery;

    pub const AUTH_CONFIG: &str = "auth_config";
    pub const CURRENT_USER: &str = "current_user";
    pub const METADATA: &str = "metadata";
    pub const VIDEOS: &str = "videos";
    pub const VIDEO: &str = "video";
    pub const RECOMMENDED: &str = "recommended_videos";
    pub const BANNER: &str = "banner_videos";
    pub const LATEST: &str = "latest_videos";
    pub const VIDEO_INTERACTIONS: &str = "video_interactions";
    pub const FAVORITES: &str = "favorite_videos";
    pub const HISTORY: &str = "watch_history";
    pub const ACTOR: &str = "actor";
    pub const ACTOR_VIDEOS: &str = "actor_videos";
    pub const CREATOR: &str = "creator";
    pub const CREATOR_VIDEOS: &str = "creator_videos";
    pub const TAG: &str = "tag";
    pub const TAG_VIDEOS: &str = "tag_videos";

    fn paged(resource: &'static str, page: u32, page_size: u32) -> QueryKey {
        QueryKey::new(resource)
            .param("page", page)
            .param("pageSize", page_size)
    }

    pub fn auth_config() -> QueryKey {
        QueryKey::new(AUTH_CONFIG)
    }

    pub fn current_user() -> QueryKey {
        QueryKey::new(CURRENT_USER)
    }

    pub fn metadata() -> QueryKey {
        QueryKey::new(METADATA)
    }

    pub fn videos(query: &VideoListQuery) -> QueryKey {
        QueryKey::new(VIDEOS).with_params(&query.to_params())
    }

    pub fn video(id: i64) -> QueryKey {
        QueryKey::new(VIDEO).param("id", id)
    }

    pub fn recommended() -> QueryKey {
        QueryKey::new(RECOMMENDED)
    }

    pub fn banner() -> QueryKey {
        QueryKey::new(BANNER)
    }

    pub fn latest(page: u32, page_size: u32) -> QueryKey {
        paged(LATEST, page, page_size)
    }

    pub fn video_interactions(id: i64) -> QueryKey {
        QueryKey::new(VIDEO_INTERACTIONS).param("id", id)
    }

    pub fn favorites(page: u32, page_size: u32) -> QueryKey {
        paged(FAVORITES, page, page_size)
    }

    pub fn history(page: u32, page_size: u32) -> QueryKey {
        paged(HISTORY, page, page_size)
    }

    pub fn actor(id: i64) -> QueryKey {
        QueryKey::new(ACTOR).param("id", id)
    }

    pub fn actor_videos(id: i64, page: u32, page_size: u32) -> QueryKey {
        paged(ACTOR_VIDEOS, page, page_size).param("id", id)
    }

    pub fn creator(id: i64) -> QueryKey {
        QueryKey::new(CREATOR).param("id", id)
    }

    pub fn creator_videos(id: i64, page: u32, page_size: u32) -> QueryKey {
        paged(CREATOR_VIDEOS, page, page_size).param("id", id)
    }

    pub fn tag(id: i64) -> QueryKey {
        QueryKey::new(TAG).param("id", id)
    }

    pub fn tag_videos(id: i64, page: u32, page_size: u32) -> QueryKey {
        paged(TAG_VIDEOS, page, page_size).param("id", id)
    }
}

type CachedValue = Rc<dyn Any>;
type SharedFetch = Shared<LocalBoxFuture<'static, Result<CachedValue, ApiError>>>;

#[derive(Default)]
struct Entry {
    data: Option<CachedValue>,
    error: Option<ApiError>,
    stale: bool,
    in_flight: Option<SharedFetch>,
    // generation of the newest request; only its result may land
    issued: u64,
    settled: u64,
}

struct Listener {
    id: u64,
    key: QueryKey,
    notify: Rc<dyn Fn()>,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<QueryKey, Entry>,
    listeners: Vec<Listener>,
    next_listener: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// What a view sees for one key at render time.
pub struct QuerySnapshot<T> {
    pub data: Option<Rc<T>>,
    pub error: Option<ApiError>,
    pub status: QueryStatus,
}

impl<T> QuerySnapshot<T> {
    pub fn idle() -> Self {
        Self {
            data: None,
            error: None,
            status: QueryStatus::Idle,
        }
    }
}

impl<T> Clone for QuerySnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            status: self.status,
        }
    }
}

/// Detaches its listener when dropped.
pub struct Subscription {
    cache: Weak<RefCell<CacheInner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.cache.upgrade() {
            inner.borrow_mut().listeners.retain(|l| l.id != self.id);
        }
    }
}

/// In-memory read-through cache shared by every hook in the app.
///
/// Entries are never evicted; every key visited stays until the page reloads.
#[derive(Clone, Default)]
pub struct QueryCache {
    inner: Rc<RefCell<CacheInner>>,
}

impl PartialEq for QueryCache {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

fn downcast<T: 'static>(value: CachedValue, resource: &'static str) -> ApiResult<Rc<T>> {
    value
        .downcast::<T>()
        .map_err(|_| ApiError::UnexpectedType(resource))
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `fetcher` for `key` unless a request for the same key is already
    /// in flight, in which case the caller joins that request.
    pub fn fetch<T, F, Fut>(
        &self,
        key: QueryKey,
        fetcher: F,
    ) -> impl Future<Output = ApiResult<Rc<T>>> + 'static
    where
        T: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        let (generation, request) = self.attach_or_issue(&key, fetcher);
        let cache = self.clone();
        async move {
            let result = request.await;
            cache.settle(&key, generation, &result);
            result.and_then(|value| downcast(value, key.resource()))
        }
    }

    /// Answers from the cache when the entry is fresh, otherwise fetches.
    pub fn query<T, F, Fut>(
        &self,
        key: QueryKey,
        fetcher: F,
    ) -> impl Future<Output = ApiResult<Rc<T>>> + 'static
    where
        T: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        match self.fresh_value(&key) {
            Some(value) => Either::Left(future::ready(downcast(value, key.resource()))),
            None => Either::Right(self.fetch(key, fetcher)),
        }
    }

    fn attach_or_issue<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> (u64, SharedFetch)
    where
        T: 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        if let Some(entry) = self.inner.borrow().entries.get(key) {
            if let Some(in_flight) = &entry.in_flight {
                log::debug!("Joining in-flight request for {}", key);
                return (entry.issued, in_flight.clone());
            }
        }

        let request = fetcher()
            .map(|result| result.map(|value| Rc::new(value) as CachedValue))
            .boxed_local()
            .shared();

        let mut inner = self.inner.borrow_mut();
        let entry = inner.entries.entry(key.clone()).or_default();
        entry.issued += 1;
        entry.in_flight = Some(request.clone());
        (entry.issued, request)
    }

    fn settle(&self, key: &QueryKey, generation: u64, result: &Result<CachedValue, ApiError>) {
        {
            let mut inner = self.inner.borrow_mut();
            let Some(entry) = inner.entries.get_mut(key) else {
                return;
            };
            if generation != entry.issued {
                log::debug!("Discarding superseded response for {}", key);
                return;
            }
            if generation <= entry.settled {
                return;
            }
            entry.settled = generation;
            entry.in_flight = None;
            entry.stale = false;
            match result {
                Ok(value) => {
                    entry.data = Some(value.clone());
                    entry.error = None;
                }
                // previous data stays visible next to the error
                Err(e) => entry.error = Some(e.clone()),
            }
        }
        self.notify(key);
    }

    fn fresh_value(&self, key: &QueryKey) -> Option<CachedValue> {
        let inner = self.inner.borrow();
        let entry = inner.entries.get(key)?;
        if entry.stale || entry.error.is_some() || entry.in_flight.is_some() {
            return None;
        }
        entry.data.clone()
    }

    pub fn snapshot<T: 'static>(&self, key: &QueryKey) -> QuerySnapshot<T> {
        let inner = self.inner.borrow();
        let Some(entry) = inner.entries.get(key) else {
            return QuerySnapshot::idle();
        };
        let status = if entry.in_flight.is_some() {
            QueryStatus::Loading
        } else if entry.error.is_some() {
            QueryStatus::Error
        } else if entry.data.is_some() {
            QueryStatus::Success
        } else {
            QueryStatus::Idle
        };
        QuerySnapshot {
            data: entry.data.clone().and_then(|value| value.downcast::<T>().ok()),
            error: entry.error.clone(),
            status,
        }
    }

    /// True when nothing is cached for `key`, or the entry was invalidated
    /// and no replacement request is running.
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        match self.inner.borrow().entries.get(key) {
            None => true,
            Some(entry) => entry.in_flight.is_none() && entry.stale,
        }
    }

    /// Like [`QueryCache::needs_fetch`], but an entry that settled in error
    /// is also retried. Only for a view attaching to `key`; listeners keep
    /// using `needs_fetch` so a failure cannot trigger a refetch loop.
    pub fn needs_fetch_on_mount(&self, key: &QueryKey) -> bool {
        match self.inner.borrow().entries.get(key) {
            None => true,
            Some(entry) => entry.in_flight.is_none() && (entry.stale || entry.error.is_some()),
        }
    }

    pub fn invalidate_where(&self, predicate: impl Fn(&QueryKey) -> bool) {
        let touched: Vec<QueryKey> = {
            let mut inner = self.inner.borrow_mut();
            inner
                .entries
                .iter_mut()
                .filter(|(key, _)| predicate(*key))
                .map(|(key, entry)| {
                    entry.stale = true;
                    if entry.in_flight.take().is_some() {
                        log::debug!("Superseding in-flight request for {}", key);
                    }
                    entry.issued += 1;
                    key.clone()
                })
                .collect()
        };
        for key in touched {
            self.notify(&key);
        }
    }

    pub fn invalidate_resource(&self, resource: &str) {
        self.invalidate_where(|key| key.resource() == resource);
    }

    pub fn invalidate_key(&self, target: &QueryKey) {
        self.invalidate_where(|key| key == target);
    }

    pub fn subscribe(&self, key: QueryKey, notify: impl Fn() + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_listener += 1;
        let id = inner.next_listener;
        inner.listeners.push(Listener {
            id,
            key,
            notify: Rc::new(notify),
        });
        Subscription {
            cache: Rc::downgrade(&self.inner),
            id,
        }
    }

    fn notify(&self, key: &QueryKey) {
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| &l.key == key)
            .map(|l| l.notify.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}
