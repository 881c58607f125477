use std::future::Future;
use std::rc::Rc;

use yew::prelude::*;

use crate::components::context::Catalog;
use crate::components::query::{keys, QueryKey, QuerySnapshot, QueryStatus};
use crate::requests::error::{ApiError, ApiResult};
use crate::requests::http::{ApiClient, PaginatedResult};
use crate::requests::login_requests::{
    call_get_auth_config, call_get_current_user, call_get_metadata, call_logout, AuthConfig,
    AuthUser, CommonMetadata,
};
use crate::requests::people_reqs::{
    call_get_actor, call_get_actor_videos, call_get_creator, call_get_creator_videos, Actor,
    Creator,
};
use crate::requests::tag_reqs::{call_get_tag, call_get_tag_videos, Tag};
use crate::requests::video_reqs::{
    call_get_banner_videos, call_get_favorite_videos, call_get_latest_videos,
    call_get_recommended_videos, call_get_video, call_get_video_interactions, call_get_videos,
    call_get_watch_history, call_set_video_favorite, call_upsert_video_history, HistoryUpdate,
    Video, VideoDetail, VideoInteractionState, VideoListQuery, WatchHistoryItem,
};

pub struct QueryHandle<T> {
    pub data: Option<Rc<T>>,
    pub error: Option<ApiError>,
    pub loading: bool,
    pub refetch: Callback<()>,
}

#[hook]
pub fn use_catalog() -> Catalog {
    use_context::<Catalog>().unwrap_or_else(|| {
        log::warn!("Catalog context missing, falling back to a detached client");
        Catalog::browser()
    })
}

fn spawn_fetch<T, F, Fut>(catalog: &Catalog, key: QueryKey, fetcher: Rc<F>)
where
    T: 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let api = catalog.api.clone();
    let request = catalog.cache.fetch(key.clone(), move || fetcher(api));
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = request.await {
            log::warn!("Failed to load {}: {}", key, e);
        }
    });
}

/// Reads `key` through the shared cache.
///
/// `None` disables the query: no request is made and the handle reports
/// neither loading nor error. The view re-renders whenever the entry settles
/// or is invalidated; an invalidated entry is fetched again while mounted.
#[hook]
pub fn use_query<T, F, Fut>(key: Option<QueryKey>, fetcher: F) -> QueryHandle<T>
where
    T: 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = ApiResult<T>> + 'static,
{
    let catalog = use_catalog();
    let rerender = use_force_update();

    {
        let catalog = catalog.clone();
        use_effect_with(key.clone(), move |key| {
            let subscription = key.clone().map(|key| {
                let fetcher = Rc::new(fetcher);
                let ensure_loaded = {
                    let catalog = catalog.clone();
                    let key = key.clone();
                    move |mounting: bool| {
                        let needed = if mounting {
                            catalog.cache.needs_fetch_on_mount(&key)
                        } else {
                            catalog.cache.needs_fetch(&key)
                        };
                        if needed {
                            spawn_fetch(&catalog, key.clone(), fetcher.clone());
                        }
                    }
                };
                ensure_loaded(true);
                catalog.cache.subscribe(key, move || {
                    ensure_loaded(false);
                    rerender.force_update();
                })
            });
            move || drop(subscription)
        });
    }

    let refetch = {
        let catalog = catalog.clone();
        let key = key.clone();
        Callback::from(move |_| {
            if let Some(key) = &key {
                catalog.cache.invalidate_key(key);
            }
        })
    };

    let snapshot: QuerySnapshot<T> = match &key {
        Some(key) => catalog.cache.snapshot(key),
        None => QuerySnapshot::idle(),
    };
    let loading = is_loading(key.as_ref(), snapshot.status);

    QueryHandle {
        data: snapshot.data,
        error: snapshot.error,
        loading,
        refetch,
    }
}

/// A disabled query (no key) is never loading.
pub fn is_loading(key: Option<&QueryKey>, status: QueryStatus) -> bool {
    key.is_some() && matches!(status, QueryStatus::Loading | QueryStatus::Idle)
}

/// Ids that are missing or not positive disable the query.
pub fn positive(id: Option<i64>) -> Option<i64> {
    id.filter(|id| *id > 0)
}

pub fn entity_key(id: Option<i64>, key: impl FnOnce(i64) -> QueryKey) -> Option<QueryKey> {
    positive(id).map(key)
}

pub fn video_key(video_id: Option<i64>) -> Option<QueryKey> {
    entity_key(video_id, keys::video)
}

pub fn interactions_key(video_id: Option<i64>, authenticated: bool) -> Option<QueryKey> {
    entity_key(video_id, keys::video_interactions).filter(|_| authenticated)
}

pub fn signed_in_key(authenticated: bool, key: impl FnOnce() -> QueryKey) -> Option<QueryKey> {
    authenticated.then(key)
}

#[hook]
pub fn use_auth_config() -> QueryHandle<AuthConfig> {
    use_query(Some(keys::auth_config()), |api: ApiClient| async move {
        call_get_auth_config(&api).await
    })
}

#[hook]
pub fn use_current_user() -> QueryHandle<Option<AuthUser>> {
    use_query(Some(keys::current_user()), |api: ApiClient| async move {
        call_get_current_user(&api).await
    })
}

#[hook]
pub fn use_videos(query: VideoListQuery) -> QueryHandle<PaginatedResult<Video>> {
    let key = keys::videos(&query);
    use_query(Some(key), move |api: ApiClient| {
        let query = query.clone();
        async move { call_get_videos(&api, &query).await }
    })
}

#[hook]
pub fn use_video(video_id: Option<i64>) -> QueryHandle<VideoDetail> {
    let key = video_key(video_id);
    let video_id = positive(video_id).unwrap_or_default();
    use_query(key, move |api: ApiClient| async move {
        call_get_video(&api, video_id).await
    })
}

#[hook]
pub fn use_recommended_videos() -> QueryHandle<Vec<Video>> {
    use_query(Some(keys::recommended()), |api: ApiClient| async move {
        call_get_recommended_videos(&api).await
    })
}

#[hook]
pub fn use_banner_videos() -> QueryHandle<Vec<Video>> {
    use_query(Some(keys::banner()), |api: ApiClient| async move {
        call_get_banner_videos(&api).await
    })
}

#[hook]
pub fn use_latest_videos(page: u32, page_size: u32) -> QueryHandle<PaginatedResult<Video>> {
    use_query(
        Some(keys::latest(page, page_size)),
        move |api: ApiClient| async move { call_get_latest_videos(&api, page, page_size).await },
    )
}

/// Disabled until both the id is known and the viewer is signed in.
#[hook]
pub fn use_video_interactions(
    video_id: Option<i64>,
    authenticated: bool,
) -> QueryHandle<VideoInteractionState> {
    let key = interactions_key(video_id, authenticated);
    let video_id = positive(video_id).unwrap_or_default();
    use_query(key, move |api: ApiClient| async move {
        call_get_video_interactions(&api, video_id).await
    })
}

#[hook]
pub fn use_favorite_videos(
    page: u32,
    page_size: u32,
    authenticated: bool,
) -> QueryHandle<PaginatedResult<Video>> {
    let key = signed_in_key(authenticated, || keys::favorites(page, page_size));
    use_query(key, move |api: ApiClient| async move {
        call_get_favorite_videos(&api, page, page_size).await
    })
}

#[hook]
pub fn use_watch_history(
    page: u32,
    page_size: u32,
    authenticated: bool,
) -> QueryHandle<PaginatedResult<WatchHistoryItem>> {
    let key = signed_in_key(authenticated, || keys::history(page, page_size));
    use_query(key, move |api: ApiClient| async move {
        call_get_watch_history(&api, page, page_size).await
    })
}

#[hook]
pub fn use_actor(actor_id: Option<i64>) -> QueryHandle<Actor> {
    let key = entity_key(actor_id, keys::actor);
    let actor_id = positive(actor_id).unwrap_or_default();
    use_query(key, move |api: ApiClient| async move {
        call_get_actor(&api, actor_id).await
    })
}

#[hook]
pub fn use_actor_videos(
    actor_id: Option<i64>,
    page: u32,
    page_size: u32,
) -> QueryHandle<PaginatedResult<Video>> {
    let key = entity_key(actor_id, |id| keys::actor_videos(id, page, page_size));
    let actor_id = positive(actor_id);
    use_query(
        key,
        move |api: ApiClient| async move {
            call_get_actor_videos(&api, actor_id.unwrap_or_default(), page, page_size).await
        },
    )
}

#[hook]
pub fn use_creator(creator_id: Option<i64>) -> QueryHandle<Creator> {
    let key = entity_key(creator_id, keys::creator);
    let creator_id = positive(creator_id).unwrap_or_default();
    use_query(key, move |api: ApiClient| async move {
        call_get_creator(&api, creator_id).await
    })
}

#[hook]
pub fn use_creator_videos(
    creator_id: Option<i64>,
    page: u32,
    page_size: u32,
) -> QueryHandle<PaginatedResult<Video>> {
    let key = entity_key(creator_id, |id| keys::creator_videos(id, page, page_size));
    let creator_id = positive(creator_id);
    use_query(
        key,
        move |api: ApiClient| async move {
            call_get_creator_videos(&api, creator_id.unwrap_or_default(), page, page_size).await
        },
    )
}

#[hook]
pub fn use_tag(tag_id: Option<i64>) -> QueryHandle<Tag> {
    let key = entity_key(tag_id, keys::tag);
    let tag_id = positive(tag_id).unwrap_or_default();
    use_query(key, move |api: ApiClient| async move {
        call_get_tag(&api, tag_id).await
    })
}

#[hook]
pub fn use_tag_videos(
    tag_id: Option<i64>,
    page: u32,
    page_size: u32,
) -> QueryHandle<PaginatedResult<Video>> {
    let key = entity_key(tag_id, |id| keys::tag_videos(id, page, page_size));
    let tag_id = positive(tag_id);
    use_query(
        key,
        move |api: ApiClient| async move {
            call_get_tag_videos(&api, tag_id.unwrap_or_default(), page, page_size).await
        },
    )
}

/// Writes the favorite flag, then marks the video's interaction state and
/// every favorites page stale. Nothing is updated before the write succeeds.
pub async fn set_video_favorite(catalog: &Catalog, video_id: i64, favorite: bool) -> ApiResult<()> {
    call_set_video_favorite(&catalog.api, video_id, favorite).await?;
    catalog
        .cache
        .invalidate_key(&keys::video_interactions(video_id));
    catalog.cache.invalidate_resource(keys::FAVORITES);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWriteMode {
    /// Periodic progress pings: the cache is left alone.
    FireAndForget,
    Invalidate,
}

pub async fn upsert_video_history(
    catalog: &Catalog,
    video_id: i64,
    update: HistoryUpdate,
    mode: HistoryWriteMode,
) -> ApiResult<()> {
    call_upsert_video_history(&catalog.api, video_id, &update).await?;
    if mode == HistoryWriteMode::Invalidate {
        catalog
            .cache
            .invalidate_key(&keys::video_interactions(video_id));
        catalog.cache.invalidate_resource(keys::HISTORY);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub auth_config: AuthConfig,
    pub user: Option<AuthUser>,
    pub metadata: Option<CommonMetadata>,
}

/// Resolves config, user and metadata. Each part degrades on failure so the
/// app can still decide where to route.
pub async fn load_session(catalog: &Catalog) -> Session {
    let api = catalog.api.clone();

    let auth_config = {
        let api = api.clone();
        catalog
            .cache
            .query(keys::auth_config(), move || async move {
                call_get_auth_config(&api).await
            })
            .await
    };
    let user = {
        let api = api.clone();
        catalog
            .cache
            .query(keys::current_user(), move || async move {
                call_get_current_user(&api).await
            })
            .await
    };
    let metadata = catalog
        .cache
        .query(keys::metadata(), move || async move {
            call_get_metadata(&api).await
        })
        .await;

    Session {
        auth_config: auth_config
            .map(|config| (*config).clone())
            .unwrap_or_else(|e| {
                log::warn!("Failed to load auth config: {}", e);
                AuthConfig::default()
            }),
        user: match user {
            Ok(user) => (*user).clone(),
            Err(e) if e.is_unauthorized() => {
                log::debug!("No active session");
                None
            }
            Err(e) => {
                log::warn!("Failed to load current user: {}", e);
                None
            }
        },
        metadata: match metadata {
            Ok(metadata) => Some((*metadata).clone()),
            Err(e) => {
                log::warn!("Failed to load metadata: {}", e);
                None
            }
        },
    }
}

pub async fn logout(catalog: &Catalog) -> ApiResult<()> {
    call_logout(&catalog.api).await?;
    catalog.cache.invalidate_resource(keys::CURRENT_USER);
    Ok(())
}
