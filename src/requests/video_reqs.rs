use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::requests::error::ApiResult;
use crate::requests::http::{ApiClient, PaginatedResult, QueryParams, Scope};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub thumbnail_key: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub play_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActorSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub avatar_key: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatorSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub avatar_key: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistributorSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub tag_type_name: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_key: Option<String>,
    /// Playback URL resolved by the backend.
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub play_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub actors: Option<Vec<ActorSummary>>,
    #[serde(default)]
    pub creators: Option<Vec<CreatorSummary>>,
    #[serde(default)]
    pub distributors: Option<Vec<DistributorSummary>>,
    #[serde(default)]
    pub tags: Option<Vec<TagSummary>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoHistoryState {
    pub progress_seconds: f64,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub last_played_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VideoInteractionState {
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub history: Option<VideoHistoryState>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryItem {
    pub video: Video,
    pub progress_seconds: f64,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub last_played_at: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub favorite: bool,
}

/// Body of a watch-progress write.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryUpdate {
    pub progress_seconds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl HistoryUpdate {
    pub fn progress(progress_seconds: u32, duration_seconds: Option<u32>) -> Self {
        Self {
            progress_seconds,
            duration_seconds,
            completed: None,
        }
    }

    pub fn completed(duration_seconds: Option<u32>) -> Self {
        Self {
            progress_seconds: 0,
            duration_seconds,
            completed: Some(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    #[default]
    CreatedAt,
    Title,
    PlayCount,
    Duration,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [
        SortBy::CreatedAt,
        SortBy::Title,
        SortBy::PlayCount,
        SortBy::Duration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::CreatedAt => "createdAt",
            SortBy::Title => "title",
            SortBy::PlayCount => "playCount",
            SortBy::Duration => "duration",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::CreatedAt => "Newest",
            SortBy::Title => "Title",
            SortBy::PlayCount => "Most played",
            SortBy::Duration => "Length",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoListQuery {
    pub page: u32,
    pub page_size: u32,
    pub q: Option<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl VideoListQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            q: None,
            sort_by: None,
            sort_order: None,
        }
    }

    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .push("page", self.page)
            .push("pageSize", self.page_size)
            .push_opt("q", self.q.as_deref().map(str::trim))
            .push_opt("sortBy", self.sort_by.map(|s| s.as_str()))
            .push_opt("sortOrder", self.sort_order.map(|o| o.as_str()))
    }
}

pub(crate) fn page_params(page: u32, page_size: u32) -> QueryParams {
    QueryParams::new()
        .push("page", page)
        .push("pageSize", page_size)
}

pub async fn call_get_videos(
    client: &ApiClient,
    query: &VideoListQuery,
) -> ApiResult<PaginatedResult<Video>> {
    client.get("/videos", &query.to_params(), Scope::Common).await
}

pub async fn call_get_video(client: &ApiClient, video_id: i64) -> ApiResult<VideoDetail> {
    client
        .get(&format!("/videos/{}", video_id), &QueryParams::new(), Scope::Common)
        .await
}

pub async fn call_get_recommended_videos(client: &ApiClient) -> ApiResult<Vec<Video>> {
    client
        .get("/videos/recommended", &QueryParams::new(), Scope::Common)
        .await
}

pub async fn call_get_banner_videos(client: &ApiClient) -> ApiResult<Vec<Video>> {
    client
        .get("/videos/banner", &QueryParams::new(), Scope::Common)
        .await
}

pub async fn call_get_latest_videos(
    client: &ApiClient,
    page: u32,
    page_size: u32,
) -> ApiResult<PaginatedResult<Video>> {
    client
        .get("/videos/latest", &page_params(page, page_size), Scope::Common)
        .await
}

pub async fn call_get_video_interactions(
    client: &ApiClient,
    video_id: i64,
) -> ApiResult<VideoInteractionState> {
    client
        .get(
            &format!("/videos/{}/interactions", video_id),
            &QueryParams::new(),
            Scope::Common,
        )
        .await
}

pub async fn call_set_video_favorite(
    client: &ApiClient,
    video_id: i64,
    favorite: bool,
) -> ApiResult<()> {
    client
        .post::<IgnoredAny, _>(
            &format!("/videos/{}/favorite", video_id),
            Some(&FavoriteRequest { favorite }),
            Scope::Common,
        )
        .await
        .map(|_| ())
}

pub async fn call_upsert_video_history(
    client: &ApiClient,
    video_id: i64,
    update: &HistoryUpdate,
) -> ApiResult<()> {
    client
        .post::<IgnoredAny, _>(
            &format!("/videos/{}/history", video_id),
            Some(update),
            Scope::Common,
        )
        .await
        .map(|_| ())
}

pub async fn call_get_favorite_videos(
    client: &ApiClient,
    page: u32,
    page_size: u32,
) -> ApiResult<PaginatedResult<Video>> {
    client
        .get("/videos/favorites", &page_params(page, page_size), Scope::Common)
        .await
}

pub async fn call_get_watch_history(
    client: &ApiClient,
    page: u32,
    page_size: u32,
) -> ApiResult<PaginatedResult<WatchHistoryItem>> {
    client
        .get("/videos/history", &page_params(page, page_size), Scope::Common)
        .await
}
