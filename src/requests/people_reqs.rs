use serde::{Deserialize, Serialize};

use crate::requests::error::ApiResult;
use crate::requests::http::{ApiClient, PaginatedResult, QueryParams, Scope};
use crate::requests::video_reqs::{page_params, ActorSummary, CreatorSummary, Video};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub name_reading: Option<String>,
    #[serde(default)]
    pub avatar_key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// The creator account this actor also publishes under, if any.
    #[serde(default)]
    pub creator: Option<CreatorSummary>,
    #[serde(default)]
    pub video_count: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub avatar_key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub actor: Option<ActorSummary>,
    #[serde(default)]
    pub video_count: Option<u64>,
}

pub async fn call_get_actor(client: &ApiClient, actor_id: i64) -> ApiResult<Actor> {
    client
        .get(&format!("/actors/{}", actor_id), &QueryParams::new(), Scope::Admin)
        .await
}

pub async fn call_get_actor_videos(
    client: &ApiClient,
    actor_id: i64,
    page: u32,
    page_size: u32,
) -> ApiResult<PaginatedResult<Video>> {
    client
        .get(
            &format!("/actors/{}/videos", actor_id),
            &page_params(page, page_size),
            Scope::Admin,
        )
        .await
}

pub async fn call_get_creator(client: &ApiClient, creator_id: i64) -> ApiResult<Creator> {
    client
        .get(
            &format!("/creators/{}", creator_id),
            &QueryParams::new(),
            Scope::Admin,
        )
        .await
}

pub async fn call_get_creator_videos(
    client: &ApiClient,
    creator_id: i64,
    page: u32,
    page_size: u32,
) -> ApiResult<PaginatedResult<Video>> {
    client
        .get(
            &format!("/creators/{}/videos", creator_id),
            &page_params(page, page_size),
            Scope::Admin,
        )
        .await
}
