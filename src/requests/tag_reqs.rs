use serde::{Deserialize, Serialize};

use crate::requests::error::ApiResult;
use crate::requests::http::{ApiClient, PaginatedResult, QueryParams, Scope};
use crate::requests::video_reqs::{page_params, Video};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TagType {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tag_type: Option<TagType>,
    #[serde(default)]
    pub video_count: Option<u64>,
}

pub async fn call_get_tag(client: &ApiClient, tag_id: i64) -> ApiResult<Tag> {
    client
        .get(&format!("/tags/{}", tag_id), &QueryParams::new(), Scope::Admin)
        .await
}

pub async fn call_get_tag_videos(
    client: &ApiClient,
    tag_id: i64,
    page: u32,
    page_size: u32,
) -> ApiResult<PaginatedResult<Video>> {
    client
        .get(
            &format!("/tags/{}/videos", tag_id),
            &page_params(page, page_size),
            Scope::Admin,
        )
        .await
}
