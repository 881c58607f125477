use futures::executor::block_on;
use serde_json::json;

use super::common::*;
use crate::components::context::Catalog;
use crate::components::hooks::{
    entity_key, interactions_key, is_loading, load_session, logout, set_video_favorite,
    signed_in_key, upsert_video_history, video_key, HistoryWriteMode,
};
use crate::components::query::{keys, QueryStatus};
use crate::requests::error::ApiError;
use crate::requests::http::PaginatedResult;
use crate::requests::login_requests::{call_get_current_user, AuthUser};
use crate::requests::video_reqs::{
    call_get_favorite_videos, call_get_video_interactions, HistoryUpdate, Video,
    VideoInteractionState,
};

fn read_interactions(catalog: &Catalog, video_id: i64) -> VideoInteractionState {
    let api = catalog.api.clone();
    let state = block_on(catalog.cache.query(keys::video_interactions(video_id), move || async move {
        call_get_video_interactions(&api, video_id).await
    }))
    .unwrap();
    (*state).clone()
}

fn read_favorites(catalog: &Catalog, page: u32) -> PaginatedResult<Video> {
    let api = catalog.api.clone();
    let result = block_on(catalog.cache.query(keys::favorites(page, 20), move || async move {
        call_get_favorite_videos(&api, page, 20).await
    }))
    .unwrap();
    (*result).clone()
}

#[test]
fn test_favorite_write_refreshes_interactions() {
    let transport = MockTransport::new();
    let catalog = test_catalog(&transport);
    transport.respond(envelope(json!({ "isFavorite": false })));
    transport.respond(json_response(200, json!({ "success": true })));
    transport.respond(envelope(json!({ "isFavorite": true })));

    assert!(!read_interactions(&catalog, 11).is_favorite);
    block_on(set_video_favorite(&catalog, 11, true)).unwrap();
    assert!(read_interactions(&catalog, 11).is_favorite);

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "/api/videos/11/interactions",
            "/api/videos/11/favorite",
            "/api/videos/11/interactions",
        ]
    );
}

#[test]
fn test_favorite_write_marks_favorites_stale() {
    let transport = MockTransport::new();
    let catalog = test_catalog(&transport);
    transport.respond(envelope(page_json(vec![], 1, 20, 0)));
    transport.respond(envelope(page_json(vec![], 2, 20, 0)));
    transport.respond(json_response(200, json!({ "success": true })));
    transport.respond(envelope(page_json(vec![video_json(11, "Liked")], 1, 20, 1)));

    read_favorites(&catalog, 1);
    read_favorites(&catalog, 2);
    block_on(set_video_favorite(&catalog, 11, true)).unwrap();

    assert!(catalog.cache.needs_fetch(&keys::favorites(1, 20)));
    assert!(catalog.cache.needs_fetch(&keys::favorites(2, 20)));
    assert_eq!(read_favorites(&catalog, 1).items[0].title, "Liked");
}

#[test]
fn test_failed_favorite_write_changes_nothing() {
    let transport = MockTransport::new();
    let catalog = test_catalog(&transport);
    transport.respond(envelope(json!({ "isFavorite": false })));
    transport.respond(json_response(500, json!({ "message": "Could not save" })));

    read_interactions(&catalog, 12);
    let err = block_on(set_video_favorite(&catalog, 12, true)).unwrap_err();
    assert_eq!(err.to_string(), "Could not save");

    assert!(!catalog.cache.needs_fetch(&keys::video_interactions(12)));
    assert!(!read_interactions(&catalog, 12).is_favorite);
    assert_eq!(transport.calls(), 2);
}

#[test]
fn test_progress_pings_leave_cache_alone() {
    let transport = MockTransport::new();
    let catalog = test_catalog(&transport);
    transport.respond(envelope(json!({ "isFavorite": false })));
    transport.respond(response(204, "No Content", ""));

    read_interactions(&catalog, 13);
    block_on(upsert_video_history(
        &catalog,
        13,
        HistoryUpdate::progress(30, Some(600)),
        HistoryWriteMode::FireAndForget,
    ))
    .unwrap();

    assert!(!catalog.cache.needs_fetch(&keys::video_interactions(13)));
}

#[test]
fn test_completion_invalidates_history() {
    let transport = MockTransport::new();
    let catalog = test_catalog(&transport);
    transport.respond(envelope(json!({ "isFavorite": false })));
    transport.respond(envelope(page_json(vec![], 1, 20, 0)));
    transport.respond(response(204, "No Content", ""));

    read_interactions(&catalog, 14);
    {
        let api = catalog.api.clone();
        block_on(catalog.cache.query(keys::history(1, 20), move || async move {
            crate::requests::video_reqs::call_get_watch_history(&api, 1, 20).await
        }))
        .unwrap();
    }
    block_on(upsert_video_history(
        &catalog,
        14,
        HistoryUpdate::completed(Some(600)),
        HistoryWriteMode::Invalidate,
    ))
    .unwrap();

    assert!(catalog.cache.needs_fetch(&keys::video_interactions(14)));
    assert!(catalog.cache.needs_fetch(&keys::history(1, 20)));
}

#[test]
fn test_session_degrades_per_part() {
    let transport = MockTransport::new();
    let catalog = test_catalog(&transport);
    transport.respond(envelope(json!({ "requireLogin": true })));
    transport.fail(ApiError::Network("offline".to_string()));
    transport.respond(envelope(json!({ "adminPanelUrl": "/admin" })));

    let session = block_on(load_session(&catalog));
    assert!(session.auth_config.require_login);
    assert!(session.user.is_none());
    assert_eq!(
        session.metadata.and_then(|m| m.admin_panel_url).as_deref(),
        Some("/admin")
    );
}

#[test]
fn test_logout_forgets_current_user() {
    let transport = MockTransport::new();
    let catalog = test_catalog(&transport);
    transport.respond(envelope(json!({ "id": 1, "username": "ada", "role": "admin" })));
    transport.respond(json_response(200, json!({ "success": true })));

    let api = catalog.api.clone();
    let user = block_on(catalog.cache.query(keys::current_user(), move || async move {
        call_get_current_user(&api).await
    }))
    .unwrap();
    let user: &Option<AuthUser> = &user;
    assert!(user.as_ref().is_some_and(AuthUser::is_admin));

    block_on(logout(&catalog)).unwrap();
    assert!(catalog.cache.needs_fetch(&keys::current_user()));
}

#[test]
fn test_missing_or_non_positive_ids_disable_queries() {
    for id in [None, Some(0), Some(-1)] {
        assert_eq!(video_key(id), None, "id {:?}", id);
        assert_eq!(interactions_key(id, true), None, "id {:?}", id);
        assert_eq!(entity_key(id, keys::actor), None, "id {:?}", id);
    }
    assert_eq!(video_key(Some(3)), Some(keys::video(3)));
    assert_eq!(
        entity_key(Some(4), |id| keys::tag_videos(id, 2, 12)),
        Some(keys::tag_videos(4, 2, 12))
    );
}

#[test]
fn test_signed_out_viewer_disables_personal_queries() {
    assert_eq!(interactions_key(Some(3), false), None);
    assert_eq!(interactions_key(Some(3), true), Some(keys::video_interactions(3)));
    assert_eq!(signed_in_key(false, || keys::favorites(1, 20)), None);
    assert_eq!(
        signed_in_key(true, || keys::history(1, 20)),
        Some(keys::history(1, 20))
    );
}

#[test]
fn test_disabled_query_is_not_loading() {
    assert!(!is_loading(None, QueryStatus::Idle));
    assert!(!is_loading(None, QueryStatus::Loading));
    let key = keys::video(1);
    assert!(is_loading(Some(&key), QueryStatus::Idle));
    assert!(is_loading(Some(&key), QueryStatus::Loading));
    assert!(!is_loading(Some(&key), QueryStatus::Error));
    assert!(!is_loading(Some(&key), QueryStatus::Success));
}

#[test]
fn test_unauthorized_user_load_is_signed_out() {
    let transport = MockTransport::new();
    let catalog = test_catalog(&transport);
    transport.respond(envelope(json!({ "requireLogin": false })));
    transport.respond(json_response(401, json!({ "message": "Unauthorized" })));
    transport.respond(envelope(json!({})));

    let session = block_on(load_session(&catalog));
    assert!(session.user.is_none());
    assert!(session.metadata.is_some());
}
