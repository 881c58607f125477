use futures::executor::block_on;
use serde_json::{json, Value};

use super::common::*;
use crate::config::ApiConfig;
use crate::requests::error::ApiError;
use crate::requests::file_reqs::{avatar_url, file_url, thumbnail_url, FileKind};
use crate::requests::http::{resolve_error_message, Method, QueryParams, Scope};
use crate::requests::login_requests::{
    call_get_auth_config, call_get_current_user, call_logout, oidc_login_url,
};
use crate::requests::people_reqs::{call_get_actor, call_get_actor_videos};
use crate::requests::video_reqs::{
    call_get_videos, call_set_video_favorite, call_upsert_video_history, HistoryUpdate, SortBy,
    SortOrder, VideoListQuery,
};

#[test]
fn test_envelope_is_unwrapped() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    transport.respond(envelope(json!({ "requireLogin": true })));

    let config = block_on(call_get_auth_config(&client)).unwrap();
    assert!(config.require_login);
    assert_eq!(transport.last_url().as_deref(), Some("/api/auth/config"));
}

#[test]
fn test_plain_body_passes_through() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    transport.respond(json_response(200, json!({ "requireLogin": false })));

    let config = block_on(call_get_auth_config(&client)).unwrap();
    assert!(!config.require_login);
}

#[test]
fn test_envelope_without_success_is_left_alone() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    let body = json!({ "success": false, "data": 1 });
    transport.respond(json_response(200, body.clone()));

    let value: Value = block_on(client.get("/raw", &QueryParams::new(), Scope::Common)).unwrap();
    assert_eq!(value, body);
}

#[test]
fn test_empty_body_decodes_as_absent() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    transport.respond(response(200, "OK", ""));

    let user = block_on(call_get_current_user(&client)).unwrap();
    assert!(user.is_none());
}

#[test]
fn test_error_message_resolution_order() {
    let nested = json!({ "error": { "message": "nested" }, "message": "top" });
    assert_eq!(resolve_error_message(Some(&nested), 400, "Bad Request"), "nested");

    let top = json!({ "message": "top" });
    assert_eq!(resolve_error_message(Some(&top), 400, "Bad Request"), "top");

    let neither = json!({ "detail": "ignored" });
    assert_eq!(
        resolve_error_message(Some(&neither), 400, "Bad Request"),
        "Bad Request"
    );

    assert_eq!(resolve_error_message(None, 502, ""), "Request failed 502");
}

#[test]
fn test_empty_messages_are_skipped() {
    let body = json!({ "error": { "message": "" }, "message": "" });
    assert_eq!(resolve_error_message(Some(&body), 500, "Server Error"), "Server Error");
}

#[test]
fn test_http_error_carries_status_and_body() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/videos"));
    let body = json!({ "error": { "message": "Actor not found" } });
    transport.respond(json_response(404, body.clone()));

    let err = block_on(call_get_actor(&client, 9)).unwrap_err();
    assert_eq!(err, ApiError::http(404, "Actor not found", Some(body)));
    assert_eq!(err.to_string(), "Actor not found");
    assert_eq!(err.status(), Some(404));
}

#[test]
fn test_unauthorized_redirects_to_login() {
    let transport = MockTransport::new();
    let navigator = MockNavigator::at("/videos/3");
    let client = test_client(&transport, &navigator);
    transport.respond(json_response(401, json!({ "message": "Unauthorized" })));

    let err = block_on(call_get_current_user(&client)).unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(navigator.redirects(), vec!["/login".to_string()]);
}

#[test]
fn test_unauthorized_on_login_page_does_not_redirect() {
    for path in ["/login", "/login/"] {
        let transport = MockTransport::new();
        let navigator = MockNavigator::at(path);
        let client = test_client(&transport, &navigator);
        transport.respond(response(401, "Unauthorized", ""));

        let err = block_on(call_get_current_user(&client)).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
        assert!(navigator.redirects().is_empty(), "redirected from {}", path);
    }
}

#[test]
fn test_empty_query_values_are_dropped() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    transport.respond(envelope(page_json(vec![], 1, 12, 0)));

    let query = VideoListQuery {
        q: Some("   ".to_string()),
        ..VideoListQuery::new(1, 12)
    };
    let page = block_on(call_get_videos(&client, &query)).unwrap();
    assert!(page.items.is_empty());
    assert_eq!(
        transport.last_url().as_deref(),
        Some("/api/videos?page=1&pageSize=12")
    );
}

#[test]
fn test_query_params_are_encoded() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    transport.respond(envelope(page_json(vec![video_json(1, "Cats")], 2, 12, 13)));

    let query = VideoListQuery {
        q: Some(" cats & dogs ".to_string()),
        sort_by: Some(SortBy::PlayCount),
        sort_order: Some(SortOrder::Asc),
        ..VideoListQuery::new(2, 12)
    };
    let page = block_on(call_get_videos(&client, &query)).unwrap();
    assert_eq!(page.total_pages(), 2);
    assert_eq!(page.items[0].title, "Cats");
    assert_eq!(
        transport.last_url().as_deref(),
        Some("/api/videos?page=2&pageSize=12&q=cats+%26+dogs&sortBy=playCount&sortOrder=asc")
    );
}

#[test]
fn test_push_skips_empty_values() {
    let params = QueryParams::new()
        .push("page", 1)
        .push("q", "")
        .push_opt::<&str>("sortBy", None);
    assert_eq!(params.to_query_string(), "page=1");
}

#[test]
fn test_admin_scope_prefix() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    transport.respond(envelope(page_json(vec![], 3, 12, 0)));

    block_on(call_get_actor_videos(&client, 5, 3, 12)).unwrap();
    assert_eq!(
        transport.last_url().as_deref(),
        Some("/api/admin/actors/5/videos?page=3&pageSize=12")
    );
}

#[test]
fn test_decode_mismatch_is_serialization_error() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    transport.respond(envelope(json!({ "id": "not-a-number", "name": "x" })));

    let err = block_on(call_get_actor(&client, 1)).unwrap_err();
    assert!(matches!(err, ApiError::Serialization(_)), "got {:?}", err);
}

#[test]
fn test_network_failure_propagates() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    transport.fail(ApiError::Network("offline".to_string()));

    let err = block_on(call_get_auth_config(&client)).unwrap_err();
    assert_eq!(err, ApiError::Network("offline".to_string()));
}

#[test]
fn test_writes_post_json_bodies() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    transport.respond(json_response(200, json!({ "success": true })));
    transport.respond(response(204, "No Content", ""));

    block_on(call_set_video_favorite(&client, 7, true)).unwrap();
    block_on(call_upsert_video_history(&client, 7, &HistoryUpdate::progress(42, Some(600)))).unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "/api/videos/7/favorite");
    assert_eq!(requests[0].body.as_deref(), Some(r#"{"favorite":true}"#));
    assert_eq!(requests[1].url, "/api/videos/7/history");
    assert_eq!(
        requests[1].body.as_deref(),
        Some(r#"{"progressSeconds":42,"durationSeconds":600}"#)
    );
}

#[test]
fn test_completion_body() {
    let body = serde_json::to_value(HistoryUpdate::completed(None)).unwrap();
    assert_eq!(body, json!({ "progressSeconds": 0, "completed": true }));
}

#[test]
fn test_logout_posts_without_body() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    transport.respond(json_response(200, json!({ "success": true })));

    block_on(call_logout(&client)).unwrap();
    let requests = transport.requests();
    assert_eq!(requests[0].url, "/api/auth/logout");
    assert!(requests[0].body.is_none());
}

#[test]
fn test_oidc_login_url() {
    let transport = MockTransport::new();
    let client = test_client(&transport, &MockNavigator::at("/"));
    assert_eq!(
        oidc_login_url(&client),
        "/api/auth/oidc/authorize?return_to=app"
    );
    assert_eq!(transport.calls(), 0);
}

#[test]
fn test_file_urls() {
    let config = ApiConfig::new("https://catalog.example/api/");
    assert_eq!(
        thumbnail_url(&config, Some("2024/cover one.jpg")).as_deref(),
        Some("https://catalog.example/api/admin/file/thumbnails/2024/cover one.jpg")
    );
    assert_eq!(
        avatar_url(&config, Some("a.png")).as_deref(),
        Some("https://catalog.example/api/admin/file/avatars/a.png")
    );
    assert_eq!(
        file_url(&config, FileKind::Misc, "banner.png"),
        "https://catalog.example/api/admin/file/misc/banner.png"
    );
    assert!(thumbnail_url(&config, Some("")).is_none());
    assert!(avatar_url(&config, None).is_none());
}
