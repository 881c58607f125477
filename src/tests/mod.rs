// src/tests/mod.rs
mod common;
mod hooks_tests;
mod http_tests;

use crate::components::context::AppState;
use crate::components::navigation::needs_login_redirect;
use crate::components::routes::Route;
use crate::config::ApiConfig;
use crate::requests::login_requests::{AuthConfig, AuthUser, CommonMetadata, UserRole};
use yew_router::Routable;

fn user(role: UserRole) -> AuthUser {
    AuthUser {
        id: 1,
        username: "ada".to_string(),
        display_name: None,
        email: None,
        role,
    }
}

fn checked_state(require_login: bool, user: Option<AuthUser>) -> AppState {
    AppState {
        auth_config: Some(AuthConfig { require_login }),
        auth_user: user,
        metadata: None,
        session_checked: true,
    }
}

#[test]
fn test_basic_state() {
    let state = AppState::default();
    assert!(!state.session_checked);
    assert!(!state.is_authenticated());
    assert!(!state.requires_login());
}

// Test route variants
#[test]
fn test_route_variants() {
    assert_eq!(Route::recognize("/"), Some(Route::Home));
    assert_eq!(Route::recognize("/videos"), Some(Route::Videos));
    assert_eq!(Route::recognize("/videos/42"), Some(Route::VideoDetail { id: 42 }));
    assert_eq!(Route::recognize("/actors/3"), Some(Route::Actor { id: 3 }));
    assert_eq!(Route::recognize("/creators/4"), Some(Route::Creator { id: 4 }));
    assert_eq!(Route::recognize("/tags/5"), Some(Route::Tag { id: 5 }));
    assert_eq!(Route::recognize("/mypage"), Some(Route::MyPage));
    assert_eq!(Route::recognize("/login"), Some(Route::Login));
    assert_eq!(Route::VideoDetail { id: 7 }.to_path(), "/videos/7");
}

#[test]
fn test_open_catalog_only_guards_my_page() {
    let state = checked_state(false, None);
    assert!(!needs_login_redirect(&Route::Home, &state));
    assert!(!needs_login_redirect(&Route::VideoDetail { id: 1 }, &state));
    assert!(needs_login_redirect(&Route::MyPage, &state));
    assert!(!needs_login_redirect(&Route::Login, &state));
}

#[test]
fn test_closed_catalog_guards_everything_but_login() {
    let state = checked_state(true, None);
    assert!(needs_login_redirect(&Route::Home, &state));
    assert!(needs_login_redirect(&Route::Tag { id: 2 }, &state));
    assert!(!needs_login_redirect(&Route::Login, &state));
    assert!(!needs_login_redirect(&Route::NotFound, &state));
}

#[test]
fn test_no_redirect_before_session_resolves() {
    let state = AppState {
        session_checked: false,
        ..checked_state(true, None)
    };
    assert!(!needs_login_redirect(&Route::MyPage, &state));
}

#[test]
fn test_signed_in_viewer_is_never_redirected() {
    let state = checked_state(true, Some(user(UserRole::User)));
    assert!(!needs_login_redirect(&Route::MyPage, &state));
    assert!(!needs_login_redirect(&Route::Home, &state));
}

#[test]
fn test_admin_panel_link_is_admin_only() {
    let metadata = Some(CommonMetadata {
        admin_panel_url: Some("/admin".to_string()),
    });
    let admin = AppState {
        metadata: metadata.clone(),
        ..checked_state(false, Some(user(UserRole::Admin)))
    };
    let viewer = AppState {
        metadata,
        ..checked_state(false, Some(user(UserRole::User)))
    };
    assert_eq!(admin.admin_panel_url(), Some("/admin"));
    assert_eq!(viewer.admin_panel_url(), None);
}

#[test]
fn test_unknown_role_is_plain_user() {
    let parsed: AuthUser =
        serde_json::from_str(r#"{"id":2,"username":"bo","role":"moderator"}"#).unwrap();
    assert_eq!(parsed.role, UserRole::User);
    assert_eq!(parsed.label(), "bo");
}

#[test]
fn test_config_trims_trailing_slash() {
    let config = ApiConfig::new("/backend/");
    assert_eq!(config.common_prefix(), "/backend");
    assert_eq!(config.admin_prefix(), "/backend/admin");
    assert!(config.is_login_path("/login/"));
    assert!(!config.is_login_path("/"));
    assert_eq!(ApiConfig::default().api_base, "/api");
}
