use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::components::context::AppState;
use crate::components::gen_components::LoadingAnimation;
use crate::components::hooks::{load_session, logout, use_catalog};
use crate::components::routes::Route;
use crate::requests::http::{BrowserNavigator, Navigator};

/// Whether the current page must bounce an anonymous viewer to the login
/// page.
pub fn needs_login_redirect(route: &Route, state: &AppState) -> bool {
    state.session_checked
        && !state.is_authenticated()
        && !route.is_public()
        && (route.requires_auth() || state.requires_login())
}

#[derive(Properties, PartialEq)]
pub struct NavigationHandlerProps {
    pub children: Children,
}

#[function_component(NavigationHandler)]
pub fn navigation_handler(props: &NavigationHandlerProps) -> Html {
    let catalog = use_catalog();
    let (state, dispatch) = use_store::<AppState>();
    let route = use_route::<Route>().unwrap_or(Route::NotFound);
    let navigator = use_navigator();

    // Resolve the session once
    {
        let catalog = catalog.clone();
        let dispatch = dispatch.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let session = load_session(&catalog).await;
                log::info!(
                    "Session resolved: signed in = {}, login required = {}",
                    session.user.is_some(),
                    session.auth_config.require_login
                );
                dispatch.reduce_mut(move |state| {
                    state.auth_config = Some(session.auth_config);
                    state.auth_user = session.user;
                    state.metadata = session.metadata;
                    state.session_checked = true;
                });
            });
            || ()
        });
    }

    let must_sign_in = needs_login_redirect(&route, &state);
    use_effect_with(must_sign_in, move |must_sign_in| {
        if *must_sign_in {
            if let Some(navigator) = navigator {
                navigator.replace(&Route::Login);
            }
        }
        || ()
    });

    if !state.session_checked || must_sign_in {
        return html! { <LoadingAnimation /> };
    }

    html! {
        <>
            <NavBar />
            <main class="main-container p-4 max-w-7xl mx-auto">
                { props.children.clone() }
            </main>
        </>
    }
}

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let catalog = use_catalog();
    let (state, _dispatch) = use_store::<AppState>();
    let logging_out = use_state(|| false);

    let on_logout = {
        let catalog = catalog.clone();
        let logging_out = logging_out.clone();
        Callback::from(move |_: MouseEvent| {
            let catalog = catalog.clone();
            let logging_out = logging_out.clone();
            logging_out.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = logout(&catalog).await {
                    log::error!("Logout failed: {}", e);
                }
                // Full reload drops every cached read of the old session
                BrowserNavigator.redirect(&catalog.config().login_path);
            });
        })
    };

    html! {
        <nav class="nav-bar flex items-center gap-6 px-4 py-3 shadow">
            <Link<Route> to={Route::Home} classes="font-bold text-lg item_container-text">{"Catalog"}</Link<Route>>
            <Link<Route> to={Route::Videos} classes="item_container-text">{"Videos"}</Link<Route>>
            if state.is_authenticated() {
                <Link<Route> to={Route::MyPage} classes="item_container-text">{"My page"}</Link<Route>>
            }
            <div class="flex-grow"></div>
            if let Some(url) = state.admin_panel_url() {
                <a href={url.to_string()} class="item_container-text" target="_blank" rel="noopener noreferrer">
                    <i class="ph ph-gear mr-1" />{"Admin"}
                </a>
            }
            if let Some(user) = &state.auth_user {
                <span class="item_container-text opacity-80">{ user.label() }</span>
                <button class="item-container-button selector-button px-3 py-1 rounded" disabled={*logging_out} onclick={on_logout}>
                    {"Log out"}
                </button>
            } else {
                <Link<Route> to={Route::Login} classes="item_container-text">{"Log in"}</Link<Route>>
            }
        </nav>
    }
}
