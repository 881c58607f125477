use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::components::context::AppState;
use crate::components::gen_funcs::login_error_message;
use crate::components::hooks::use_catalog;
use crate::components::routes::Route;
use crate::requests::login_requests::oidc_login_url;

/// The `error` code the identity provider callback left in the query string.
fn login_error_code() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("error").filter(|code| !code.is_empty())
}

#[function_component(Login)]
pub fn login() -> Html {
    let catalog = use_catalog();
    let (state, _dispatch) = use_store::<AppState>();
    let navigator = use_navigator();
    let error_code = use_memo((), |_| {
        let code = login_error_code();
        if let Some(code) = &code {
            log::warn!("Sign-in returned error code {}", code);
        }
        code
    });

    let authenticated = state.is_authenticated();
    use_effect_with(authenticated, move |authenticated| {
        if *authenticated {
            if let Some(navigator) = navigator {
                navigator.replace(&Route::Home);
            }
        }
        || ()
    });

    html! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] p-8">
            <div class="item-container flex flex-col items-center text-center max-w-md space-y-6 p-8 rounded-lg shadow-md">
                <i class="ph ph-film-strip text-6xl item_container-text" />
                <h1 class="item_container-text text-2xl font-bold">{"Sign in"}</h1>
                if state.requires_login() {
                    <p class="item_container-text opacity-80">{"This catalog is only available to signed-in viewers."}</p>
                }
                if let Some(code) = error_code.as_deref() {
                    <div class="error-snackbar">{ login_error_message(code) }</div>
                }
                <a
                    href={oidc_login_url(&catalog.api)}
                    class="item-container-button selector-button flex items-center gap-2 px-6 py-3 rounded-lg text-lg font-medium"
                >
                    <i class="ph ph-sign-in text-xl" />
                    {"Sign in with SSO"}
                </a>
            </div>
        </div>
    }
}
