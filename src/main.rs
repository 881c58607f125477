// Custom Mods
mod components;
mod config;
mod requests;

#[cfg(test)]
mod tests;

use components::context::Catalog;
use components::home::Home;
use components::login::Login;
use components::misc_func::init_logger;
use components::my_page::MyPage;
use components::navigation::NavigationHandler;
use components::person::{ActorPage, CreatorPage};
use components::routes::Route;
use components::tag::TagPage;
use components::video_detail::VideoDetailPage;
use components::videos::Videos;

// Yew Imports
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] p-8">
            <div class="flex flex-col items-center text-center max-w-md space-y-6">
                <div class="flex items-center gap-4 mb-4">
                    <i class="ph ph-warning-circle text-8xl item_container-text opacity-80" />
                    <span class="text-8xl font-bold item_container-text opacity-80">{"404"}</span>
                </div>

                <h1 class="text-3xl font-bold item_container-text">
                    {"Page Not Found"}
                </h1>

                <p class="text-lg item_container-text opacity-80">
                    {"That video may have been removed from the catalog."}
                </p>

                <Link<Route>
                    to={Route::Home}
                    classes="flex items-center gap-2 px-6 py-3 mt-4 rounded-lg transition-all
                        item_container-text border-2 border-current hover:opacity-80
                        active:scale-95 text-lg font-medium"
                >
                    <i class="ph ph-house-line text-xl" />
                    {"Head back home"}
                </Link<Route>>
            </div>
        </div>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Videos => html! { <Videos /> },
        Route::VideoDetail { id } => html! { <VideoDetailPage key={id} {id} /> },
        Route::Actor { id } => html! { <ActorPage {id} /> },
        Route::Creator { id } => html! { <CreatorPage {id} /> },
        Route::Tag { id } => html! { <TagPage {id} /> },
        Route::MyPage => html! { <MyPage /> },
        Route::Login => html! { <Login /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(Main)]
fn main_component() -> Html {
    let catalog = use_memo((), |_| Catalog::browser());

    html! {
        <ContextProvider<Catalog> context={(*catalog).clone()}>
            <BrowserRouter>
                <NavigationHandler>
                    <Switch<Route> render={switch} />
                </NavigationHandler>
            </BrowserRouter>
        </ContextProvider<Catalog>>
    }
}

fn main() {
    init_logger();
    log::info!("Starting catalog web client");
    yew::Renderer::<Main>::new().render();
}
