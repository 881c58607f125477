use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::components::context::AppState;
use crate::components::gen_components::{
    EmptyMessage, ErrorMessage, LoadingAnimation, PagedVideos, PagedVideosProps, Pagination,
};
use crate::components::gen_funcs::{format_duration, format_played_at, progress_percent};
use crate::components::hooks::{use_catalog, use_favorite_videos, use_watch_history};
use crate::components::routes::Route;
use crate::requests::file_reqs::thumbnail_url;
use crate::requests::video_reqs::WatchHistoryItem;

pub const LIST_PAGE_SIZE: u32 = 20;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MyPageTab {
    Favorites,
    History,
}

#[function_component(MyPage)]
pub fn my_page() -> Html {
    let (state, _dispatch) = use_store::<AppState>();
    let authenticated = state.is_authenticated();
    let tab = use_state(|| MyPageTab::Favorites);
    let favorites_page = use_state(|| 1u32);
    let history_page = use_state(|| 1u32);

    // Both lists stay mounted so switching tabs reads from the cache
    let favorites = use_favorite_videos(*favorites_page, LIST_PAGE_SIZE, authenticated);
    let history = use_watch_history(*history_page, LIST_PAGE_SIZE, authenticated);

    let select_tab = |target: MyPageTab| {
        let tab = tab.clone();
        Callback::from(move |_: MouseEvent| tab.set(target))
    };
    let on_favorites_page = {
        let favorites_page = favorites_page.clone();
        Callback::from(move |page: u32| favorites_page.set(page))
    };
    let on_history_page = {
        let history_page = history_page.clone();
        Callback::from(move |page: u32| history_page.set(page))
    };

    let tab_class = |target: MyPageTab| {
        if *tab == target {
            "selector-button active px-4 py-2 rounded-t"
        } else {
            "selector-button px-4 py-2 rounded-t opacity-70"
        }
    };

    html! {
        <div class="my-page">
            if let Some(user) = &state.auth_user {
                <h1 class="item_container-text text-2xl font-bold mb-4">{ user.label() }</h1>
            }
            <div class="flex gap-2 border-b mb-6">
                <button class={tab_class(MyPageTab::Favorites)} onclick={select_tab(MyPageTab::Favorites)}>
                    <i class="ph ph-heart-straight mr-1" />{"Favorites"}
                </button>
                <button class={tab_class(MyPageTab::History)} onclick={select_tab(MyPageTab::History)}>
                    <i class="ph ph-clock-counter-clockwise mr-1" />{"History"}
                </button>
            </div>
            {
                match *tab {
                    MyPageTab::Favorites => html! {
                        <PagedVideos ..PagedVideosProps::from_handle(&favorites, *favorites_page, on_favorites_page, "No favorites yet") />
                    },
                    MyPageTab::History => html! {
                        <>
                            if let Some(result) = &history.data {
                                if result.items.is_empty() {
                                    <EmptyMessage title="Nothing watched yet" />
                                } else {
                                    <ul class="space-y-3">
                                        { for result.items.iter().map(|item| html! {
                                            <HistoryRow key={item.video.id} item={item.clone()} />
                                        }) }
                                    </ul>
                                }
                                <Pagination page={*history_page} total_pages={result.total_pages()} on_change={on_history_page} />
                            } else if history.loading {
                                <LoadingAnimation />
                            }
                            <ErrorMessage error={history.error.clone()} on_retry={Some(history.refetch.clone())} />
                        </>
                    },
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct HistoryRowProps {
    pub item: WatchHistoryItem,
}

#[function_component(HistoryRow)]
pub fn history_row(props: &HistoryRowProps) -> Html {
    let catalog = use_catalog();
    let item = &props.item;
    let thumbnail = thumbnail_url(catalog.config(), item.video.thumbnail_key.as_deref());
    let duration = item.duration_seconds.or(item.video.duration_seconds);
    let percent = if item.completed {
        Some(100)
    } else {
        progress_percent(item.progress_seconds, duration)
    };

    html! {
        <li class="item-container flex gap-4 p-2 rounded-lg">
            <Link<Route> to={Route::VideoDetail { id: item.video.id }} classes="w-40 flex-shrink-0">
                <div class="relative aspect-video bg-gray-800 rounded overflow-hidden">
                    if let Some(src) = thumbnail {
                        <img {src} alt={item.video.title.clone()} class="w-full h-full object-cover" loading="lazy" />
                    }
                    if let Some(percent) = percent {
                        <div class="absolute bottom-0 left-0 h-1 bg-red-600" style={format!("width: {}%", percent)}></div>
                    }
                </div>
            </Link<Route>>
            <div class="flex-grow min-w-0">
                <Link<Route> to={Route::VideoDetail { id: item.video.id }} classes="item_container-text font-semibold truncate block">
                    { &item.video.title }
                </Link<Route>>
                <p class="item_container-text text-sm opacity-70">
                    if item.completed {
                        {"Watched"}
                    } else {
                        { format_duration(item.progress_seconds) }
                        if let Some(duration) = duration {
                            { format!(" / {}", format_duration(duration)) }
                        }
                    }
                </p>
                if let Some(played_at) = &item.last_played_at {
                    <p class="item_container-text text-xs opacity-60">{ format_played_at(played_at) }</p>
                }
            </div>
        </li>
    }
}
