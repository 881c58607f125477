use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::gen_funcs::{format_duration, format_play_count};
use crate::components::hooks::{use_catalog, QueryHandle};
use crate::components::routes::Route;
use crate::requests::error::ApiError;
use crate::requests::file_reqs::{avatar_url, thumbnail_url};
use crate::requests::http::PaginatedResult;
use crate::requests::video_reqs::{ActorSummary, CreatorSummary, TagSummary, Video};

#[function_component(LoadingAnimation)]
pub fn loading_animation() -> Html {
    html! {
        <div class="loading-animation">
            <div class="frame1"></div>
            <div class="frame2"></div>
            <div class="frame3"></div>
            <div class="frame4"></div>
            <div class="frame5"></div>
            <div class="frame6"></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorMessageProps {
    pub error: Option<ApiError>,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

#[function_component(ErrorMessage)]
pub fn error_message(props: &ErrorMessageProps) -> Html {
    let Some(error) = props.error.as_ref() else {
        return html! {};
    };
    let retry = props.on_retry.clone().map(|on_retry| {
        let onclick = Callback::from(move |_: MouseEvent| on_retry.emit(()));
        html! {
            <button class="item-container-button ml-4 underline" {onclick}>{"Retry"}</button>
        }
    });
    html! {
        <div class="error-snackbar">
            { error.to_string() }
            { for retry }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyMessageProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub body: Option<AttrValue>,
}

#[function_component(EmptyMessage)]
pub fn empty_message(props: &EmptyMessageProps) -> Html {
    html! {
        <div class="empty-episodes-container">
            <h1>{ &props.title }</h1>
            if let Some(body) = &props.body {
                <p>{ body }</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub video: Video,
}

#[function_component(VideoCard)]
pub fn video_card(props: &VideoCardProps) -> Html {
    let catalog = use_catalog();
    let video = &props.video;
    let thumbnail = thumbnail_url(catalog.config(), video.thumbnail_key.as_deref());

    html! {
        <Link<Route> to={Route::VideoDetail { id: video.id }} classes="video-card item-container rounded-lg overflow-hidden shadow-md">
            <div class="relative aspect-video bg-gray-800">
                if let Some(src) = thumbnail {
                    <img {src} alt={video.title.clone()} class="w-full h-full object-cover" loading="lazy" />
                }
                if let Some(duration) = video.duration_seconds {
                    <span class="absolute bottom-1 right-1 px-1 text-xs rounded bg-black/70 text-white">
                        { format_duration(duration) }
                    </span>
                }
            </div>
            <div class="p-2">
                <p class="item_container-text font-semibold truncate">{ &video.title }</p>
                if let Some(count) = video.play_count {
                    <p class="item_container-text text-sm opacity-70">{ format_play_count(count) }</p>
                }
            </div>
        </Link<Route>>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoGridProps {
    pub videos: Vec<Video>,
    #[prop_or(AttrValue::from("No videos found"))]
    pub empty_title: AttrValue,
}

#[function_component(VideoGrid)]
pub fn video_grid(props: &VideoGridProps) -> Html {
    if props.videos.is_empty() {
        return html! { <EmptyMessage title={props.empty_title.clone()} /> };
    }
    html! {
        <div class="grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4">
            { for props.videos.iter().map(|video| html! {
                <VideoCard key={video.id} video={video.clone()} />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub page: u32,
    pub total_pages: u64,
    pub on_change: Callback<u32>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    if props.total_pages <= 1 {
        return html! {};
    }
    let page = props.page;
    let has_prev = page > 1;
    let has_next = u64::from(page) < props.total_pages;

    let on_prev = {
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| on_change.emit(page.saturating_sub(1).max(1)))
    };
    let on_next = {
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| on_change.emit(page + 1))
    };

    html! {
        <div class="pagination flex items-center justify-center gap-4 my-6">
            <button class="item-container-button selector-button px-3 py-1 rounded" disabled={!has_prev} onclick={on_prev}>
                {"Previous"}
            </button>
            <span class="item_container-text">{ format!("{} / {}", page, props.total_pages) }</span>
            <button class="item-container-button selector-button px-3 py-1 rounded" disabled={!has_next} onclick={on_next}>
                {"Next"}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PagedVideosProps {
    pub result: Option<Rc<PaginatedResult<Video>>>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub page: u32,
    pub on_page: Callback<u32>,
    pub on_retry: Callback<()>,
    #[prop_or(AttrValue::from("No videos yet"))]
    pub empty_title: AttrValue,
}

impl PagedVideosProps {
    pub fn from_handle(
        handle: &QueryHandle<PaginatedResult<Video>>,
        page: u32,
        on_page: Callback<u32>,
        empty_title: &'static str,
    ) -> Self {
        Self {
            result: handle.data.clone(),
            loading: handle.loading,
            error: handle.error.clone(),
            page,
            on_page,
            on_retry: handle.refetch.clone(),
            empty_title: AttrValue::from(empty_title),
        }
    }
}

/// One page of videos with pager, loading and error states.
#[function_component(PagedVideos)]
pub fn paged_videos(props: &PagedVideosProps) -> Html {
    html! {
        <>
            if let Some(result) = &props.result {
                <VideoGrid videos={result.items.clone()} empty_title={props.empty_title.clone()} />
                <Pagination page={props.page} total_pages={result.total_pages()} on_change={props.on_page.clone()} />
            } else if props.loading {
                <LoadingAnimation />
            }
            <ErrorMessage error={props.error.clone()} on_retry={Some(props.on_retry.clone())} />
        </>
    }
}

/// The three kinds of catalog entity a video links to.
#[derive(Clone, PartialEq, Debug)]
pub enum EntityPreview {
    Actor(ActorSummary),
    Creator(CreatorSummary),
    Tag(TagSummary),
}

impl EntityPreview {
    pub fn route(&self) -> Route {
        match self {
            EntityPreview::Actor(actor) => Route::Actor { id: actor.id },
            EntityPreview::Creator(creator) => Route::Creator { id: creator.id },
            EntityPreview::Tag(tag) => Route::Tag { id: tag.id },
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct EntityPreviewCardProps {
    pub entity: EntityPreview,
}

#[function_component(EntityPreviewCard)]
pub fn entity_preview_card(props: &EntityPreviewCardProps) -> Html {
    let catalog = use_catalog();
    let body = match &props.entity {
        EntityPreview::Actor(actor) => render_person(
            avatar_url(catalog.config(), actor.avatar_key.as_deref()),
            &actor.name,
            "ph-user",
        ),
        EntityPreview::Creator(creator) => render_person(
            avatar_url(catalog.config(), creator.avatar_key.as_deref()),
            &creator.name,
            "ph-video-camera",
        ),
        EntityPreview::Tag(tag) => html! {
            <span class="tag-chip px-2 py-1 rounded-full border text-sm">
                if let Some(kind) = &tag.tag_type_name {
                    <span class="opacity-60 mr-1">{ format!("{}:", kind) }</span>
                }
                { &tag.name }
            </span>
        },
    };
    html! {
        <Link<Route> to={props.entity.route()} classes="entity-preview inline-flex items-center">
            { body }
        </Link<Route>>
    }
}

fn render_person(avatar: Option<String>, name: &str, fallback_icon: &'static str) -> Html {
    html! {
        <span class="inline-flex items-center gap-2 mr-3">
            if let Some(src) = avatar {
                <img {src} alt={name.to_string()} class="w-8 h-8 rounded-full object-cover" />
            } else {
                <i class={classes!("ph", fallback_icon, "text-2xl")} />
            }
            <span class="item_container-text">{ name }</span>
        </span>
    }
}
