use std::cell::RefCell;

use web_sys::HtmlMediaElement;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::components::context::AppState;
use crate::components::gen_components::{
    EntityPreview, EntityPreviewCard, ErrorMessage, LoadingAnimation,
};
use crate::components::gen_funcs::{
    format_duration, format_file_size, format_play_count, format_played_at,
};
use crate::components::hooks::{
    set_video_favorite, upsert_video_history, use_catalog, use_video, use_video_interactions,
    HistoryWriteMode,
};
use crate::components::playback::{resume_position, whole_seconds, ProgressThrottle};
use crate::requests::error::ApiError;
use crate::requests::file_reqs::thumbnail_url;
use crate::requests::video_reqs::{HistoryUpdate, VideoDetail};

#[derive(Properties, PartialEq)]
pub struct VideoDetailPageProps {
    pub id: i64,
}

#[function_component(VideoDetailPage)]
pub fn video_detail_page(props: &VideoDetailPageProps) -> Html {
    let (state, _dispatch) = use_store::<AppState>();
    let detail = use_video(Some(props.id));

    html! {
        <div class="video-detail">
            if let Some(video) = &detail.data {
                <VideoPlayer video={(**video).clone()} authenticated={state.is_authenticated()} />
                <VideoInfo video={(**video).clone()} />
            } else if detail.loading {
                <LoadingAnimation />
            }
            <ErrorMessage error={detail.error.clone()} on_retry={Some(detail.refetch.clone())} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoPlayerProps {
    pub video: VideoDetail,
    pub authenticated: bool,
}

#[function_component(VideoPlayer)]
pub fn video_player(props: &VideoPlayerProps) -> Html {
    let catalog = use_catalog();
    let video_id = props.video.id;
    let authenticated = props.authenticated;
    let interactions = use_video_interactions(Some(video_id), authenticated);
    let throttle = use_mut_ref(ProgressThrottle::new);
    let resumed = use_mut_ref(|| false);
    let video_ref = use_node_ref();
    let favorite_pending = use_state(|| false);
    let favorite_error = use_state(|| None::<ApiError>);

    {
        let throttle = throttle.clone();
        let resumed = resumed.clone();
        use_effect_with(video_id, move |_| {
            *throttle.borrow_mut() = ProgressThrottle::new();
            *resumed.borrow_mut() = false;
            || ()
        });
    }

    let report = {
        let catalog = catalog.clone();
        move |update: HistoryUpdate, mode: HistoryWriteMode| {
            let catalog = catalog.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = upsert_video_history(&catalog, video_id, update, mode).await {
                    log::warn!("Failed to report progress for video {}: {}", video_id, e);
                }
            });
        }
    };

    let on_time_update = {
        let throttle = throttle.clone();
        let report = report.clone();
        Callback::from(move |e: Event| {
            if !authenticated {
                return;
            }
            let Some(media) = e.target_dyn_into::<HtmlMediaElement>() else {
                return;
            };
            let Some(second) = whole_seconds(media.current_time()) else {
                return;
            };
            let duration = whole_seconds(media.duration());
            let update = throttle
                .borrow_mut()
                .on_time_update(second, duration, js_sys::Date::now());
            if let Some(update) = update {
                report(update, HistoryWriteMode::FireAndForget);
            }
        })
    };

    let on_ended = {
        let throttle = throttle.clone();
        Callback::from(move |e: Event| {
            if !authenticated {
                return;
            }
            let duration = e
                .target_dyn_into::<HtmlMediaElement>()
                .and_then(|media| whole_seconds(media.duration()));
            let update = throttle.borrow_mut().on_ended(duration, js_sys::Date::now());
            report(update, HistoryWriteMode::Invalidate);
        })
    };

    // Resume where the viewer stopped, once per video. Metadata and the
    // interaction state arrive in either order; whichever lands last seeks.
    let resume_at = interactions
        .data
        .as_ref()
        .and_then(|state| resume_position(state.history.as_ref()));

    {
        let resumed = resumed.clone();
        let video_ref = video_ref.clone();
        use_effect_with((video_id, resume_at), move |(_, resume_at)| {
            if let (Some(seconds), Some(media)) =
                (*resume_at, video_ref.cast::<HtmlMediaElement>())
            {
                if media.ready_state() >= HtmlMediaElement::HAVE_METADATA {
                    seek_once(&media, seconds, &resumed);
                }
            }
            || ()
        });
    }

    let on_loaded_metadata = {
        let resumed = resumed.clone();
        Callback::from(move |e: Event| {
            let Some(seconds) = resume_at else {
                return;
            };
            if let Some(media) = e.target_dyn_into::<HtmlMediaElement>() {
                seek_once(&media, seconds, &resumed);
            }
        })
    };

    let is_favorite = interactions
        .data
        .as_ref()
        .map(|state| state.is_favorite)
        .unwrap_or(false);

    // No optimistic flip: the button shows the server state until the
    // refetch after the write lands.
    let on_toggle_favorite = {
        let catalog = catalog.clone();
        let favorite_pending = favorite_pending.clone();
        let favorite_error = favorite_error.clone();
        Callback::from(move |_: MouseEvent| {
            let catalog = catalog.clone();
            let favorite_pending = favorite_pending.clone();
            let favorite_error = favorite_error.clone();
            favorite_pending.set(true);
            favorite_error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = set_video_favorite(&catalog, video_id, !is_favorite).await {
                    log::error!("Failed to update favorite for video {}: {}", video_id, e);
                    favorite_error.set(Some(e));
                }
                favorite_pending.set(false);
            });
        })
    };

    let poster = thumbnail_url(catalog.config(), props.video.thumbnail_key.as_deref());
    let favorite_busy = *favorite_pending || interactions.loading;

    html! {
        <section class="player mb-6">
            if let Some(src) = props.video.video_url.clone() {
                <video
                    ref={video_ref}
                    class="w-full rounded-lg bg-black"
                    controls=true
                    {src}
                    poster={poster}
                    ontimeupdate={on_time_update}
                    onended={on_ended}
                    onloadedmetadata={on_loaded_metadata}
                ></video>
            } else {
                <div class="empty-episodes-container">{"This video has no playable file."}</div>
            }
            <div class="flex items-center gap-4 mt-4">
                <h1 class="item_container-text text-2xl font-bold flex-grow">{ &props.video.title }</h1>
                if authenticated {
                    <button
                        class="item-container-button selector-button px-4 py-2 rounded"
                        disabled={favorite_busy}
                        onclick={on_toggle_favorite}
                    >
                        <i class={classes!("ph", if is_favorite { "ph-heart-straight-fill" } else { "ph-heart-straight" })} />
                        { if is_favorite { " Favorited" } else { " Favorite" } }
                    </button>
                }
            </div>
            <ErrorMessage error={(*favorite_error).clone()} />
            if let Some(history) = interactions.data.as_ref().and_then(|state| state.history.as_ref()) {
                if let Some(played_at) = &history.last_played_at {
                    <p class="item_container-text text-sm opacity-70">
                        { format!("Last watched {}", format_played_at(played_at)) }
                    </p>
                }
            }
        </section>
    }
}

fn seek_once(media: &HtmlMediaElement, seconds: f64, resumed: &RefCell<bool>) {
    if *resumed.borrow() {
        return;
    }
    media.set_current_time(seconds);
    *resumed.borrow_mut() = true;
}

#[derive(Properties, PartialEq)]
pub struct VideoInfoProps {
    pub video: VideoDetail,
}

#[function_component(VideoInfo)]
pub fn video_info(props: &VideoInfoProps) -> Html {
    let video = &props.video;
    let previews: Vec<EntityPreview> = video
        .actors
        .iter()
        .flatten()
        .cloned()
        .map(EntityPreview::Actor)
        .chain(video.creators.iter().flatten().cloned().map(EntityPreview::Creator))
        .collect();
    let tags: Vec<EntityPreview> = video
        .tags
        .iter()
        .flatten()
        .cloned()
        .map(EntityPreview::Tag)
        .collect();
    let distributors = video
        .distributors
        .iter()
        .flatten()
        .map(|d| d.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        <section class="video-info space-y-4">
            <div class="flex flex-wrap gap-4 text-sm item_container-text opacity-80">
                if let Some(duration) = video.duration_seconds {
                    <span><i class="ph ph-clock mr-1" />{ format_duration(duration) }</span>
                }
                if let Some(size) = video.file_size {
                    <span><i class="ph ph-file mr-1" />{ format_file_size(size) }</span>
                }
                if let Some(count) = video.play_count {
                    <span><i class="ph ph-play mr-1" />{ format_play_count(count) }</span>
                }
                if let Some(created) = &video.created_at {
                    <span><i class="ph ph-calendar mr-1" />{ format_played_at(created) }</span>
                }
            </div>
            if !previews.is_empty() {
                <div class="flex flex-wrap items-center">
                    { for previews.into_iter().map(|entity| html! { <EntityPreviewCard {entity} /> }) }
                </div>
            }
            if !distributors.is_empty() {
                <p class="item_container-text text-sm">{ format!("Distributed by {}", distributors) }</p>
            }
            if !tags.is_empty() {
                <div class="flex flex-wrap gap-2">
                    { for tags.into_iter().map(|entity| html! { <EntityPreviewCard {entity} /> }) }
                </div>
            }
            if let Some(description) = &video.description {
                <p class="item_container-text whitespace-pre-line">{ description }</p>
            }
        </section>
    }
}
