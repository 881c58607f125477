use gloo_timers::callback::Interval;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::gen_components::{
    ErrorMessage, LoadingAnimation, Pagination, VideoGrid,
};
use crate::components::gen_funcs::{format_duration, next_slide};
use crate::components::hooks::{
    use_banner_videos, use_catalog, use_latest_videos, use_recommended_videos,
};
use crate::components::routes::Route;
use crate::requests::file_reqs::thumbnail_url;
use crate::requests::video_reqs::Video;

pub const BANNER_INTERVAL_MS: u32 = 5_000;
pub const GRID_PAGE_SIZE: u32 = 12;

#[derive(Properties, PartialEq)]
pub struct BannerCarouselProps {
    pub videos: Vec<Video>,
}

#[function_component(BannerCarousel)]
pub fn banner_carousel(props: &BannerCarouselProps) -> Html {
    let catalog = use_catalog();
    let current = use_state(|| 0usize);
    let len = props.videos.len();

    // Restart the timer whenever the slide changes so a manual pick gets a
    // full interval too.
    {
        let current = current.clone();
        use_effect_with((len, *current), move |(len, index)| {
            let len = *len;
            let index = *index;
            let interval = (len > 1).then(|| {
                Interval::new(BANNER_INTERVAL_MS, move || {
                    current.set(next_slide(index, len));
                })
            });
            move || drop(interval)
        });
    }

    if len == 0 {
        return html! {};
    }
    let index = (*current).min(len - 1);
    let video = &props.videos[index];
    let background = thumbnail_url(catalog.config(), video.thumbnail_key.as_deref());

    html! {
        <section class="banner relative rounded-lg overflow-hidden mb-8">
            <Link<Route> to={Route::VideoDetail { id: video.id }}>
                <div class="aspect-[21/9] bg-gray-900">
                    if let Some(src) = background {
                        <img {src} alt={video.title.clone()} class="w-full h-full object-cover opacity-80" />
                    }
                </div>
                <div class="absolute bottom-0 left-0 p-6 text-white">
                    <h2 class="text-2xl font-bold">{ &video.title }</h2>
                    if let Some(duration) = video.duration_seconds {
                        <span class="text-sm opacity-80">{ format_duration(duration) }</span>
                    }
                </div>
            </Link<Route>>
            <div class="absolute bottom-2 right-4 flex gap-2">
                { for (0..len).map(|dot| {
                    let current = current.clone();
                    let onclick = Callback::from(move |_: MouseEvent| current.set(dot));
                    let class = if dot == index { "banner-dot active" } else { "banner-dot" };
                    html! { <button {class} {onclick} aria-label={format!("Slide {}", dot + 1)}></button> }
                }) }
            </div>
        </section>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let page = use_state(|| 1u32);
    let banner = use_banner_videos();
    let recommended = use_recommended_videos();
    let latest = use_latest_videos(*page, GRID_PAGE_SIZE);

    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    html! {
        <div class="home">
            if let Some(videos) = &banner.data {
                <BannerCarousel videos={(**videos).clone()} />
            }
            <ErrorMessage error={banner.error.clone()} on_retry={Some(banner.refetch.clone())} />

            <h2 class="item_container-text text-xl font-semibold mb-4">{"Recommended"}</h2>
            if let Some(videos) = &recommended.data {
                <VideoGrid videos={(**videos).clone()} />
            } else if recommended.loading {
                <LoadingAnimation />
            }
            <ErrorMessage error={recommended.error.clone()} on_retry={Some(recommended.refetch.clone())} />

            <h2 class="item_container-text text-xl font-semibold my-4">{"Latest"}</h2>
            if let Some(result) = &latest.data {
                <VideoGrid videos={result.items.clone()} />
                <Pagination page={*page} total_pages={result.total_pages()} on_change={on_page} />
            } else if latest.loading {
                <LoadingAnimation />
            }
            <ErrorMessage error={latest.error.clone()} on_retry={Some(latest.refetch.clone())} />
        </div>
    }
}
