use yew::prelude::*;

use crate::components::gen_components::{ErrorMessage, LoadingAnimation, PagedVideos, PagedVideosProps};
use crate::components::home::GRID_PAGE_SIZE;
use crate::components::hooks::{use_tag, use_tag_videos};
use crate::components::person::EntityPageProps;

#[function_component(TagPage)]
pub fn tag_page(props: &EntityPageProps) -> Html {
    let page = use_state(|| 1u32);
    let tag = use_tag(Some(props.id));
    let videos = use_tag_videos(Some(props.id), *page, GRID_PAGE_SIZE);

    {
        let page = page.clone();
        use_effect_with(props.id, move |_| {
            page.set(1);
            || ()
        });
    }

    let on_page = {
        let page = page.clone();
        Callback::from(move |next: u32| page.set(next))
    };

    html! {
        <div class="tag-page">
            if let Some(tag) = &tag.data {
                <header class="mb-8 space-y-2">
                    if let Some(kind) = &tag.tag_type {
                        <p class="item_container-text text-sm uppercase opacity-60">{ &kind.name }</p>
                    }
                    <h1 class="item_container-text text-3xl font-bold">
                        <i class="ph ph-tag mr-2" />{ &tag.name }
                    </h1>
                    if let Some(count) = tag.video_count {
                        <p class="item_container-text text-sm">{ format!("{} videos", count) }</p>
                    }
                    if let Some(description) = &tag.description {
                        <p class="item_container-text whitespace-pre-line">{ description }</p>
                    }
                </header>
            } else if tag.loading {
                <LoadingAnimation />
            }
            <ErrorMessage error={tag.error.clone()} on_retry={Some(tag.refetch.clone())} />
            <PagedVideos ..PagedVideosProps::from_handle(&videos, *page, on_page, "No videos with this tag yet") />
        </div>
    }
}
