use yew::prelude::*;

use crate::components::gen_components::{
    EntityPreview, EntityPreviewCard, ErrorMessage, LoadingAnimation, PagedVideos,
    PagedVideosProps,
};
use crate::components::gen_funcs::truncate_text;
use crate::components::home::GRID_PAGE_SIZE;
use crate::components::hooks::{
    use_actor, use_actor_videos, use_catalog, use_creator, use_creator_videos,
};
use crate::requests::file_reqs::avatar_url;

const DESCRIPTION_PREVIEW_CHARS: usize = 280;

#[derive(Properties, PartialEq)]
pub struct PersonHeaderProps {
    pub name: AttrValue,
    #[prop_or_default]
    pub subtitle: Option<AttrValue>,
    #[prop_or_default]
    pub avatar_key: Option<String>,
    #[prop_or_default]
    pub description: Option<String>,
    #[prop_or_default]
    pub video_count: Option<u64>,
    #[prop_or_default]
    pub related: Option<EntityPreview>,
    #[prop_or_default]
    pub external_url: Option<String>,
}

#[function_component(PersonHeader)]
pub fn person_header(props: &PersonHeaderProps) -> Html {
    let catalog = use_catalog();
    let expanded = use_state(|| false);
    let avatar = avatar_url(catalog.config(), props.avatar_key.as_deref());

    let description = props.description.as_deref().map(|text| {
        if *expanded {
            (text.to_string(), false)
        } else {
            truncate_text(text, DESCRIPTION_PREVIEW_CHARS)
        }
    });
    let toggle_description = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| expanded.set(!*expanded))
    };

    html! {
        <header class="person-header flex gap-6 items-start mb-8">
            if let Some(src) = avatar {
                <img {src} alt={props.name.clone()} class="w-32 h-32 rounded-full object-cover" />
            } else {
                <div class="w-32 h-32 rounded-full bg-gray-700 flex items-center justify-center">
                    <i class="ph ph-user text-5xl" />
                </div>
            }
            <div class="flex-grow space-y-2">
                <h1 class="item_container-text text-3xl font-bold">{ &props.name }</h1>
                if let Some(subtitle) = &props.subtitle {
                    <p class="item_container-text opacity-70">{ subtitle }</p>
                }
                if let Some(count) = props.video_count {
                    <p class="item_container-text text-sm">{ format!("{} videos", count) }</p>
                }
                if let Some(entity) = props.related.clone() {
                    <div class="flex items-center gap-2">
                        <span class="item_container-text text-sm opacity-70">{"Also:"}</span>
                        <EntityPreviewCard {entity} />
                    </div>
                }
                if let Some(url) = &props.external_url {
                    <a href={url.clone()} class="item_container-text underline" target="_blank" rel="noopener noreferrer">
                        <i class="ph ph-link mr-1" />{"Profile"}
                    </a>
                }
                if let Some((text, truncated)) = description {
                    <p class="item_container-text whitespace-pre-line">{ text }</p>
                    if truncated || *expanded {
                        <button class="item-container-button underline text-sm" onclick={toggle_description}>
                            { if *expanded { "Show less" } else { "Show more" } }
                        </button>
                    }
                }
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub struct EntityPageProps {
    pub id: i64,
}

#[function_component(ActorPage)]
pub fn actor_page(props: &EntityPageProps) -> Html {
    let page = use_state(|| 1u32);
    let actor = use_actor(Some(props.id));
    let videos = use_actor_videos(Some(props.id), *page, GRID_PAGE_SIZE);

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
        <div class="actor-page">
            if let Some(actor) = &actor.data {
                <PersonHeader
                    name={actor.name.clone()}
                    subtitle={actor.name_reading.clone().map(AttrValue::from)}
                    avatar_key={actor.avatar_key.clone()}
                    description={actor.description.clone()}
                    video_count={actor.video_count}
                    related={actor.creator.clone().map(EntityPreview::Creator)}
                />
            } else if actor.loading {
                <LoadingAnimation />
            }
            <ErrorMessage error={actor.error.clone()} on_retry={Some(actor.refetch.clone())} />
            <PagedVideos ..PagedVideosProps::from_handle(&videos, *page, on_page, "No videos for this actor yet") />
        </div>
    }
}

#[function_component(CreatorPage)]
pub fn creator_page(props: &EntityPageProps) -> Html {
    let page = use_state(|| 1u32);
    let creator = use_creator(Some(props.id));
    let videos = use_creator_videos(Some(props.id), *page, GRID_PAGE_SIZE);

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
        <div class="creator-page">
            if let Some(creator) = &creator.data {
                <PersonHeader
                    name={creator.name.clone()}
                    avatar_key={creator.avatar_key.clone()}
                    description={creator.description.clone()}
                    video_count={creator.video_count}
                    related={creator.actor.clone().map(EntityPreview::Actor)}
                    external_url={creator.profile_url.clone()}
                />
            } else if creator.loading {
                <LoadingAnimation />
            }
            <ErrorMessage error={creator.error.clone()} on_retry={Some(creator.refetch.clone())} />
            <PagedVideos ..PagedVideosProps::from_handle(&videos, *page, on_page, "No videos from this creator yet") />
        </div>
    }
}
