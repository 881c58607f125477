use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::gen_components::{ErrorMessage, LoadingAnimation, Pagination, VideoGrid};
use crate::components::home::GRID_PAGE_SIZE;
use crate::components::hooks::use_videos;
use crate::requests::video_reqs::{SortBy, SortOrder, VideoListQuery};

#[function_component(Videos)]
pub fn videos() -> Html {
    let search_input = use_state(String::new);
    let query = use_state(|| VideoListQuery {
        sort_by: Some(SortBy::default()),
        sort_order: Some(SortOrder::default()),
        ..VideoListQuery::new(1, GRID_PAGE_SIZE)
    });
    let result = use_videos((*query).clone());

    let on_input = {
        let search_input = search_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search_input.set(input.value());
        })
    };

    // A new search or sort always starts again from page one
    let on_submit = {
        let search_input = search_input.clone();
        let query = query.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let trimmed = search_input.trim();
            query.set(VideoListQuery {
                page: 1,
                q: (!trimmed.is_empty()).then(|| trimmed.to_string()),
                ..(*query).clone()
            });
        })
    };

    let on_sort_change = {
        let query = query.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                let value = select.value();
                let (field, order) = value.split_once(':').unwrap_or((value.as_str(), "desc"));
                query.set(VideoListQuery {
                    page: 1,
                    sort_by: SortBy::parse(field),
                    sort_order: SortOrder::parse(order),
                    ..(*query).clone()
                });
            }
        })
    };

    let on_page = {
        let query = query.clone();
        Callback::from(move |page: u32| {
            query.set(VideoListQuery {
                page,
                ..(*query).clone()
            });
        })
    };

    let selected_sort = format!(
        "{}:{}",
        query.sort_by.unwrap_or_default().as_str(),
        query.sort_order.unwrap_or_default().as_str()
    );

    html! {
        <div class="videos">
            <form class="search-bar-container flex gap-2 mb-6" onsubmit={on_submit}>
                <input
                    type="search"
                    class="search-input flex-grow p-2.5 rounded-lg border"
                    placeholder="Search videos"
                    value={(*search_input).clone()}
                    oninput={on_input}
                />
                <button type="submit" class="item-container-button selector-button px-4 rounded-lg">
                    <i class="ph ph-magnifying-glass" />
                </button>
                <select class="sort-select p-2.5 rounded-lg border" onchange={on_sort_change}>
                    { for SortBy::ALL.iter().flat_map(|field| [SortOrder::Desc, SortOrder::Asc].map(move |order| (*field, order))).map(|(field, order)| {
                        let value = format!("{}:{}", field.as_str(), order.as_str());
                        let arrow = if order == SortOrder::Desc { "↓" } else { "↑" };
                        html! {
                            <option selected={value == selected_sort} value={value.clone()}>
                                { format!("{} {}", field.label(), arrow) }
                            </option>
                        }
                    }) }
                </select>
            </form>

            if let Some(q) = &query.q {
                <p class="item_container-text mb-4">{ format!("Results for \"{}\"", q) }</p>
            }

            if let Some(page) = &result.data {
                <VideoGrid videos={page.items.clone()} empty_title="No videos match your search" />
                <Pagination page={query.page} total_pages={page.total_pages()} on_change={on_page} />
            } else if result.loading {
                <LoadingAnimation />
            }
            <ErrorMessage error={result.error.clone()} on_retry={Some(result.refetch.clone())} />
        </div>
    }
}
