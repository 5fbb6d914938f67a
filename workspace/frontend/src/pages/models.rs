use common::{ModelInfo, DEFAULT_REGION};
use compute::list_models;
use compute::models::{model_cells, COLUMNS};
use compute::pagination::{page_slice, DEFAULT_PAGE_SIZE};
use yew::prelude::*;

use crate::api_client::GlooApi;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::components::common::pagination::Pagination;
use crate::components::common::region_select::RegionSelect;

#[function_component(ModelsPage)]
pub fn models_page() -> Html {
    let region = use_state(|| DEFAULT_REGION.to_string());
    let page = use_state(|| 1usize);

    let (models, refetch) = use_fetch_with_refetch((*region).clone(), |region: String| async move {
        let api = GlooApi::from_settings();
        list_models(&api, Some(region.as_str())).await
    });

    let on_region = {
        let region = region.clone();
        let page = page.clone();
        Callback::from(move |next: String| {
            region.set(next);
            page.set(1);
        })
    };

    let on_refresh = {
        let refetch = refetch.clone();
        Callback::from(move |_: MouseEvent| refetch.emit(()))
    };

    let on_page_change = {
        let page = page.clone();
        Callback::from(move |p: usize| page.set(p))
    };

    let render = {
        let current_page = *page;
        Callback::from(move |models: Vec<ModelInfo>| {
            if models.is_empty() {
                return html! { <p class="text-base-content/60 py-4">{"No models found."}</p> };
            }
            html! {
                <div class="overflow-x-auto">
                    <table class="table table-sm">
                        <thead>
                            <tr>{ for COLUMNS.iter().map(|c| html! { <th>{*c}</th> }) }</tr>
                        </thead>
                        <tbody>
                            { for page_slice(&models, current_page, DEFAULT_PAGE_SIZE).iter().map(|model| html! {
                                <tr>{ for model_cells(model).into_iter().map(|cell| html! { <td>{cell}</td> }) }</tr>
                            }) }
                        </tbody>
                    </table>
                </div>
            }
        })
    };

    let total = models.data().map(|m| m.len()).unwrap_or(0);

    html! {
        <div class="flex flex-col gap-2">
            <div class="flex gap-2 items-center">
                <RegionSelect value={(*region).clone()} on_change={on_region} />
                <button class="btn btn-sm" onclick={on_refresh} disabled={models.is_loading()}>
                    <i class="fas fa-sync-alt"></i>{" Refresh"}
                </button>
            </div>

            <FetchRender<Vec<ModelInfo>>
                state={(*models).clone()}
                render={render}
                on_retry={Some(refetch)}
                loading_text={Some("Loading models...".to_string())}
            />

            <Pagination
                current_page={*page}
                total_items={total}
                items_per_page={DEFAULT_PAGE_SIZE}
                on_page_change={on_page_change}
            />
        </div>
    }
}
