use chrono::Local;
use common::ForecastSummary;
use compute::forecast::summary_cells;
use compute::pagination::{page_slice, DEFAULT_PAGE_SIZE};
use compute::timestamps::parse_input_date;
use compute::{search_forecasts, ForecastSearch, PowercastApi};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::GlooApi;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::components::common::pagination::Pagination;
use crate::components::common::region_select::RegionSelect;

const COLUMNS: [&str; 5] = ["Region", "Start", "Hours", "Latest", "Export"];

#[function_component(ForecastsPage)]
pub fn forecasts_page() -> Html {
    let region = use_state(String::new);
    let date_from = use_state(String::new);
    let date_to = use_state(String::new);
    let submitted = use_state(ForecastSearch::default);
    let page = use_state(|| 1usize);

    let (forecasts, refetch) = use_fetch_with_refetch((*submitted).clone(), |search: ForecastSearch| async move {
        let api = GlooApi::from_settings();
        search_forecasts(&api, &search, &Local).await
    });

    let on_region = {
        let region = region.clone();
        Callback::from(move |next: String| region.set(next))
    };

    let on_date = |target: UseStateHandle<String>| {
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            target.set(input.value());
        })
    };

    let on_search = {
        let region = region.clone();
        let date_from = date_from.clone();
        let date_to = date_to.clone();
        let submitted = submitted.clone();
        let page = page.clone();
        let refetch = refetch.clone();
        Callback::from(move |_: MouseEvent| {
            let search = ForecastSearch {
                region: Some((*region).clone()).filter(|r| !r.is_empty()),
                range: parse_input_date(&date_from).zip(parse_input_date(&date_to)),
            };
            page.set(1);
            if search == *submitted {
                refetch.emit(());
            } else {
                submitted.set(search);
            }
        })
    };

    let on_page_change = {
        let page = page.clone();
        Callback::from(move |p: usize| page.set(p))
    };

    let render = {
        let current_page = *page;
        Callback::from(move |items: Vec<ForecastSummary>| {
            if items.is_empty() {
                return html! { <p class="text-base-content/60 py-4">{"No forecasts found."}</p> };
            }
            let api = GlooApi::from_settings();
            html! {
                <div class="overflow-x-auto">
                    <table class="table table-sm">
                        <thead>
                            <tr>{ for COLUMNS.iter().map(|c| html! { <th>{*c}</th> }) }</tr>
                        </thead>
                        <tbody>
                            { for page_slice(&items, current_page, DEFAULT_PAGE_SIZE).iter().map(|item| {
                                let export = match &item.export_id {
                                    Some(id) => html! {
                                        <a class="link link-primary" href={api.export_url(id)} target="_blank">{"CSV"}</a>
                                    },
                                    None => html! { {"-"} },
                                };
                                html! {
                                    <tr key={item.id.clone()}>
                                        { for summary_cells(item).into_iter().map(|cell| html! { <td>{cell}</td> }) }
                                        <td>{export}</td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                </div>
            }
        })
    };

    let total = forecasts.data().map(|f| f.len()).unwrap_or(0);

    html! {
        <div class="flex flex-col gap-4">
            <div class="flex flex-wrap items-end gap-4">
                <label class="form-control">
                    <div class="label"><span class="label-text">{"Region"}</span></div>
                    <RegionSelect value={(*region).clone()} on_change={on_region} allow_clear=true />
                </label>
                <label class="form-control">
                    <div class="label"><span class="label-text">{"From"}</span></div>
                    <input type="date" class="input input-bordered input-sm"
                        value={(*date_from).clone()} onchange={on_date(date_from.clone())} />
                </label>
                <label class="form-control">
                    <div class="label"><span class="label-text">{"To"}</span></div>
                    <input type="date" class="input input-bordered input-sm"
                        value={(*date_to).clone()} onchange={on_date(date_to.clone())} />
                </label>
                <button class="btn btn-primary btn-sm" onclick={on_search} disabled={forecasts.is_loading()}>
                    <i class="fas fa-search"></i>{" Search"}
                </button>
            </div>

            <FetchRender<Vec<ForecastSummary>>
                state={(*forecasts).clone()}
                render={render}
                on_retry={Some(refetch)}
                loading_text={Some("Searching forecasts...".to_string())}
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
