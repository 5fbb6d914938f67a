use common::DataKind;
use compute::coverage::{columns, row_cells};
use compute::pagination::{page_slice, DEFAULT_PAGE_SIZE};
use compute::{load_coverage, CoverageView};
use yew::prelude::*;

use crate::api_client::GlooApi;
use crate::common::error::{Banner, BannerKind};
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::components::common::pagination::Pagination;

#[function_component(DataCoveragePage)]
pub fn data_coverage_page() -> Html {
    let kind = use_state(|| DataKind::Load);
    let page = use_state(|| 1usize);

    let (coverage, refetch) = use_fetch_with_refetch(*kind, |kind: DataKind| async move {
        let api = GlooApi::from_settings();
        load_coverage(&api, kind).await
    });

    let on_kind = |next: DataKind| {
        let kind = kind.clone();
        let page = page.clone();
        Callback::from(move |_: MouseEvent| {
            kind.set(next);
            page.set(1);
        })
    };

    let on_page_change = {
        let page = page.clone();
        Callback::from(move |p: usize| page.set(p))
    };

    let render = {
        let current_page = *page;
        Callback::from(move |view: CoverageView| {
            let summary = html! {
                <div class="flex flex-col">
                    { for view.summary_lines().into_iter().map(|(label, line)| html! {
                        <div><b>{label}</b>{": "}{line}</div>
                    }) }
                </div>
            };
            let rows = page_slice(&view.rows, current_page, DEFAULT_PAGE_SIZE);

            html! {
                <>
                    <Banner kind={BannerKind::Info} message={"Summary"} description={summary} />
                    {if view.rows.is_empty() {
                        html! { <p class="text-base-content/60 py-4">{"no data"}</p> }
                    } else {
                        html! {
                            <div class="overflow-x-auto">
                                <table class="table table-sm">
                                    <thead>
                                        <tr>{ for columns(view.kind).iter().map(|c| html! { <th>{*c}</th> }) }</tr>
                                    </thead>
                                    <tbody>
                                        { for rows.iter().map(|row| html! {
                                            <tr>{ for row_cells(row).into_iter().map(|cell| html! { <td>{cell}</td> }) }</tr>
                                        }) }
                                    </tbody>
                                </table>
                            </div>
                        }
                    }}
                </>
            }
        })
    };

    let total = coverage.data().map(|v| v.rows.len()).unwrap_or(0);

    html! {
        <div class="flex flex-col gap-2">
            <div class="join">
                { for DataKind::ALL.iter().map(|k| html! {
                    <button
                        class={classes!("join-item", "btn", "btn-sm", (*kind == *k).then_some("btn-active"))}
                        onclick={on_kind(*k)}
                    >
                        {k.label()}
                    </button>
                }) }
            </div>

            <FetchRender<CoverageView>
                state={(*coverage).clone()}
                render={render}
                on_retry={Some(refetch)}
                loading_text={Some("Loading coverage...".to_string())}
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
