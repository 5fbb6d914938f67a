use chrono::Local;
use common::{ForecastSummary, DEFAULT_REGION};
use compute::pagination::{page_slice, EVALUATE_PAGE_SIZE};
use compute::{evaluate_forecast, search_forecasts, EvaluationOutcome, ForecastSearch};
use yew::prelude::*;

use crate::api_client::GlooApi;
use crate::common::error::{Banner, BannerKind};
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::common::loading::Loading;
use crate::components::common::line_chart::{ChartSeries, LineChart};
use crate::components::common::pagination::Pagination;
use crate::components::common::region_select::RegionSelect;
use crate::hooks::FetchState;

const COLUMNS: [&str; 4] = ["Start", "Hours", "Latest", "Action"];

fn evaluation_view(state: &FetchState<EvaluationOutcome>) -> Html {
    match state {
        FetchState::NotStarted | FetchState::Success(EvaluationOutcome::Empty) => html! {},
        FetchState::Loading => html! { <Loading text={Some("Evaluating...".to_string())} /> },
        FetchState::Error(message) => html! { <Banner message={message.clone()} /> },
        FetchState::Success(EvaluationOutcome::Ready(evaluation)) => {
            let x: Vec<String> = evaluation.series.iter().map(|p| p.ts.clone()).collect();
            let series = vec![
                ChartSeries {
                    name: "Actual".to_string(),
                    values: evaluation.series.iter().map(|p| p.actual).collect(),
                },
                ChartSeries {
                    name: "Forecast".to_string(),
                    values: evaluation.series.iter().map(|p| Some(p.forecast)).collect(),
                },
            ];
            html! {
                <>
                    <Banner
                        kind={BannerKind::Info}
                        message={evaluation.headline()}
                        description={html! { <span>{evaluation.mape_range()}</span> }}
                    />
                    <LineChart div_id="evaluate-chart" x={x} series={series} y_title={Some(AttrValue::from("MW"))} />
                </>
            }
        }
    }
}

#[function_component(EvaluatePage)]
pub fn evaluate_page() -> Html {
    let region = use_state(|| DEFAULT_REGION.to_string());
    let page = use_state(|| 1usize);
    let evaluation = use_state(|| FetchState::<EvaluationOutcome>::NotStarted);
    // Only the latest click may write its result.
    let request_token = use_mut_ref(|| 0u64);

    let (forecasts, refetch) = use_fetch_with_refetch((*region).clone(), |region: String| async move {
        let api = GlooApi::from_settings();
        let search = ForecastSearch {
            region: Some(region),
            range: None,
        };
        search_forecasts(&api, &search, &Local).await
    });

    let on_region = {
        let region = region.clone();
        let page = page.clone();
        let evaluation = evaluation.clone();
        let request_token = request_token.clone();
        Callback::from(move |next: String| {
            *request_token.borrow_mut() += 1;
            region.set(next);
            page.set(1);
            evaluation.set(FetchState::NotStarted);
        })
    };

    let on_evaluate = {
        let region = region.clone();
        let evaluation = evaluation.clone();
        let request_token = request_token.clone();
        Callback::from(move |forecast_id: String| {
            let token = {
                let mut current = request_token.borrow_mut();
                *current += 1;
                *current
            };
            let region = (*region).clone();
            let evaluation = evaluation.clone();
            let request_token = request_token.clone();
            evaluation.set(FetchState::Loading);

            wasm_bindgen_futures::spawn_local(async move {
                let api = GlooApi::from_settings();
                let outcome = evaluate_forecast(&api, &forecast_id, &region).await;
                if *request_token.borrow() != token {
                    log::debug!("Dropping stale evaluation of {}", forecast_id);
                    return;
                }
                if let Err(e) = &outcome {
                    log::error!("Evaluation of {} failed: {}", forecast_id, e);
                }
                evaluation.set(outcome.into());
            });
        })
    };

    let on_page_change = {
        let page = page.clone();
        Callback::from(move |p: usize| page.set(p))
    };

    let render = {
        let current_page = *page;
        let busy = evaluation.is_loading();
        Callback::from(move |items: Vec<ForecastSummary>| {
            if items.is_empty() {
                return html! { <p class="text-base-content/60 py-4">{"No forecasts for this region."}</p> };
            }
            html! {
                <div class="overflow-x-auto">
                    <table class="table table-sm">
                        <thead>
                            <tr>{ for COLUMNS.iter().map(|c| html! { <th>{*c}</th> }) }</tr>
                        </thead>
                        <tbody>
                            { for page_slice(&items, current_page, EVALUATE_PAGE_SIZE).iter().map(|item| {
                                let onclick = {
                                    let on_evaluate = on_evaluate.clone();
                                    let id = item.id.clone();
                                    Callback::from(move |_: MouseEvent| on_evaluate.emit(id.clone()))
                                };
                                html! {
                                    <tr key={item.id.clone()}>
                                        <td>{&item.start_date}</td>
                                        <td>{item.horizon_h}</td>
                                        <td>{if item.is_latest { "Yes" } else { "No" }}</td>
                                        <td>
                                            <button class="btn btn-xs btn-outline" onclick={onclick} disabled={busy}>
                                                {"Evaluate"}
                                            </button>
                                        </td>
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
            <div class="flex items-center gap-2">
                <RegionSelect value={(*region).clone()} on_change={on_region} />
            </div>

            <FetchRender<Vec<ForecastSummary>>
                state={(*forecasts).clone()}
                render={render}
                on_retry={Some(refetch)}
                loading_text={Some("Loading forecasts...".to_string())}
            />

            <Pagination
                current_page={*page}
                total_items={total}
                items_per_page={EVALUATE_PAGE_SIZE}
                on_page_change={on_page_change}
            />

            {evaluation_view(&evaluation)}
        </div>
    }
}
