use chrono::{Local, TimeZone};
use compute::forecast::{MAX_DAYS, MIN_DAYS};
use compute::timestamps::parse_input_datetime;
use compute::{run_forecast, ForecastForm, ForecastRun, PowercastApi};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::GlooApi;
use crate::common::error::{Banner, BannerKind};
use crate::components::common::line_chart::{ChartSeries, LineChart};
use crate::components::common::region_select::RegionSelect;
use crate::hooks::FetchState;

#[function_component(ForecastPage)]
pub fn forecast_page() -> Html {
    let form = use_state(ForecastForm::default);
    let start_input = use_state(String::new);
    let result = use_state(|| FetchState::<ForecastRun>::NotStarted);

    let on_region = {
        let form = form.clone();
        Callback::from(move |region: String| {
            form.set(ForecastForm {
                region,
                ..(*form).clone()
            });
        })
    };

    let on_start = {
        let form = form.clone();
        let start_input = start_input.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            let start = parse_input_datetime(&value)
                .and_then(|naive| Local.from_local_datetime(&naive).earliest())
                .map(|dt| dt.fixed_offset());
            start_input.set(value);
            form.set(ForecastForm {
                start,
                ..(*form).clone()
            });
        })
    };

    let on_days = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let days = input.value_as_number();
            if !days.is_nan() {
                form.set(ForecastForm {
                    days: days as u32,
                    ..(*form).clone()
                });
            }
        })
    };

    let on_run = {
        let form = form.clone();
        let result = result.clone();
        Callback::from(move |_: MouseEvent| {
            let submitted = (*form).clone();
            let result = result.clone();
            result.set(FetchState::Loading);

            wasm_bindgen_futures::spawn_local(async move {
                let api = GlooApi::from_settings();
                let outcome = run_forecast(&api, &submitted).await;
                if let Err(e) = &outcome {
                    log::error!("Forecast failed: {}", e);
                }
                result.set(outcome.into());
            });
        })
    };

    let running = result.is_loading();

    let output = match &*result {
        FetchState::NotStarted => html! {},
        FetchState::Loading => html! {
            <div class="flex items-center gap-2 py-4">
                <span class="loading loading-spinner loading-md"></span>
                <span>{"Running forecast..."}</span>
            </div>
        },
        FetchState::Error(message) => html! { <Banner message={message.clone()} /> },
        FetchState::Success(run) => {
            let x: Vec<String> = run.points.iter().map(|p| p.ts.clone()).collect();
            let series = vec![ChartSeries {
                name: "Forecast".to_string(),
                values: run.points.iter().map(|p| Some(p.yhat)).collect(),
            }];
            let export = run.export_id.as_deref().map(|id| {
                let href = GlooApi::from_settings().export_url(id);
                html! {
                    <a class="link link-primary" href={href} target="_blank">
                        <i class="fas fa-file-csv"></i>{" Download CSV"}
                    </a>
                }
            });

            html! {
                <>
                    <Banner kind={BannerKind::Success} message={run.message()} />
                    {export.unwrap_or_default()}
                    <LineChart div_id="forecast-chart" x={x} series={series} y_title={Some(AttrValue::from("MW"))} />
                </>
            }
        }
    };

    html! {
        <div class="flex flex-col gap-4">
            <div class="flex flex-wrap items-end gap-4">
                <label class="form-control">
                    <div class="label"><span class="label-text">{"Region"}</span></div>
                    <RegionSelect value={form.region.clone()} on_change={on_region} disabled={running} />
                </label>
                <label class="form-control">
                    <div class="label"><span class="label-text">{"Start"}</span></div>
                    <input type="datetime-local" class="input input-bordered input-sm"
                        value={(*start_input).clone()} onchange={on_start} disabled={running} />
                </label>
                <label class="form-control w-24">
                    <div class="label"><span class="label-text">{"Days"}</span></div>
                    <input type="number" class="input input-bordered input-sm"
                        min={MIN_DAYS.to_string()} max={MAX_DAYS.to_string()}
                        value={form.days.to_string()} oninput={on_days} disabled={running} />
                </label>
                <button class="btn btn-primary btn-sm" onclick={on_run} disabled={running || !form.can_run()}>
                    <i class="fas fa-play"></i>{" Run"}
                </button>
            </div>
            {output}
        </div>
    }
}
