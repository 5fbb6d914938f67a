use chrono::Local;
use common::{TrainResult, REGIONS};
use compute::timestamps::{local_to_utc, parse_input_datetime};
use compute::training::{describe_result, whole_number};
use compute::{submit_training, TrainForm};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::GlooApi;
use crate::common::error::{Banner, BannerKind};
use crate::common::toast::ToastContext;

#[derive(Properties, PartialEq)]
struct NumberFieldProps {
    label: AttrValue,
    value: f64,
    min: f64,
    max: f64,
    #[prop_or(1.0)]
    step: f64,
    /// Only whole numbers are passed on.
    #[prop_or_default]
    whole: bool,
    on_change: Callback<f64>,
}

#[function_component(NumberField)]
fn number_field(props: &NumberFieldProps) -> Html {
    let rejected = use_state(|| false);

    let on_input = {
        let on_change = props.on_change.clone();
        let rejected = rejected.clone();
        let whole = props.whole;
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value_as_number();
            let accepted = !value.is_nan() && (!whole || whole_number(value).is_some());
            rejected.set(!accepted);
            if accepted {
                on_change.emit(value);
            }
        })
    };

    html! {
        <label class="form-control w-full max-w-xs">
            <div class="label"><span class="label-text">{&props.label}</span></div>
            <input
                type="number"
                class="input input-bordered input-sm"
                value={props.value.to_string()}
                min={props.min.to_string()}
                max={props.max.to_string()}
                step={props.step.to_string()}
                oninput={on_input}
            />
            if *rejected {
                <div class="label">
                    <span class="label-text-alt text-error">
                        { if props.whole { "Enter a whole number." } else { "Enter a number." } }
                    </span>
                </div>
            }
        </label>
    }
}

fn parse_local(value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    parse_input_datetime(value).and_then(|naive| local_to_utc(&naive, &Local))
}

#[function_component(TrainPage)]
pub fn train_page() -> Html {
    let form = use_state(TrainForm::default);
    let range_from = use_state(String::new);
    let range_to = use_state(String::new);
    let training = use_state(|| false);
    let results = use_state(Vec::<TrainResult>::new);
    let toast_ctx = use_context::<ToastContext>();

    let set_field = |apply: fn(&mut TrainForm, f64)| {
        let form = form.clone();
        Callback::from(move |value: f64| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let set_count = |apply: fn(&mut TrainForm, u32)| {
        let form = form.clone();
        Callback::from(move |value: f64| {
            if let Some(count) = whole_number(value) {
                let mut next = (*form).clone();
                apply(&mut next, count);
                form.set(next);
            }
        })
    };

    let toggle_region = |region: &'static str| {
        let form = form.clone();
        Callback::from(move |_: Event| {
            let mut next = (*form).clone();
            if next.regions.iter().any(|r| r == region) {
                next.regions.retain(|r| r != region);
            } else {
                next.regions.push(region.to_string());
            }
            form.set(next);
        })
    };

    let on_range = |target: UseStateHandle<String>| {
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            target.set(input.value());
        })
    };

    let on_submit = {
        let form = form.clone();
        let range_from = range_from.clone();
        let range_to = range_to.clone();
        let training = training.clone();
        let results = results.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *training {
                return;
            }

            let mut submitted = (*form).clone();
            submitted.range = parse_local(&range_from).zip(parse_local(&range_to));

            let training = training.clone();
            let results = results.clone();
            let toast_ctx = toast_ctx.clone();
            training.set(true);

            wasm_bindgen_futures::spawn_local(async move {
                let api = GlooApi::from_settings();
                match submit_training(&api, &submitted).await {
                    Ok(response) => {
                        log::info!("Training finished: {:?}", response);
                        results.set(response.results);
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_success("Training finished and model saved!".to_string());
                        }
                    }
                    Err(err) => {
                        log::error!("Training failed: {}", err);
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_error(err.to_string());
                        }
                    }
                }
                training.set(false);
            });
        })
    };

    html! {
        <form onsubmit={on_submit} class="flex flex-col gap-4">
            {if *training {
                html! {
                    <div class="alert alert-info">
                        <span class="loading loading-spinner loading-sm"></span>
                        <span>{"Training model... please wait"}</span>
                    </div>
                }
            } else {
                html! {}
            }}

            <fieldset disabled={*training} class="flex flex-col gap-4">
                <div>
                    <div class="label"><span class="label-text">{"Regions"}</span></div>
                    <div class="flex flex-wrap gap-3">
                        { for REGIONS.iter().map(|region| html! {
                            <label class="label cursor-pointer gap-2">
                                <input
                                    type="checkbox"
                                    class="checkbox checkbox-sm"
                                    checked={form.regions.iter().any(|r| r == region)}
                                    onchange={toggle_region(*region)}
                                />
                                <span class="label-text">{*region}</span>
                            </label>
                        }) }
                    </div>
                </div>

                <div class="flex flex-wrap gap-4">
                    <label class="form-control">
                        <div class="label"><span class="label-text">{"From"}</span></div>
                        <input type="datetime-local" class="input input-bordered input-sm"
                            value={(*range_from).clone()} onchange={on_range(range_from.clone())} />
                    </label>
                    <label class="form-control">
                        <div class="label"><span class="label-text">{"To"}</span></div>
                        <input type="datetime-local" class="input input-bordered input-sm"
                            value={(*range_to).clone()} onchange={on_range(range_to.clone())} />
                    </label>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-2">
                    <NumberField label="Layers" value={form.layers as f64} min={1.0} max={4.0}
                        whole={true}
                        on_change={set_count(|f, v| f.layers = v)} />
                    <NumberField label="Hidden size" value={form.hidden_size as f64} min={16.0} max={512.0}
                        whole={true}
                        on_change={set_count(|f, v| f.hidden_size = v)} />
                    <NumberField label="Dropout" value={form.dropout} min={0.0} max={0.9} step={0.1}
                        on_change={set_field(|f, v| f.dropout = v)} />
                    <NumberField label="Epochs" value={form.epochs as f64} min={1.0} max={200.0}
                        whole={true}
                        on_change={set_count(|f, v| f.epochs = v)} />
                    <NumberField label="Batch size" value={form.batch_size as f64} min={8.0} max={512.0}
                        whole={true}
                        on_change={set_count(|f, v| f.batch_size = v)} />
                    <NumberField label="Learning rate" value={form.learning_rate} min={0.00001} max={0.1} step={0.0005}
                        on_change={set_field(|f, v| f.learning_rate = v)} />
                    <NumberField label="Input window (h)" value={form.input_window as f64} min={24.0} max={336.0}
                        whole={true}
                        on_change={set_count(|f, v| f.input_window = v)} />
                    <NumberField label="Horizon (h)" value={form.forecast_horizon as f64} min={24.0} max={168.0}
                        whole={true}
                        on_change={set_count(|f, v| f.forecast_horizon = v)} />
                    <NumberField label="Teacher forcing (0-1)" value={form.teacher_forcing} min={0.0} max={1.0} step={0.1}
                        on_change={set_field(|f, v| f.teacher_forcing = v)} />
                </div>

                <div>
                    <button type="submit" class="btn btn-primary">
                        {if *training {
                            html! { <span class="loading loading-spinner loading-sm"></span> }
                        } else {
                            html! { <i class="fas fa-brain"></i> }
                        }}
                        {" Train"}
                    </button>
                </div>
            </fieldset>

            {if results.is_empty() {
                html! {}
            } else {
                html! {
                    <Banner
                        kind={BannerKind::Success}
                        message={"Training results"}
                        description={html! {
                            <ul>{ for results.iter().map(|r| html! { <li>{describe_result(r)}</li> }) }</ul>
                        }}
                    />
                }
            }}
        </form>
    }
}
