use common::DataKind;
use compute::{import_batch, ImportLog, ImportResult};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::{files, GlooApi};
use crate::common::error::Banner;

enum LogAction {
    Record(Vec<ImportResult>),
    Clear,
}

#[derive(Default, PartialEq)]
struct ImportLogState(ImportLog);

impl Reducible for ImportLogState {
    type Action = LogAction;

    fn reduce(self: Rc<Self>, action: LogAction) -> Rc<Self> {
        let mut log = self.0.clone();
        match action {
            LogAction::Record(batch) => log.record_batch(batch),
            LogAction::Clear => log.clear(),
        }
        Rc::new(Self(log))
    }
}

fn category_label(kind: DataKind) -> &'static str {
    match kind {
        DataKind::Load => "Load (NYISO 5-min → 1h mean)",
        DataKind::Weather => "Weather (1h)",
        DataKind::Holidays => "Holidays",
    }
}

#[function_component(DataImportPage)]
pub fn data_import_page() -> Html {
    let category = use_state(|| DataKind::Load);
    let results = use_reducer(ImportLogState::default);
    let selected = use_state(Vec::<String>::new);
    let uploading = use_state(|| false);
    let error = use_state(|| None::<String>);
    let input_ref = use_node_ref();

    let clear_selection = {
        let input_ref = input_ref.clone();
        let selected = selected.clone();
        move || {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.set_value("");
            }
            selected.set(Vec::new());
        }
    };

    let on_category = |kind: DataKind| {
        let category = category.clone();
        let results = results.dispatcher();
        let error = error.clone();
        let clear_selection = clear_selection.clone();
        Callback::from(move |_: Event| {
            log::debug!("Import category switched to {}", kind);
            category.set(kind);
            results.dispatch(LogAction::Clear);
            error.set(None);
            clear_selection();
        })
    };

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            selected.set(files::selected_names(&input));
        })
    };

    let on_upload = {
        let input_ref = input_ref.clone();
        let category = *category;
        let results = results.dispatcher();
        let uploading = uploading.clone();
        let error = error.clone();
        let clear_selection = clear_selection.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let results = results.clone();
            let uploading = uploading.clone();
            let error = error.clone();
            let clear_selection = clear_selection.clone();

            error.set(None);
            uploading.set(true);

            wasm_bindgen_futures::spawn_local(async move {
                match files::read_selected(&input).await {
                    Ok(picked) => {
                        let api = GlooApi::from_settings();
                        let batch = import_batch(&api, category.as_str(), &picked).await;
                        log::info!("Import batch finished with {} results", batch.len());
                        results.dispatch(LogAction::Record(batch));
                        clear_selection();
                    }
                    Err(e) => {
                        log::error!("Failed to read selected files: {}", e);
                        error.set(Some(e));
                    }
                }
                uploading.set(false);
            });
        })
    };

    html! {
        <div class="flex flex-col gap-4">
            <p class="text-base-content/70">
                {"Choose the file type and send one or more files. The backend stores "}
                <b>{"hourly"}</b>{" values."}
            </p>

            <div class="join">
                { for DataKind::ALL.iter().map(|kind| html! {
                    <input
                        class="join-item btn btn-sm"
                        type="radio"
                        name="import-category"
                        aria-label={category_label(*kind)}
                        checked={*category == *kind}
                        disabled={*uploading}
                        onchange={on_category(*kind)}
                    />
                }) }
            </div>

            <div class="flex gap-2 items-center">
                <input
                    ref={input_ref}
                    type="file"
                    multiple={true}
                    accept=".csv,.xlsx"
                    class="file-input file-input-bordered w-full max-w-md"
                    onchange={on_select}
                    disabled={*uploading}
                />
                <button
                    class="btn btn-primary"
                    onclick={on_upload}
                    disabled={selected.is_empty() || *uploading}
                >
                    {if *uploading {
                        html! { <><span class="loading loading-spinner loading-sm"></span>{" Uploading..."}</> }
                    } else {
                        html! { <><i class="fas fa-upload"></i>{" Upload"}</> }
                    }}
                </button>
            </div>

            {if let Some(err) = (*error).as_ref() {
                html! { <Banner message={err.clone()} /> }
            } else {
                html! {}
            }}

            <div class="border border-base-300 rounded-box">
                <div class="px-4 py-2 font-semibold border-b border-base-300">{"Import results (newest first)"}</div>
                {if results.0.is_empty() {
                    html! { <div class="px-4 py-3 text-base-content/60">{"No data"}</div> }
                } else {
                    html! {
                        <ul>
                            { for results.0.entries().iter().map(|entry| html! {
                                <li class={classes!("px-4", "py-2", "border-b", "border-base-200",
                                    if entry.is_ok() { "text-success" } else { "text-error" })}>
                                    {entry.describe()}
                                </li>
                            }) }
                        </ul>
                    }
                }}
            </div>
        </div>
    }
}
