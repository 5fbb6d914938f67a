use compute::{upload_selected, UploadOutcome};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api_client::{files, GlooApi};
use crate::common::toast::ToastContext;

/// Bulk CSV upload to the legacy `/upload` endpoint.
#[function_component(UploadPage)]
pub fn upload_page() -> Html {
    let input_ref = use_node_ref();
    let selected = use_state(Vec::<String>::new);
    let uploading = use_state(|| false);
    let toast_ctx = use_context::<ToastContext>();

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            selected.set(files::selected_names(&input));
        })
    };

    let on_upload = {
        let input_ref = input_ref.clone();
        let selected = selected.clone();
        let uploading = uploading.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let selected = selected.clone();
            let uploading = uploading.clone();
            let toast_ctx = toast_ctx.clone();
            uploading.set(true);

            wasm_bindgen_futures::spawn_local(async move {
                let api = GlooApi::from_settings();
                let outcome = match files::read_selected(&input).await {
                    Ok(picked) => upload_selected(&api, &picked).await.map_err(|e| e.to_string()),
                    Err(e) => Err(e),
                };

                match outcome {
                    Ok(outcome) => {
                        log::info!("Upload finished: {:?}", outcome);
                        if outcome.clears_selection() {
                            input.set_value("");
                            selected.set(Vec::new());
                        }
                        if let Some(toast_ctx) = &toast_ctx {
                            match outcome {
                                UploadOutcome::Inserted(_) => toast_ctx.show_success(outcome.message()),
                                _ => toast_ctx.show_info(outcome.message()),
                            }
                        }
                    }
                    Err(e) => {
                        log::error!("Upload failed: {}", e);
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_error(format!("Upload failed: {}", e));
                        }
                    }
                }
                uploading.set(false);
            });
        })
    };

    html! {
        <div class="max-w-xl mx-auto flex flex-col gap-4">
            <input
                ref={input_ref}
                type="file"
                multiple={true}
                accept=".csv"
                class="file-input file-input-bordered w-full"
                onchange={on_select}
                disabled={*uploading}
            />
            {if selected.is_empty() {
                html! {}
            } else {
                html! {
                    <ul class="text-sm list-disc list-inside">
                        { for selected.iter().map(|name| html! { <li>{name}</li> }) }
                    </ul>
                }
            }}
            <button
                class="btn btn-primary"
                onclick={on_upload}
                disabled={selected.is_empty() || *uploading}
            >
                {if *uploading {
                    html! { <span class="loading loading-spinner loading-sm"></span> }
                } else {
                    html! { <i class="fas fa-upload"></i> }
                }}
                {" Upload"}
            </button>
        </div>
    }
}
