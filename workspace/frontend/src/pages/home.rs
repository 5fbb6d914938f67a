use compute::check_health;
use yew::prelude::*;

use crate::api_client::GlooApi;
use crate::common::error::{Banner, BannerKind};
use crate::common::loading::Loading;
use crate::hooks::FetchState;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let health = use_state(|| FetchState::<String>::Loading);

    {
        let health = health.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let api = GlooApi::from_settings();
                health.set(check_health(&api).await.into());
            });
            || ()
        });
    }

    html! {
        <>
            <h2 class="text-2xl font-bold">{"Welcome to PowerCast"}</h2>
            <p class="py-2 text-base-content/70">
                {"Electricity load forecasting: import data, train models, run and evaluate forecasts."}
            </p>
            {match &*health {
                FetchState::Success(line) => html! { <Banner kind={BannerKind::Success} message={line.clone()} /> },
                FetchState::Error(err) => html! { <Banner message={err.clone()} /> },
                _ => html! { <Loading text={Some("Checking backend...".to_string())} /> },
            }}
        </>
    }
}
