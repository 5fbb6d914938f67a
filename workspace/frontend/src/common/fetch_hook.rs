use yew::prelude::*;
use std::future::Future;
use compute::ApiError;
use crate::hooks::FetchState;
use crate::common::toast::ToastContext;

/// Runs `fetch_fn(deps)` on mount and whenever `deps` change.
///
/// The returned callback repeats the fetch with the current `deps`. Errors
/// land in the state and are also raised as a toast.
#[hook]
pub fn use_fetch_with_refetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> (UseStateHandle<FetchState<T>>, Callback<()>)
where
    T: 'static,
    D: Clone + PartialEq + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let fetch_state = use_state(|| FetchState::Loading);
    let toast_ctx = use_context::<ToastContext>();
    let generation = use_state(|| 0u32);

    {
        let fetch_state = fetch_state.clone();
        use_effect_with((deps, *generation), move |(deps, _)| {
            fetch_state.set(FetchState::Loading);
            let fut = fetch_fn(deps.clone());

            wasm_bindgen_futures::spawn_local(async move {
                match fut.await {
                    Ok(data) => fetch_state.set(FetchState::Success(data)),
                    Err(err) => {
                        let message = err.to_string();
                        log::error!("Fetch failed: {}", message);
                        if let Some(toast_ctx) = toast_ctx {
                            toast_ctx.show_error(message.clone());
                        }
                        fetch_state.set(FetchState::Error(message));
                    }
                }
            });
            || ()
        });
    }

    let refetch = {
        let generation = generation.clone();
        Callback::from(move |_| generation.set(*generation + 1))
    };

    (fetch_state, refetch)
}
