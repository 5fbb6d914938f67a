use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="text-center py-12">
            <h2 class="text-5xl font-bold">{"404"}</h2>
            <p class="py-4 text-base-content/70">{"The page you are looking for does not exist."}</p>
            <Link<Route> to={Route::Home} classes="btn btn-primary">{"Back home"}</Link<Route>>
        </div>
    }
}
