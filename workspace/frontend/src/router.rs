use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::layout::Layout;
use crate::pages::data_coverage::DataCoveragePage;
use crate::pages::data_import::DataImportPage;
use crate::pages::evaluate::EvaluatePage;
use crate::pages::forecast::ForecastPage;
use crate::pages::forecasts::ForecastsPage;
use crate::pages::home::HomePage;
use crate::pages::models::ModelsPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::train::TrainPage;
use crate::pages::upload::UploadPage;

#[derive(Debug, Clone, Copy, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/upload")]
    Upload,
    #[at("/import")]
    Import,
    #[at("/coverage")]
    Coverage,
    #[at("/train")]
    Train,
    #[at("/models")]
    Models,
    #[at("/forecast")]
    Forecast,
    #[at("/forecasts")]
    Forecasts,
    #[at("/evaluate")]
    Evaluate,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Entries of the sidebar, in order.
    pub const NAVIGATION: [Route; 9] = [
        Route::Home,
        Route::Upload,
        Route::Import,
        Route::Coverage,
        Route::Train,
        Route::Models,
        Route::Forecast,
        Route::Forecasts,
        Route::Evaluate,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Upload => "Upload CSV Files",
            Route::Import => "Data Import",
            Route::Coverage => "Data Coverage",
            Route::Train => "Train Model",
            Route::Models => "Models",
            Route::Forecast => "Forecast",
            Route::Forecasts => "Forecasts",
            Route::Evaluate => "Evaluate Forecasts",
            Route::NotFound => "404",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Route::Upload => "Upload",
            Route::Coverage => "Coverage",
            Route::Train => "Train",
            Route::Evaluate => "Evaluate",
            other => other.title(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Route::Home => "fas fa-home",
            Route::Upload => "fas fa-upload",
            Route::Import => "fas fa-file-import",
            Route::Coverage => "fas fa-calendar-alt",
            Route::Train => "fas fa-brain",
            Route::Models => "fas fa-cubes",
            Route::Forecast => "fas fa-chart-line",
            Route::Forecasts => "fas fa-list",
            Route::Evaluate => "fas fa-bullseye",
            Route::NotFound => "fas fa-question",
        }
    }
}

pub fn switch(route: Route) -> Html {
    log::debug!("Routing to: {:?}", route);
    let page = match route {
        Route::Home => html! { <HomePage /> },
        Route::Upload => html! { <UploadPage /> },
        Route::Import => html! { <DataImportPage /> },
        Route::Coverage => html! { <DataCoveragePage /> },
        Route::Train => html! { <TrainPage /> },
        Route::Models => html! { <ModelsPage /> },
        Route::Forecast => html! { <ForecastPage /> },
        Route::Forecasts => html! { <ForecastsPage /> },
        Route::Evaluate => html! { <EvaluatePage /> },
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <NotFoundPage /> }
        }
    };
    html! { <Layout title={route.title()}>{page}</Layout> }
}
