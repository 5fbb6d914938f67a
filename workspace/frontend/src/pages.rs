pub mod data_coverage;
pub mod data_import;
pub mod evaluate;
pub mod forecast;
pub mod forecasts;
pub mod home;
pub mod models;
pub mod not_found;
pub mod train;
pub mod upload;
