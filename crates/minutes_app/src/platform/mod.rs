mod app;
pub(crate) mod config;
mod downloads;
mod terminal;

pub(crate) use app::run_app;
