pub mod app;
pub mod app_dir;
pub mod backend_task;
pub mod config;
pub mod context;
pub mod logging;
pub mod model;
pub mod service;
pub mod ui;
pub mod utils;
