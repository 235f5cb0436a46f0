pub mod align;
pub mod batch;
mod config;
mod logging;
