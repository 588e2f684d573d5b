pub mod config;
pub mod errors;
pub mod geo;
pub mod imaging;
pub mod models;
pub mod pipeline;
pub mod relay;
pub mod store;
pub mod upload;
pub mod util;
pub mod weather;
